//! Differential conformance harness.
//!
//! Checks the bounded formatting engine byte-for-byte against the host libc
//! `snprintf`: a deterministic generator produces random templates and
//! argument lists inside the supported conversion subset, the oracle renders
//! them through real variadic FFI calls, and the runner compares stored
//! bytes and logical lengths across a capacity sweep. Reports are emitted as
//! markdown and JSON, with optional JSONL structured logs per case.

#![deny(unsafe_code)]

pub mod diff;
pub mod generator;
#[allow(unsafe_code)]
pub mod oracle;
pub mod report;
pub mod runner;
pub mod structured_log;

pub use diff::render_diff;
pub use generator::{Case, OwnedValue};
pub use oracle::{HostRender, OracleError, host_render_full, host_snprintf};
pub use report::{CampaignReport, FailureRecord};
pub use runner::{CampaignConfig, CampaignResult, CaseIssue, Failure, run_campaign, run_case};
pub use structured_log::{LogEmitter, LogEntry, LogLevel, Outcome};

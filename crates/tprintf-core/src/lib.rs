//! # tprintf-core
//!
//! Bounded printf-style formatting in safe Rust, matching host `snprintf`
//! directive-for-directive over the supported conversion subset: `d i o u x
//! X s`, flags `space + - 0`, literal or `*` width and precision, and length
//! modifiers `hh h l ll`.
//!
//! The variadic argument list of the C interface becomes an explicit typed
//! slice ([`Value`]); the destination buffer is bounds-checked in exactly one
//! place ([`writer::BoundedWriter`]). The return value is always the logical
//! output length, even when capacity truncates the stored bytes.

#![deny(unsafe_code)]

pub mod args;
pub mod directive;
pub mod engine;
pub mod error;
pub mod render;
pub mod writer;

pub use args::{ArgCursor, Value};
pub use directive::{Directive, Flags, LengthMod, Precision, Segment, Segments, Width};
pub use engine::{format_into, format_to_vec, snprintf};
pub use error::FormatError;

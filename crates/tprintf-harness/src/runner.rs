//! Differential campaign runner.
//!
//! Generates deterministic random cases, renders each through both the
//! engine and the host libc reference, and compares logical length and
//! stored bytes at a sweep of buffer capacities around the truncation
//! boundary.

use crate::generator::Case;
use crate::oracle::{self, OracleError};
use tprintf_core::format_into;

/// Campaign parameters.
#[derive(Debug, Clone, Copy)]
pub struct CampaignConfig {
    pub seed: u64,
    pub cases: usize,
    /// Capacity large enough to never truncate a generated case.
    pub ample_capacity: usize,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            seed: 0xDEAD_BEEF,
            cases: 1000,
            ample_capacity: 4096,
        }
    }
}

/// Why a case failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseIssue {
    /// Engine output disagreed with the reference at some capacity.
    Divergence {
        capacity: usize,
        expected: Vec<u8>,
        expected_len: usize,
        actual: Vec<u8>,
        actual_len: usize,
    },
    /// The engine rejected a call the generator considers valid.
    EngineError(String),
    /// The reference itself could not run the call.
    Oracle(String),
}

/// A failed case together with what went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub case: Case,
    pub issue: CaseIssue,
}

/// Aggregate outcome of a campaign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignResult {
    pub total: usize,
    pub passed: usize,
    pub failures: Vec<Failure>,
}

impl CampaignResult {
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Run a full campaign.
#[must_use]
pub fn run_campaign(config: &CampaignConfig) -> CampaignResult {
    let mut passed = 0;
    let mut failures = Vec::new();
    for index in 0..config.cases {
        let case = Case::generate(config.seed, index);
        match run_case(&case, config.ample_capacity) {
            Ok(()) => passed += 1,
            Err(issue) => failures.push(Failure { case, issue }),
        }
    }
    CampaignResult {
        total: config.cases,
        passed,
        failures,
    }
}

/// Compare a single case at a sweep of capacities. The sweep brackets the
/// truncation boundary: measurement-only, terminator-only, mid-truncation,
/// exact fit minus one, exact fit, and ample.
pub fn run_case(case: &Case, ample_capacity: usize) -> Result<(), CaseIssue> {
    let full = oracle::host_snprintf(ample_capacity, &case.template, &case.args)
        .map_err(|e: OracleError| CaseIssue::Oracle(e.to_string()))?;
    let logical = full.logical;

    let mut capacities = vec![
        0,
        1,
        logical / 2,
        logical,
        logical + 1,
        ample_capacity,
    ];
    capacities.sort_unstable();
    capacities.dedup();

    for capacity in capacities {
        compare_at(case, capacity)?;
    }
    Ok(())
}

fn compare_at(case: &Case, capacity: usize) -> Result<(), CaseIssue> {
    let expected = oracle::host_snprintf(capacity, &case.template, &case.args)
        .map_err(|e| CaseIssue::Oracle(e.to_string()))?;

    let args = case.arg_values();
    let mut buf = vec![0u8; capacity];
    let actual_len = format_into(&mut buf, &case.template, &args)
        .map_err(|e| CaseIssue::EngineError(e.to_string()))?;
    let actual = if capacity == 0 {
        Vec::new()
    } else {
        buf[..actual_len.min(capacity - 1)].to_vec()
    };

    if actual_len != expected.logical || actual != expected.stored {
        return Err(CaseIssue::Divergence {
            capacity,
            expected: expected.stored,
            expected_len: expected.logical,
            actual,
            actual_len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::OwnedValue;

    #[test]
    fn known_good_case_passes_sweep() {
        let case = Case {
            index: 0,
            template: b"x=%05d y=%-6s!".to_vec(),
            args: vec![OwnedValue::I32(-42), OwnedValue::Str(b"abc".to_vec())],
        };
        assert_eq!(run_case(&case, 4096), Ok(()));
    }

    #[test]
    fn fabricated_divergence_is_reported() {
        // An argument the template does not consume is harmless to libc but
        // rejected by the engine, so use a mismatched type instead.
        let case = Case {
            index: 0,
            template: b"%ld".to_vec(),
            args: vec![OwnedValue::I32(5)],
        };
        let err = run_case(&case, 64).unwrap_err();
        assert!(matches!(err, CaseIssue::EngineError(_)));
    }

    #[test]
    fn small_campaign_is_clean() {
        let config = CampaignConfig {
            seed: 0x5EED,
            cases: 100,
            ample_capacity: 4096,
        };
        let result = run_campaign(&config);
        assert_eq!(result.total, 100);
        assert!(result.failures.is_empty(), "{:?}", result.failures);
        assert_eq!(result.passed, 100);
    }
}

//! Campaign report generation (markdown + JSON).

use serde::{Deserialize, Serialize};

use crate::diff::render_diff;
use crate::runner::{CampaignResult, CaseIssue};

/// One recorded failure, in a form that survives serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureRecord {
    pub case_index: usize,
    pub template: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,
    pub detail: String,
    pub diff: String,
}

/// Serializable campaign summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignReport {
    pub title: String,
    pub seed: u64,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub failures: Vec<FailureRecord>,
}

impl CampaignReport {
    /// Build a report from a finished campaign.
    #[must_use]
    pub fn from_result(title: &str, seed: u64, result: &CampaignResult) -> Self {
        let failures = result
            .failures
            .iter()
            .map(|failure| {
                let template = String::from_utf8_lossy(&failure.case.template).into_owned();
                match &failure.issue {
                    CaseIssue::Divergence {
                        capacity,
                        expected,
                        expected_len,
                        actual,
                        actual_len,
                    } => FailureRecord {
                        case_index: failure.case.index,
                        template,
                        capacity: Some(*capacity),
                        detail: format!(
                            "logical length {expected_len} vs {actual_len}, stored {} vs {} bytes",
                            expected.len(),
                            actual.len()
                        ),
                        diff: render_diff(
                            &String::from_utf8_lossy(expected),
                            &String::from_utf8_lossy(actual),
                        ),
                    },
                    CaseIssue::EngineError(msg) => FailureRecord {
                        case_index: failure.case.index,
                        template,
                        capacity: None,
                        detail: format!("engine error: {msg}"),
                        diff: String::new(),
                    },
                    CaseIssue::Oracle(msg) => FailureRecord {
                        case_index: failure.case.index,
                        template,
                        capacity: None,
                        detail: format!("oracle error: {msg}"),
                        diff: String::new(),
                    },
                }
            })
            .collect();

        Self {
            title: title.to_string(),
            seed,
            total: result.total,
            passed: result.passed,
            failed: result.failed(),
            failures,
        }
    }

    /// Render the report as markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", self.title));
        out.push_str(&format!("- Seed: `{:#x}`\n", self.seed));
        out.push_str(&format!("- Total cases: {}\n", self.total));
        out.push_str(&format!("- Passed: {}\n", self.passed));
        out.push_str(&format!("- Failed: {}\n\n", self.failed));

        if self.failures.is_empty() {
            out.push_str("All cases matched the host reference.\n");
            return out;
        }

        out.push_str("## Failures\n\n");
        out.push_str("| Case | Template | Capacity | Detail |\n");
        out.push_str("|------|----------|----------|--------|\n");
        for f in &self.failures {
            let capacity = f
                .capacity
                .map_or_else(|| String::from("-"), |c| c.to_string());
            out.push_str(&format!(
                "| {} | `{}` | {} | {} |\n",
                f.case_index,
                f.template.replace('|', "\\|"),
                capacity,
                f.detail
            ));
        }
        out.push('\n');
        for f in &self.failures {
            if !f.diff.is_empty() {
                out.push_str(&format!("### Case {}\n\n```\n{}\n```\n\n", f.case_index, f.diff));
            }
        }
        out
    }

    /// Render the report as pretty JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self)
            .unwrap_or_else(|e| format!("{{\"error\": \"serialization failed: {e}\"}}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{Case, OwnedValue};
    use crate::runner::Failure;

    fn sample_result() -> CampaignResult {
        CampaignResult {
            total: 2,
            passed: 1,
            failures: vec![Failure {
                case: Case {
                    index: 1,
                    template: b"%05d".to_vec(),
                    args: vec![OwnedValue::I32(-3)],
                },
                issue: CaseIssue::Divergence {
                    capacity: 4,
                    expected: b"-00".to_vec(),
                    expected_len: 5,
                    actual: b"-000".to_vec(),
                    actual_len: 5,
                },
            }],
        }
    }

    #[test]
    fn markdown_includes_summary_and_failure_table() {
        let report = CampaignReport::from_result("differential run", 0xBEEF, &sample_result());
        let md = report.to_markdown();
        assert!(md.contains("# differential run"));
        assert!(md.contains("- Seed: `0xbeef`"));
        assert!(md.contains("- Failed: 1"));
        assert!(md.contains("| 1 | `%05d` | 4 |"));
        assert!(md.contains("--- expected"));
    }

    #[test]
    fn clean_run_renders_without_failure_section() {
        let clean = CampaignResult {
            total: 5,
            passed: 5,
            failures: Vec::new(),
        };
        let md = CampaignReport::from_result("clean", 1, &clean).to_markdown();
        assert!(md.contains("All cases matched the host reference."));
        assert!(!md.contains("## Failures"));
    }

    #[test]
    fn json_roundtrips() {
        let report = CampaignReport::from_result("differential run", 7, &sample_result());
        let json = report.to_json();
        let restored: CampaignReport = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.failed, 1);
        assert_eq!(restored.failures[0].template, "%05d");
    }
}

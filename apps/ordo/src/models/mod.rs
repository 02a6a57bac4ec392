//! Shared data models for lint/format outputs and index/policy/document modules.

pub mod document;
pub mod index;
pub mod policy;

use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
/// A single lint issue with severity and location.
pub struct Issue {
    pub file: String,
    pub rule: String,
    pub severity: String,
    pub path: String,
    pub message: String,
    /// Violation kind (`order`, `group-order`, ...) for ordering issues.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Serialize, Debug, Default)]
/// Aggregated lint summary used by printers.
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub files: usize,
    pub sequences: usize,
}

#[derive(Serialize, Debug)]
/// Lint results container.
pub struct LintResult {
    pub issues: Vec<Issue>,
    pub summary: Summary,
}

impl LintResult {
    /// A result holding a single error, used when nothing else can run.
    pub fn single_error(file: String, rule: &str, message: String) -> Self {
        LintResult {
            issues: vec![Issue {
                file,
                rule: rule.into(),
                severity: "error".into(),
                path: "$".into(),
                message,
                kind: None,
            }],
            summary: Summary {
                errors: 1,
                ..Summary::default()
            },
        }
    }
}

//! Lint report types for a batch of commit messages.

use serde::Serialize;

use crate::conventional;
use crate::error::Result;
use crate::validator::{Severity, Validator, Violation};

/// Outcome for one commit of a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitReport {
    /// Position of the commit in the supplied batch
    pub commit_index: usize,
    /// First line of the raw message
    #[serde(skip)]
    pub header: String,
    pub violations: Vec<Violation>,
    /// Set when the message could not be parsed; `violations` is then empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
}

impl CommitReport {
    pub fn passes(&self, strict: bool) -> bool {
        self.parse_error.is_none() && !self.violations.iter().any(|v| v.is_fatal(strict))
    }
}

/// Report for a whole batch, serialised as a plain array of commit reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LintReport {
    pub commits: Vec<CommitReport>,
}

/// Summary statistics for a lint report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LintSummary {
    pub total_commits: usize,
    pub failing_commits: usize,
    pub parse_errors: usize,
    pub error_count: usize,
    pub advisory_count: usize,
}

impl LintReport {
    /// True when no commit has a parse error or a fatal violation
    pub fn passes(&self, strict: bool) -> bool {
        self.commits.iter().all(|c| c.passes(strict))
    }

    /// Process exit code for validation mode
    pub fn exit_code(&self, strict: bool) -> i32 {
        if self.passes(strict) {
            0
        } else {
            1
        }
    }

    pub fn summary(&self, strict: bool) -> LintSummary {
        let mut summary = LintSummary {
            total_commits: self.commits.len(),
            ..LintSummary::default()
        };
        for commit in &self.commits {
            if !commit.passes(strict) {
                summary.failing_commits += 1;
            }
            if commit.parse_error.is_some() {
                summary.parse_errors += 1;
            }
            for violation in &commit.violations {
                match violation.severity {
                    Severity::Error => summary.error_count += 1,
                    Severity::Advisory => summary.advisory_count += 1,
                }
            }
        }
        summary
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parses and validates every message. A failure in one message never stops
/// the others from being checked.
pub fn lint_messages<S: AsRef<str>>(validator: &Validator, messages: &[S]) -> LintReport {
    let commits = messages
        .iter()
        .enumerate()
        .map(|(commit_index, raw)| {
            let raw = raw.as_ref();
            let header = raw.lines().next().unwrap_or_default().trim_end().to_string();
            match conventional::parse(raw) {
                Ok(msg) => CommitReport {
                    commit_index,
                    header,
                    violations: validator.validate(&msg),
                    parse_error: None,
                },
                Err(e) => CommitReport {
                    commit_index,
                    header,
                    violations: Vec::new(),
                    parse_error: Some(e.to_string()),
                },
            }
        })
        .collect();

    LintReport { commits }
}

use std::fmt;

use serde::Serialize;

/// Non-fatal conditions met while computing a version bump.
/// These are reported to the user but never change the exit status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BumpWarning {
    /// No commits were supplied
    NoCommits,
    /// A revert contributes `none`; the reverted commit's trigger is not re-evaluated
    #[serde(rename_all = "camelCase")]
    RevertNotEvaluated {
        commit_index: usize,
        reverted_commit: Option<String>,
    },
    /// Input that could not be parsed and was left out of the bump
    #[serde(rename_all = "camelCase")]
    UnparsableCommit { commit_index: usize, reason: String },
}

impl fmt::Display for BumpWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BumpWarning::NoCommits => write!(f, "No commits supplied, bump is 'none'"),
            BumpWarning::RevertNotEvaluated {
                commit_index,
                reverted_commit,
            } => {
                let target = match reverted_commit {
                    Some(hash) => {
                        let short_hash = if hash.len() > 7 { &hash[..7] } else { hash.as_str() };
                        format!("commit {}", short_hash)
                    }
                    None => "an unnamed commit".to_string(),
                };
                write!(
                    f,
                    "Commit #{} reverts {}; the reverted change is not taken off the bump",
                    commit_index, target
                )
            }
            BumpWarning::UnparsableCommit {
                commit_index,
                reason,
            } => {
                write!(f, "Skipped commit #{}: {}", commit_index, reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revert_warning_shortens_hash() {
        let warning = BumpWarning::RevertNotEvaluated {
            commit_index: 2,
            reverted_commit: Some("abc1234def5678".to_string()),
        };
        let msg = warning.to_string();
        assert!(msg.contains("#2"), "got: {}", msg);
        assert!(msg.contains("abc1234"), "got: {}", msg);
        assert!(!msg.contains("abc1234d"), "got: {}", msg);
    }

    #[test]
    fn test_revert_warning_without_hash() {
        let warning = BumpWarning::RevertNotEvaluated {
            commit_index: 0,
            reverted_commit: None,
        };
        assert!(warning.to_string().contains("unnamed commit"));
    }

    #[test]
    fn test_unparsable_warning() {
        let warning = BumpWarning::UnparsableCommit {
            commit_index: 4,
            reason: "Malformed header: summary is empty".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "Skipped commit #4: Malformed header: summary is empty"
        );
    }
}

use serde::Serialize;
use tracing::{debug, trace};

use crate::conventional;
use crate::domain::{CommitMessage, CommitType, VersionBump};
use crate::warning::BumpWarning;

/// Version bump triggered by a single commit
pub fn commit_trigger(commit: &CommitMessage) -> VersionBump {
    if commit.is_breaking() {
        return VersionBump::Major;
    }
    match commit.r#type {
        CommitType::Feat => VersionBump::Minor,
        CommitType::Api | CommitType::Fix | CommitType::Perf => VersionBump::Patch,
        CommitType::Build
        | CommitType::Ci
        | CommitType::Docs
        | CommitType::Refactor
        | CommitType::Revert
        | CommitType::Test
        | CommitType::Unknown(_) => VersionBump::None,
    }
}

/// Aggregate bump over a commit range: the highest individual trigger
pub fn compute_bump(commits: &[CommitMessage]) -> VersionBump {
    commits
        .iter()
        .map(commit_trigger)
        .max()
        .unwrap_or(VersionBump::None)
}

/// Outcome of analyzing a commit range
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BumpAnalysis {
    pub bump: VersionBump,
    pub warnings: Vec<BumpWarning>,
}

/// Analyzes commits to determine the version bump type
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionAnalyzer;

impl VersionAnalyzer {
    /// Create a new version analyzer
    pub fn new() -> Self {
        VersionAnalyzer
    }

    /// Analyze parsed commits, flagging reverts whose effect is not evaluated
    pub fn analyze(&self, commits: &[CommitMessage]) -> BumpAnalysis {
        let indexed: Vec<(usize, &CommitMessage)> = commits.iter().enumerate().collect();
        self.analyze_indexed(&indexed, Vec::new())
    }

    /// Analyze raw commit messages. Messages that fail to parse are skipped
    /// and reported as warnings.
    pub fn analyze_messages<S: AsRef<str>>(&self, messages: &[S]) -> BumpAnalysis {
        let mut parsed = Vec::with_capacity(messages.len());
        let mut warnings = Vec::new();

        for (index, raw) in messages.iter().enumerate() {
            match conventional::parse(raw.as_ref()) {
                Ok(commit) => parsed.push((index, commit)),
                Err(e) => warnings.push(BumpWarning::UnparsableCommit {
                    commit_index: index,
                    reason: e.to_string(),
                }),
            }
        }

        let indexed: Vec<(usize, &CommitMessage)> = parsed.iter().map(|(i, c)| (*i, c)).collect();
        self.analyze_indexed(&indexed, warnings)
    }

    fn analyze_indexed(
        &self,
        commits: &[(usize, &CommitMessage)],
        mut warnings: Vec<BumpWarning>,
    ) -> BumpAnalysis {
        let mut bump = VersionBump::None;

        for (index, commit) in commits {
            let trigger = commit_trigger(commit);
            trace!(index, header = %commit.header, %trigger, "commit trigger");
            bump = bump.max(trigger);

            if commit.is_revert {
                warnings.push(BumpWarning::RevertNotEvaluated {
                    commit_index: *index,
                    reverted_commit: commit.reverted_commit.clone(),
                });
            }
        }

        if commits.is_empty() && warnings.is_empty() {
            warnings.push(BumpWarning::NoCommits);
        }

        debug!(%bump, commits = commits.len(), warnings = warnings.len(), "computed bump");
        BumpAnalysis { bump, warnings }
    }
}

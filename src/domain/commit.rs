use std::fmt;

use serde::Serialize;

/// Commit type from the header. The listed variants form the closed set of
/// accepted types; `Unknown` carries any other lowercase token so the
/// validator can report it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    Api,
    Build,
    Ci,
    Docs,
    Feat,
    Fix,
    Perf,
    Refactor,
    Revert,
    Test,
    Unknown(String),
}

impl CommitType {
    /// Every accepted type, in the order they are documented
    pub const KNOWN: [CommitType; 10] = [
        CommitType::Api,
        CommitType::Build,
        CommitType::Ci,
        CommitType::Docs,
        CommitType::Feat,
        CommitType::Fix,
        CommitType::Perf,
        CommitType::Refactor,
        CommitType::Revert,
        CommitType::Test,
    ];

    pub fn from_token(token: &str) -> Self {
        match token {
            "api" => CommitType::Api,
            "build" => CommitType::Build,
            "ci" => CommitType::Ci,
            "docs" => CommitType::Docs,
            "feat" => CommitType::Feat,
            "fix" => CommitType::Fix,
            "perf" => CommitType::Perf,
            "refactor" => CommitType::Refactor,
            "revert" => CommitType::Revert,
            "test" => CommitType::Test,
            other => CommitType::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CommitType::Api => "api",
            CommitType::Build => "build",
            CommitType::Ci => "ci",
            CommitType::Docs => "docs",
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Perf => "perf",
            CommitType::Refactor => "refactor",
            CommitType::Revert => "revert",
            CommitType::Test => "test",
            CommitType::Unknown(token) => token,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, CommitType::Unknown(_))
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header scope: one of the fixed repository scopes, or a project-specific token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Contributing,
    License,
    Readme,
    Security,
    Custom(String),
}

impl Scope {
    pub fn from_token(token: &str) -> Self {
        match token {
            "contributing" => Scope::Contributing,
            "license" => Scope::License,
            "readme" => Scope::Readme,
            "security" => Scope::Security,
            other => Scope::Custom(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Scope::Contributing => "contributing",
            Scope::License => "license",
            Scope::Readme => "readme",
            Scope::Security => "security",
            Scope::Custom(token) => token,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Scope::Custom(_))
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An issue reference found in the footer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FooterReference {
    pub issue_number: u64,
    /// `true` for `Resolves: #N`, `false` for a bare `#N`
    pub resolves: bool,
}

/// Parsed representation of one commit message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitMessage {
    /// The header line as it appeared in the input
    pub header: String,
    pub r#type: CommitType,
    pub scope: Option<Scope>,
    pub summary: String,
    /// Body text with footer lines removed
    pub body: Option<String>,
    pub breaking_change: Option<String>,
    pub footer_references: Vec<FooterReference>,
    /// Segments of a `Resolves:` line that are not `#<digits>`
    pub invalid_references: Vec<String>,
    pub is_revert: bool,
    pub reverted_commit: Option<String>,
}

impl CommitMessage {
    pub fn is_breaking(&self) -> bool {
        self.breaking_change.is_some()
    }

    /// Number of characters in the body, zero when absent
    pub fn body_len(&self) -> usize {
        self.body.as_deref().map_or(0, |b| b.chars().count())
    }
}

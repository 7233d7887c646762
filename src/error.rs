use thiserror::Error;

/// Structural failure while parsing a commit message. Fatal for that message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    #[error("Empty body: a body is required unless the type is docs")]
    EmptyBody,
}

impl ParseError {
    /// Create a malformed header error with context
    pub fn malformed(msg: impl Into<String>) -> Self {
        ParseError::MalformedHeader(msg.into())
    }
}

/// Unified error type for commit-check operations
#[derive(Error, Debug)]
pub enum CommitCheckError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Input error: {0}")]
    Input(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report serialization failed: {0}")]
    Report(#[from] serde_json::Error),
}

/// Convenience type alias for Results in commit-check
pub type Result<T> = std::result::Result<T, CommitCheckError>;

impl CommitCheckError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        CommitCheckError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        CommitCheckError::Version(msg.into())
    }

    /// Create an input error with context
    pub fn input(msg: impl Into<String>) -> Self {
        CommitCheckError::Input(msg.into())
    }
}

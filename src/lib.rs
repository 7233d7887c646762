pub mod analyzer;
pub mod cli;
pub mod config;
pub mod conventional;
pub mod domain;
pub mod error;
pub mod input;
pub mod report;
pub mod ui;
pub mod validator;
pub mod warning;

pub use analyzer::{compute_bump, VersionAnalyzer};
pub use conventional::parse;
pub use domain::{CommitMessage, CommitType, FooterReference, Scope, VersionBump};
pub use error::{CommitCheckError, ParseError, Result};
pub use validator::{validate, Rule, Severity, Validator, Violation};

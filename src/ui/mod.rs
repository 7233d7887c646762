//! User interface module - terminal output for lint and bump results.
//!
//! Formatting lives in `formatter`; this module is the entry point used by
//! the CLI.

pub mod formatter;

pub use formatter::{
    display_error, display_lint_report, display_success, display_warning,
    format_commit_report, format_summary,
};

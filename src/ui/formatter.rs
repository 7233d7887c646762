//! Formatting functions for UI output.
//!
//! `format_*` functions are pure and return strings; `display_*` functions
//! print them. Styling goes through `console`, which drops colors when the
//! stream is not a terminal.

use console::style;

use crate::report::{CommitReport, LintReport, LintSummary};
use crate::validator::Severity;
use crate::warning::BumpWarning;

/// Longest header shown in a commit line before truncation
const HEADER_PREVIEW: usize = 60;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Print a bump warning to stderr.
pub fn display_warning(warning: &BumpWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

fn preview(header: &str) -> String {
    if header.chars().count() > HEADER_PREVIEW {
        let short: String = header.chars().take(HEADER_PREVIEW).collect();
        format!("{}…", short)
    } else {
        header.to_string()
    }
}

/// Format one commit's outcome: a status line followed by one line per problem.
pub fn format_commit_report(commit: &CommitReport, strict: bool) -> String {
    let mark = if commit.passes(strict) {
        style("✓").green()
    } else {
        style("✗").red()
    };
    let mut out = format!("{} #{} {}", mark, commit.commit_index, preview(&commit.header));

    if let Some(error) = &commit.parse_error {
        out.push_str(&format!("\n    {} {}", style("parse:").red(), error));
    }
    for violation in &commit.violations {
        let label = match violation.severity {
            Severity::Error => style(violation.rule.id()).red(),
            Severity::Advisory => style(violation.rule.id()).yellow(),
        };
        out.push_str(&format!("\n    {} {}", label, violation.message));
    }
    out
}

/// Format the closing summary line.
pub fn format_summary(summary: &LintSummary) -> String {
    format!(
        "{} commits checked, {} failing ({} parse errors, {} errors, {} advisories)",
        summary.total_commits,
        summary.failing_commits,
        summary.parse_errors,
        summary.error_count,
        summary.advisory_count
    )
}

/// Print a full lint report. Passing commits are shown only with `show_passing`.
pub fn display_lint_report(report: &LintReport, strict: bool, show_passing: bool) {
    for commit in &report.commits {
        if show_passing || !commit.passes(strict) || !commit.violations.is_empty() {
            println!("{}", format_commit_report(commit, strict));
        }
    }

    let summary = report.summary(strict);
    let line = format_summary(&summary);
    if report.passes(strict) {
        display_success(&line);
    } else {
        display_error(&line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::lint_messages;
    use crate::validator::Validator;

    #[test]
    fn test_format_commit_report_lists_violations() {
        console::set_colors_enabled(false);
        let report = lint_messages(&Validator::default(), &["build: bump toolchain\n\nabc"]);
        let text = format_commit_report(&report.commits[0], false);
        assert_eq!(
            text,
            "✗ #0 build: bump toolchain\n    body-min-length body is 3 characters, minimum is 20"
        );
    }

    #[test]
    fn test_format_commit_report_parse_error() {
        console::set_colors_enabled(false);
        let report = lint_messages(&Validator::default(), &["Updated stuff"]);
        let text = format_commit_report(&report.commits[0], false);
        assert!(text.starts_with("✗ #0 Updated stuff\n    parse: Malformed header"));
    }

    #[test]
    fn test_preview_truncates_long_headers() {
        let header = "x".repeat(80);
        assert_eq!(preview(&header).chars().count(), HEADER_PREVIEW + 1);
        assert_eq!(preview("fix: short"), "fix: short");
    }

    #[test]
    fn test_format_summary() {
        let summary = LintSummary {
            total_commits: 3,
            failing_commits: 1,
            parse_errors: 1,
            error_count: 0,
            advisory_count: 2,
        };
        assert_eq!(
            format_summary(&summary),
            "3 commits checked, 1 failing (1 parse errors, 0 errors, 2 advisories)"
        );
    }
}

//! Workflow orchestration for the CLI.
//!
//! Keeps argument parsing in `main.rs` apart from the lint and bump logic so
//! both workflows can be driven programmatically.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::analyzer::{BumpAnalysis, VersionAnalyzer};
use crate::cli::OutputFormat;
use crate::config::{self, Config};
use crate::domain::{next_version, parse_version_from_tag};
use crate::input::{self, InputOptions};
use crate::report::{lint_messages, LintReport};
use crate::ui;
use crate::validator::Validator;
use crate::warning::BumpWarning;

/// Arguments for the lint workflow
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LintWorkflowArgs {
    /// Path to custom config file
    pub config_path: Option<String>,
    pub input: InputOptions,
    pub format: OutputFormat,
    /// Treat advisories as fatal, on top of `behavior.strict`
    pub strict: bool,
    /// Also print commits without problems
    pub show_passing: bool,
}

/// Result of a lint run
#[derive(Debug, Clone, PartialEq)]
pub struct LintOutcome {
    pub report: LintReport,
    pub strict: bool,
    pub exit_code: i32,
}

/// Arguments for the bump workflow
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BumpWorkflowArgs {
    pub input: InputOptions,
    pub format: OutputFormat,
    /// Current release version; when set the next version is reported too
    pub current: Option<String>,
    /// Fail when any message had to be skipped
    pub strict: bool,
}

/// Result of a bump run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BumpOutcome {
    #[serde(flatten)]
    pub analysis: BumpAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_version: Option<String>,
}

impl BumpOutcome {
    /// The single line printed in text mode
    pub fn token(&self) -> String {
        match &self.next_version {
            Some(version) => version.clone(),
            None => self.analysis.bump.to_string(),
        }
    }

    /// Number of input messages left out of the bump because they did not parse
    pub fn skipped_commits(&self) -> usize {
        self.analysis
            .warnings
            .iter()
            .filter(|w| matches!(w, BumpWarning::UnparsableCommit { .. }))
            .count()
    }

    /// Process exit code for trigger mode; skipped commits fail only in strict mode
    pub fn exit_code(&self, strict: bool) -> i32 {
        if strict && self.skipped_commits() > 0 {
            1
        } else {
            0
        }
    }
}

/// Lints already-read messages against a configuration
pub fn lint(config: &Config, messages: &[String], strict: bool) -> LintOutcome {
    let strict = strict || config.behavior.strict;
    let report = lint_messages(&Validator::new(config), messages);
    let exit_code = report.exit_code(strict);
    LintOutcome {
        report,
        strict,
        exit_code,
    }
}

/// Loads config and input, lints, and prints the report
pub fn run_lint_workflow(args: LintWorkflowArgs) -> Result<LintOutcome> {
    let config = config::load_config(args.config_path.as_deref())
        .context("failed to load configuration")?;
    let messages = input::read_messages(&args.input).context("failed to read commit messages")?;
    tracing::debug!(count = messages.len(), "linting commit messages");

    let outcome = lint(&config, &messages, args.strict);
    match args.format {
        OutputFormat::Json => println!("{}", outcome.report.to_json()?),
        OutputFormat::Text => {
            ui::display_lint_report(&outcome.report, outcome.strict, args.show_passing)
        }
    }
    Ok(outcome)
}

/// Computes the bump for already-read messages
pub fn bump(messages: &[String], current: Option<&str>) -> Result<BumpOutcome> {
    let analysis = VersionAnalyzer::new().analyze_messages(messages);
    let next_version = current
        .map(|tag| -> Result<String> {
            let current = parse_version_from_tag(tag)?;
            Ok(next_version(&current, analysis.bump).to_string())
        })
        .transpose()?;
    Ok(BumpOutcome {
        analysis,
        next_version,
    })
}

/// Reads input, computes the bump, and prints the result
pub fn run_bump_workflow(args: BumpWorkflowArgs) -> Result<BumpOutcome> {
    let messages = input::read_messages(&args.input).context("failed to read commit messages")?;
    let outcome = bump(&messages, args.current.as_deref())?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Text => {
            for warning in &outcome.analysis.warnings {
                ui::display_warning(warning);
            }
            println!("{}", outcome.token());
        }
    }
    if args.strict && outcome.skipped_commits() > 0 {
        ui::display_error(&format!(
            "{} commit(s) could not be parsed; bump may be too low",
            outcome.skipped_commits()
        ));
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VersionBump;

    fn messages(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|m| m.to_string()).collect()
    }

    #[test]
    fn test_lint_honors_config_strict() {
        let msgs = messages(&["docs(license): relicense\n\nSwitch the project to the MIT license."]);
        let mut config = Config::default();
        assert_eq!(lint(&config, &msgs, false).exit_code, 0);
        assert_eq!(lint(&config, &msgs, true).exit_code, 1);

        config.behavior.strict = true;
        let outcome = lint(&config, &msgs, false);
        assert!(outcome.strict);
        assert_eq!(outcome.exit_code, 1);
    }

    #[test]
    fn test_bump_token() {
        let msgs = messages(&["feat: add search\n\nSearch across every project field."]);
        let outcome = bump(&msgs, None).unwrap();
        assert_eq!(outcome.analysis.bump, VersionBump::Minor);
        assert_eq!(outcome.token(), "minor");
    }

    #[test]
    fn test_bump_next_version() {
        let msgs = messages(&["fix: handle null\n\nThe parser crashed on empty files."]);
        let outcome = bump(&msgs, Some("v1.4.2")).unwrap();
        assert_eq!(outcome.token(), "1.4.3");
    }

    #[test]
    fn test_bump_strict_fails_on_skipped_commit() {
        let msgs = messages(&["feat: add search"]);
        let outcome = bump(&msgs, None).unwrap();
        assert_eq!(outcome.token(), "none");
        assert_eq!(outcome.skipped_commits(), 1);
        assert_eq!(outcome.exit_code(false), 0);
        assert_eq!(outcome.exit_code(true), 1);

        let clean = bump(&messages(&["fix: handle null\n\nThe parser crashed on empty files."]), None)
            .unwrap();
        assert_eq!(clean.exit_code(true), 0);
    }

    #[test]
    fn test_bump_invalid_current_version() {
        assert!(bump(&[], Some("latest")).is_err());
    }

    #[test]
    fn test_bump_json_shape() {
        let outcome = bump(&[], None).unwrap();
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["bump"], "none");
        assert_eq!(json["warnings"][0]["kind"], "no-commits");
        assert!(json.get("nextVersion").is_none());
    }
}

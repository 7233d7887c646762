use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use commit_check::cli::orchestration::{
    run_bump_workflow, run_lint_workflow, BumpWorkflowArgs, LintWorkflowArgs,
};
use commit_check::cli::OutputFormat;
use commit_check::input::InputOptions;
use commit_check::ui;

/// Exit status for usage, config and input failures
const EXIT_USAGE: i32 = 2;

#[derive(Parser)]
#[command(
    name = "commit-check",
    version,
    about = "Lint commit messages and compute the semantic version bump they trigger"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate commit messages; exits non-zero on fatal violations
    Lint(LintArgs),
    /// Print the version bump (none, patch, minor, major) for a commit range
    Bump(BumpArgs),
}

#[derive(Args)]
struct InputArgs {
    #[arg(help = "Files containing one commit message each")]
    files: Vec<PathBuf>,

    #[arg(long, help = "Read messages from standard input")]
    stdin: bool,

    #[arg(short = 'z', long = "null", help = "Messages are separated by NUL bytes")]
    nul_separated: bool,

    #[arg(long, help = "Drop git comment lines and text below a scissors line")]
    strip_comments: bool,
}

impl From<InputArgs> for InputOptions {
    fn from(args: InputArgs) -> Self {
        InputOptions {
            files: args.files,
            stdin: args.stdin,
            nul_separated: args.nul_separated,
            strip_comments: args.strip_comments,
        }
    }
}

#[derive(Args)]
struct LintArgs {
    #[command(flatten)]
    input: InputArgs,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, help = "Report format")]
    format: OutputFormat,

    #[arg(long, help = "Treat advisory violations as fatal")]
    strict: bool,

    #[arg(long, help = "Also list commits without problems")]
    show_passing: bool,
}

#[derive(Args)]
struct BumpArgs {
    #[command(flatten)]
    input: InputArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, help = "Output format")]
    format: OutputFormat,

    #[arg(long, value_name = "VERSION", help = "Current release version; print the next one")]
    current: Option<String>,

    #[arg(long, help = "Exit non-zero when a message could not be parsed")]
    strict: bool,
}

fn main() {
    // Logs go to stderr so they never mix with the bump token or JSON report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Lint(args) => run_lint_workflow(LintWorkflowArgs {
            config_path: args.config,
            input: args.input.into(),
            format: args.format,
            strict: args.strict,
            show_passing: args.show_passing,
        })
        .map(|outcome| outcome.exit_code),
        Command::Bump(args) => {
            let strict = args.strict;
            run_bump_workflow(BumpWorkflowArgs {
                input: args.input.into(),
                format: args.format,
                current: args.current,
                strict,
            })
            .map(|outcome| outcome.exit_code(strict))
        }
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            process::exit(EXIT_USAGE);
        }
    }
}

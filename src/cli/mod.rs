//! Command-line workflows for the `lint` and `bump` subcommands

pub mod orchestration;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

//! Analysis engine for determining version bumps from commits

pub mod version_analyzer;

pub use version_analyzer::{commit_trigger, compute_bump, BumpAnalysis, VersionAnalyzer};

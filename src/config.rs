use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{CommitCheckError, Result};
use crate::validator::Rule;

/// File name looked up in the current directory
pub const LOCAL_CONFIG_FILE: &str = "commitcheck.toml";

/// File name looked up in the user config directory
pub const USER_CONFIG_FILE: &str = ".commitcheck.toml";

/// Represents the complete configuration for commit-check.
///
/// Contains rule thresholds, scope vocabulary and behavior options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub rules: RulesConfig,

    #[serde(default)]
    pub scopes: ScopesConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

fn default_min_body_length() -> usize {
    20
}

/// Thresholds and switches for the validator rules.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RulesConfig {
    #[serde(default = "default_min_body_length")]
    pub min_body_length: usize,

    /// Opt-in header length limit; unset means no limit
    #[serde(default)]
    pub max_header_length: Option<usize>,

    /// Rule ids to skip, e.g. `"header-max-length"`
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            min_body_length: default_min_body_length(),
            max_header_length: None,
            disabled: Vec::new(),
        }
    }
}

impl RulesConfig {
    pub fn is_enabled(&self, rule: Rule) -> bool {
        !self.disabled.iter().any(|id| id == rule.id())
    }
}

fn default_allow_custom() -> bool {
    true
}

/// Scope vocabulary beyond the fixed repository scopes.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ScopesConfig {
    /// Accept any project-specific scope token
    #[serde(default = "default_allow_custom")]
    pub allow_custom: bool,

    /// Project-specific scopes accepted when `allow_custom` is off
    #[serde(default)]
    pub extra: Vec<String>,
}

impl Default for ScopesConfig {
    fn default() -> Self {
        ScopesConfig {
            allow_custom: default_allow_custom(),
            extra: Vec::new(),
        }
    }
}

/// Configuration for behavior customization.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct BehaviorConfig {
    /// Treat advisory violations as fatal
    #[serde(default)]
    pub strict: bool,
}

impl Config {
    /// Rejects rule ids in `rules.disabled` that name no rule
    pub fn validate(&self) -> Result<()> {
        for id in &self.rules.disabled {
            if Rule::from_id(id).is_none() {
                return Err(CommitCheckError::config(format!(
                    "unknown rule '{}' in rules.disabled",
                    id
                )));
            }
        }
        Ok(())
    }
}

/// Parses configuration from TOML text.
pub fn parse_config(text: &str) -> Result<Config> {
    let config: Config = toml::from_str(text).map_err(|e| CommitCheckError::config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `commitcheck.toml` in current directory
/// 3. `.commitcheck.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        fs::read_to_string(LOCAL_CONFIG_FILE)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(USER_CONFIG_FILE);
        if config_path.exists() {
            tracing::debug!(path = %config_path.display(), "loading user config");
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

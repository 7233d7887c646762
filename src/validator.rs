//! Rule validator - checks a parsed commit message against the convention.
//!
//! Every enabled rule runs on every message. Violations come back in rule
//! declaration order so reports are stable.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::config::{Config, RulesConfig, ScopesConfig};
use crate::conventional::{find_reverted_commit, BREAKING_CHANGE_MARKER};
use crate::domain::{CommitMessage, CommitType, Scope};

/// A single validation rule. Declaration order is evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    TypeEnum,
    ScopeEnum,
    SummaryEmpty,
    SummaryCase,
    SummaryFullStop,
    HeaderMaxLength,
    BodyRequired,
    BodyMinLength,
    RevertReference,
    FooterReference,
    LicenseBreakingChange,
}

impl Rule {
    pub const ALL: [Rule; 11] = [
        Rule::TypeEnum,
        Rule::ScopeEnum,
        Rule::SummaryEmpty,
        Rule::SummaryCase,
        Rule::SummaryFullStop,
        Rule::HeaderMaxLength,
        Rule::BodyRequired,
        Rule::BodyMinLength,
        Rule::RevertReference,
        Rule::FooterReference,
        Rule::LicenseBreakingChange,
    ];

    /// Stable id used in configuration and reports
    pub fn id(&self) -> &'static str {
        match self {
            Rule::TypeEnum => "type-enum",
            Rule::ScopeEnum => "scope-enum",
            Rule::SummaryEmpty => "summary-empty",
            Rule::SummaryCase => "summary-case",
            Rule::SummaryFullStop => "summary-full-stop",
            Rule::HeaderMaxLength => "header-max-length",
            Rule::BodyRequired => "body-required",
            Rule::BodyMinLength => "body-min-length",
            Rule::RevertReference => "revert-reference",
            Rule::FooterReference => "footer-reference",
            Rule::LicenseBreakingChange => "license-breaking-change",
        }
    }

    pub fn from_id(id: &str) -> Option<Rule> {
        Rule::ALL.into_iter().find(|rule| rule.id() == id)
    }

    pub fn severity(&self) -> Severity {
        match self {
            Rule::LicenseBreakingChange => Severity::Advisory,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Severity level for violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational; fails only in strict mode
    Advisory,
    /// Fails validation
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Advisory => write!(f, "advisory"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// One rule-level non-compliance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub rule: Rule,
    pub severity: Severity,
    pub message: String,
}

impl Violation {
    fn new(rule: Rule, message: impl Into<String>) -> Self {
        Violation {
            rule,
            severity: rule.severity(),
            message: message.into(),
        }
    }

    pub fn is_fatal(&self, strict: bool) -> bool {
        strict || self.severity == Severity::Error
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.rule, self.message)
    }
}

/// Applies the configured rules to parsed commit messages
#[derive(Debug, Clone, Default)]
pub struct Validator {
    rules: RulesConfig,
    scopes: ScopesConfig,
}

impl Validator {
    pub fn new(config: &Config) -> Self {
        Validator {
            rules: config.rules.clone(),
            scopes: config.scopes.clone(),
        }
    }

    /// Runs every enabled rule and collects the violations
    pub fn validate(&self, msg: &CommitMessage) -> Vec<Violation> {
        let mut violations = Vec::new();

        for rule in Rule::ALL {
            if !self.rules.is_enabled(rule) {
                continue;
            }
            if let Some(message) = self.check(rule, msg) {
                violations.push(Violation::new(rule, message));
            }
        }

        debug!(
            header = %msg.header,
            violations = violations.len(),
            "validated commit message"
        );
        violations
    }

    fn check(&self, rule: Rule, msg: &CommitMessage) -> Option<String> {
        match rule {
            Rule::TypeEnum => (!msg.r#type.is_known()).then(|| {
                format!(
                    "type '{}' is not one of: {}",
                    msg.r#type,
                    known_types()
                )
            }),
            Rule::ScopeEnum => match &msg.scope {
                Some(scope)
                    if scope.is_custom()
                        && !self.scopes.allow_custom
                        && !self.scopes.extra.iter().any(|s| s == scope.as_str()) =>
                {
                    Some(format!(
                        "scope '{}' is not one of: contributing, license, readme, security{}",
                        scope,
                        self.scopes
                            .extra
                            .iter()
                            .map(|s| format!(", {}", s))
                            .collect::<String>()
                    ))
                }
                _ => None,
            },
            Rule::SummaryEmpty => msg
                .summary
                .trim()
                .is_empty()
                .then(|| "summary must not be empty".to_string()),
            Rule::SummaryCase => msg
                .summary
                .chars()
                .next()
                .filter(|c| c.is_uppercase())
                .map(|_| "summary must not start with a capital letter".to_string()),
            Rule::SummaryFullStop => msg
                .summary
                .trim_end()
                .ends_with('.')
                .then(|| "summary must not end with a period".to_string()),
            Rule::HeaderMaxLength => {
                let max = self.rules.max_header_length?;
                let len = msg.header.chars().count();
                (len > max)
                    .then(|| format!("header is {} characters, maximum is {}", len, max))
            }
            Rule::BodyRequired => (msg.body.is_none() && msg.r#type != CommitType::Docs)
                .then(|| format!("a body is required for '{}' commits", msg.r#type)),
            Rule::BodyMinLength => {
                let len = msg.body_len();
                (msg.body.is_some() && len < self.rules.min_body_length).then(|| {
                    format!(
                        "body is {} characters, minimum is {}",
                        len, self.rules.min_body_length
                    )
                })
            }
            Rule::RevertReference => {
                let has_reference = msg
                    .body
                    .as_deref()
                    .and_then(find_reverted_commit)
                    .is_some();
                (msg.r#type == CommitType::Revert && !has_reference).then(|| {
                    "revert body must contain 'reverts commit <hash>' with a 7-40 character hash"
                        .to_string()
                })
            }
            Rule::FooterReference => {
                let mut problems: Vec<String> = msg
                    .footer_references
                    .iter()
                    .filter(|r| r.resolves && r.issue_number == 0)
                    .map(|_| "Resolves: #0".to_string())
                    .collect();
                problems.extend(msg.invalid_references.iter().cloned());
                (!problems.is_empty()).then(|| {
                    format!(
                        "Resolves entries must reference a positive issue number: {}",
                        problems.join(", ")
                    )
                })
            }
            Rule::LicenseBreakingChange => {
                let has_marker = msg
                    .body
                    .as_deref()
                    .is_some_and(|b| b.contains(BREAKING_CHANGE_MARKER));
                (msg.scope == Some(Scope::License) && !has_marker).then(|| {
                    format!(
                        "license changes that restrict or change terms need a '{}' note",
                        BREAKING_CHANGE_MARKER
                    )
                })
            }
        }
    }
}

fn known_types() -> String {
    CommitType::KNOWN
        .iter()
        .map(CommitType::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validates with the default configuration
pub fn validate(msg: &CommitMessage) -> Vec<Violation> {
    Validator::default().validate(msg)
}

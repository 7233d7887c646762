//! Commit message parser.
//!
//! Grammar:
//!
//! ```text
//! <type>(<scope>)!: <summary>
//! <blank line>
//! [BREAKING CHANGE: <description>]
//! <body>
//! <blank line>
//! [Resolves: #<N>, #<N>]
//! ```
//!
//! Scope and `!` are optional. The footer is the run of reference lines at the
//! end of the message and is removed from the body.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::domain::{CommitMessage, CommitType, FooterReference, Scope};
use crate::error::ParseError;

pub const BREAKING_CHANGE_MARKER: &str = "BREAKING CHANGE:";

const RESOLVES_KEYWORD: &str = "resolves:";

fn header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<type>[a-z]+)(?:\((?P<scope>[^()]*)\))?(?P<bang>!)?:(?P<rest>.*)$")
            .expect("header pattern is a valid regex")
    })
}

fn revert_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"reverts commit ([0-9a-f]{7,40})")
            .expect("revert pattern is a valid regex")
    })
}

/// Returns the hash named by `reverts commit <hash>`, if the text contains one
pub fn find_reverted_commit(text: &str) -> Option<&str> {
    revert_regex()
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Parse a raw commit message into a [`CommitMessage`]
pub fn parse(raw: &str) -> Result<CommitMessage, ParseError> {
    let normalized = raw.replace("\r\n", "\n");
    let normalized = normalized.trim_end();
    let lines: Vec<&str> = normalized.lines().collect();

    let header = match lines.first() {
        Some(line) if !line.trim().is_empty() => line.trim_end(),
        Some(_) => return Err(ParseError::malformed("header line is blank")),
        None => return Err(ParseError::malformed("commit message is empty")),
    };

    let (r#type, scope, bang, summary) = parse_header(header)?;
    trace!(header, "parsed header");

    let rest: &[&str] = if lines.len() > 1 {
        if !lines[1].trim().is_empty() {
            return Err(ParseError::malformed(
                "header must be followed by a blank line",
            ));
        }
        &lines[2..]
    } else {
        &[]
    };

    let (body_lines, footer) = split_footer(rest);
    let body = join_trimmed(body_lines);

    if body.is_none() && r#type != CommitType::Docs {
        return Err(ParseError::EmptyBody);
    }

    let breaking_change = body
        .as_deref()
        .and_then(extract_breaking_change)
        .or_else(|| bang.then(|| summary.clone()));

    let is_revert = r#type == CommitType::Revert;
    let reverted_commit = body
        .as_deref()
        .and_then(find_reverted_commit)
        .map(str::to_string);

    debug!(
        commit_type = %r#type,
        body_len = body.as_deref().map_or(0, |b| b.chars().count()),
        references = footer.references.len(),
        breaking = breaking_change.is_some(),
        "parsed commit message"
    );

    Ok(CommitMessage {
        header: header.to_string(),
        r#type,
        scope,
        summary,
        body,
        breaking_change,
        footer_references: footer.references,
        invalid_references: footer.invalid,
        is_revert,
        reverted_commit,
    })
}

fn parse_header(header: &str) -> Result<(CommitType, Option<Scope>, bool, String), ParseError> {
    let captures = match header_regex().captures(header) {
        Some(c) => c,
        None if !header.contains(':') => {
            return Err(ParseError::malformed(format!(
                "expected '<type>(<scope>): <summary>', found no ':' in '{}'",
                header
            )))
        }
        None => {
            return Err(ParseError::malformed(format!(
                "expected '<type>(<scope>): <summary>', found '{}'",
                header
            )))
        }
    };

    let r#type = CommitType::from_token(&captures["type"]);

    let scope = match captures.name("scope").map(|m| m.as_str().trim()) {
        Some("") => return Err(ParseError::malformed("scope is empty")),
        Some(token) => Some(Scope::from_token(token)),
        None => None,
    };

    let bang = captures.name("bang").is_some();

    let rest = &captures["rest"];
    if !rest.starts_with(' ') {
        return Err(ParseError::malformed("expected a space after ':'"));
    }
    let summary = rest.trim();
    if summary.is_empty() {
        return Err(ParseError::malformed("summary is empty"));
    }

    Ok((r#type, scope, bang, summary.to_string()))
}

#[derive(Debug, Default)]
struct Footer {
    references: Vec<FooterReference>,
    invalid: Vec<String>,
}

/// Splits trailing footer lines off the body block
fn split_footer<'a>(lines: &'a [&'a str]) -> (&'a [&'a str], Footer) {
    let mut end = trim_trailing_blank(lines);
    let mut parsed = Vec::new();

    while end > 0 {
        match parse_footer_line(lines[end - 1]) {
            Some(line) => {
                parsed.push(line);
                end -= 1;
            }
            None => break,
        }
    }

    let mut footer = Footer::default();
    for line in parsed.into_iter().rev() {
        footer.references.extend(line.references);
        footer.invalid.extend(line.invalid);
    }

    let body_end = trim_trailing_blank(&lines[..end]);
    (&lines[..body_end], footer)
}

fn trim_trailing_blank(lines: &[&str]) -> usize {
    let mut end = lines.len();
    while end > 0 && lines[end - 1].trim().is_empty() {
        end -= 1;
    }
    end
}

/// Returns the references on a footer line, or `None` if the line is body text.
///
/// A line starting with `Resolves:` is always a footer line; bare references
/// on it inherit `resolves`. Any other line is a footer line only when every
/// comma-separated segment is a `#<N>` reference.
fn parse_footer_line(line: &str) -> Option<Footer> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let resolves_line = strip_resolves(trimmed).is_some();
    let mut footer = Footer::default();

    for segment in trimmed.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (token, resolves) = match strip_resolves(segment) {
            Some(token) => (token.trim(), true),
            None => (segment, resolves_line),
        };

        match parse_issue_ref(token) {
            Some(issue_number) => footer.references.push(FooterReference {
                issue_number,
                resolves,
            }),
            None if resolves_line => footer.invalid.push(segment.to_string()),
            None => return None,
        }
    }

    if footer.references.is_empty() && footer.invalid.is_empty() {
        return None;
    }
    Some(footer)
}

fn strip_resolves(segment: &str) -> Option<&str> {
    let prefix = segment.get(..RESOLVES_KEYWORD.len())?;
    if prefix.eq_ignore_ascii_case(RESOLVES_KEYWORD) {
        Some(&segment[RESOLVES_KEYWORD.len()..])
    } else {
        None
    }
}

fn parse_issue_ref(token: &str) -> Option<u64> {
    let digits = token.strip_prefix('#')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn join_trimmed(lines: &[&str]) -> Option<String> {
    let text = lines.join("\n");
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Text of the leading `BREAKING CHANGE:` paragraph, without the marker
fn extract_breaking_change(body: &str) -> Option<String> {
    let first = body.strip_prefix(BREAKING_CHANGE_MARKER)?;
    let paragraph: Vec<&str> = first
        .lines()
        .take_while(|line| !line.trim().is_empty())
        .collect();
    Some(paragraph.join("\n").trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "This function adds the key functionality to the project.";

    #[test]
    fn test_parse_with_scope() {
        let msg = parse(&format!("feat(auth): add login\n\n{BODY}")).unwrap();
        assert_eq!(msg.r#type, CommitType::Feat);
        assert_eq!(msg.scope, Some(Scope::Custom("auth".to_string())));
        assert_eq!(msg.summary, "add login");
        assert_eq!(msg.body.as_deref(), Some(BODY));
        assert!(!msg.is_breaking());
    }

    #[test]
    fn test_parse_without_scope() {
        let msg = parse(&format!("fix: add missing null check\n\n{BODY}")).unwrap();
        assert_eq!(msg.r#type, CommitType::Fix);
        assert_eq!(msg.scope, None);
        assert_eq!(msg.summary, "add missing null check");
    }

    #[test]
    fn test_parse_fixed_scope() {
        let msg = parse(&format!("docs(readme): describe install\n\n{BODY}")).unwrap();
        assert_eq!(msg.scope, Some(Scope::Readme));
    }

    #[test]
    fn test_parse_recovers_every_known_type() {
        for known in CommitType::KNOWN.iter() {
            let raw = format!("{}(core): do the thing\n\n{BODY}", known);
            let msg = parse(&raw).unwrap();
            assert_eq!(&msg.r#type, known);
            assert_eq!(msg.scope, Some(Scope::Custom("core".to_string())));
            assert_eq!(msg.summary, "do the thing");
        }
    }

    #[test]
    fn test_parse_unknown_type_is_kept() {
        let msg = parse(&format!("chore: bump deps\n\n{BODY}")).unwrap();
        assert_eq!(msg.r#type, CommitType::Unknown("chore".to_string()));
    }

    #[test]
    fn test_parse_spec_example_fix() {
        let raw = "fix(index): add function foo\n\nThis function adds the key functionality to the project.\n\nResolves: #1";
        let msg = parse(raw).unwrap();
        assert_eq!(msg.r#type, CommitType::Fix);
        assert_eq!(msg.scope, Some(Scope::Custom("index".to_string())));
        assert!(msg.body_len() >= 20);
        assert_eq!(msg.body.as_deref(), Some(BODY));
        assert_eq!(
            msg.footer_references,
            vec![FooterReference {
                issue_number: 1,
                resolves: true
            }]
        );
    }

    #[test]
    fn test_parse_spec_example_breaking() {
        let raw = "feat(index): add function foobar\n\nBREAKING CHANGE: ...\n\nResolves: #3, Resolves: #4";
        let msg = parse(raw).unwrap();
        assert_eq!(msg.breaking_change.as_deref(), Some("..."));
        assert_eq!(msg.footer_references.len(), 2);
        assert_eq!(msg.footer_references[0].issue_number, 3);
        assert_eq!(msg.footer_references[1].issue_number, 4);
        assert!(msg.footer_references.iter().all(|r| r.resolves));
    }

    #[test]
    fn test_parse_breaking_paragraph() {
        let raw = "feat: drop v1 endpoints\n\nBREAKING CHANGE: the v1 API\nis gone.\n\nMigrate to v2 before upgrading.";
        let msg = parse(raw).unwrap();
        assert_eq!(msg.breaking_change.as_deref(), Some("the v1 API\nis gone."));
        assert!(msg.body.as_deref().unwrap().starts_with(BREAKING_CHANGE_MARKER));
    }

    #[test]
    fn test_parse_breaking_marker_not_leading() {
        let raw = format!("feat: add thing\n\n{BODY}\n\nBREAKING CHANGE: later");
        let msg = parse(&raw).unwrap();
        assert!(!msg.is_breaking());
    }

    #[test]
    fn test_parse_bang_marks_breaking() {
        let msg = parse(&format!("feat(api)!: redesign endpoint\n\n{BODY}")).unwrap();
        assert_eq!(msg.breaking_change.as_deref(), Some("redesign endpoint"));
    }

    #[test]
    fn test_parse_bare_references() {
        let raw = format!("fix: handle empty input\n\n{BODY}\n\n#12, #13\nResolves: #14");
        let msg = parse(&raw).unwrap();
        assert_eq!(msg.body.as_deref(), Some(BODY));
        assert_eq!(
            msg.footer_references,
            vec![
                FooterReference { issue_number: 12, resolves: false },
                FooterReference { issue_number: 13, resolves: false },
                FooterReference { issue_number: 14, resolves: true },
            ]
        );
    }

    #[test]
    fn test_parse_footer_line_directly_after_body() {
        let raw = format!("fix: handle empty input\n\n{BODY}\nResolves: #7");
        let msg = parse(&raw).unwrap();
        assert_eq!(msg.body.as_deref(), Some(BODY));
        assert_eq!(msg.footer_references.len(), 1);
    }

    #[test]
    fn test_parse_invalid_resolves_segment() {
        let raw = format!("fix: handle empty input\n\n{BODY}\n\nResolves: #abc, #0");
        let msg = parse(&raw).unwrap();
        assert_eq!(msg.invalid_references, vec!["Resolves: #abc".to_string()]);
        assert_eq!(
            msg.footer_references,
            vec![FooterReference { issue_number: 0, resolves: true }]
        );
    }

    #[test]
    fn test_parse_hash_in_prose_stays_in_body() {
        let raw = "fix: handle empty input\n\nThe fix for #12 was incomplete, see the report.";
        let msg = parse(raw).unwrap();
        assert!(msg.footer_references.is_empty());
        assert!(msg.body.as_deref().unwrap().contains("#12"));
    }

    #[test]
    fn test_parse_revert_hash() {
        let raw = "revert: undo cache layer\n\nThis reverts commit 1a2b3c4d5e6f.";
        let msg = parse(raw).unwrap();
        assert!(msg.is_revert);
        assert_eq!(msg.reverted_commit.as_deref(), Some("1a2b3c4d5e6f"));
    }

    #[test]
    fn test_parse_crlf() {
        let raw = format!("fix: handle crlf\r\n\r\n{BODY}\r\n");
        let msg = parse(&raw).unwrap();
        assert_eq!(msg.body.as_deref(), Some(BODY));
    }

    #[test]
    fn test_parse_docs_without_body() {
        let msg = parse("docs: fix typo in guide").unwrap();
        assert_eq!(msg.r#type, CommitType::Docs);
        assert_eq!(msg.body, None);
    }

    #[test]
    fn test_parse_empty_body() {
        assert_eq!(parse("fix: add check"), Err(ParseError::EmptyBody));
        assert_eq!(
            parse("fix: add check\n\nResolves: #1"),
            Err(ParseError::EmptyBody)
        );
    }

    #[test]
    fn test_parse_malformed_headers() {
        let cases = [
            "",
            "   \n\nbody",
            "add login without type",
            ": missing type",
            "Feat: capitalised type",
            "feat:no space",
            "feat: ",
            "feat(): empty scope",
            "feat(auth) add login",
        ];
        for raw in cases {
            assert!(
                matches!(parse(raw), Err(ParseError::MalformedHeader(_))),
                "expected MalformedHeader for {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_parse_blank_header_line() {
        assert_eq!(
            parse("\nfix: add check\n\nThe parser crashed on empty files."),
            Err(ParseError::malformed("header line is blank"))
        );
        assert_eq!(
            parse("  \n"),
            Err(ParseError::malformed("commit message is empty"))
        );
    }

    #[test]
    fn test_parse_revert_hash_followed_by_word_chars() {
        let raw = "revert: undo cache layer\n\nThis reverts commit abcdef1zz in the history.";
        assert_eq!(parse(raw).unwrap().reverted_commit.as_deref(), Some("abcdef1"));
    }

    #[test]
    fn test_parse_requires_blank_line_after_header() {
        let err = parse(&format!("fix: add check\n{BODY}")).unwrap_err();
        assert!(matches!(err, ParseError::MalformedHeader(_)));
    }
}

//! Reading commit messages from files and standard input.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use crate::error::{CommitCheckError, Result};

const SCISSORS: &str = "# ------------------------ >8 ------------------------";

/// Where messages come from and how they are delimited
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputOptions {
    pub files: Vec<PathBuf>,
    pub stdin: bool,
    /// Messages separated by NUL bytes (`git log -z --format=%B`)
    pub nul_separated: bool,
    /// Drop git comment lines and everything below a scissors line
    pub strip_comments: bool,
}

/// Splits input text into messages, dropping blank entries
pub fn split_messages(text: &str, nul_separated: bool) -> Vec<String> {
    if nul_separated {
        text.split('\0')
            .filter(|m| !m.trim().is_empty())
            .map(str::to_string)
            .collect()
    } else if text.trim().is_empty() {
        Vec::new()
    } else {
        vec![text.to_string()]
    }
}

/// Removes the comment lines git places in an edited message. A `#` must be
/// followed by a space or end the line, so `#12` references survive.
pub fn strip_git_comments(message: &str) -> String {
    message
        .lines()
        .take_while(|line| *line != SCISSORS)
        .filter(|line| *line != "#" && !line.starts_with("# "))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reads every message named by the options, files first, then stdin
pub fn read_messages(options: &InputOptions) -> Result<Vec<String>> {
    if options.files.is_empty() && !options.stdin {
        return Err(CommitCheckError::input(
            "no input: pass message files or --stdin",
        ));
    }

    let mut messages = Vec::new();
    for path in &options.files {
        let text = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "read message file");
        messages.extend(split_messages(&text, options.nul_separated));
    }

    if options.stdin {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        messages.extend(split_messages(&text, options.nul_separated));
    }

    if options.strip_comments {
        messages = messages.iter().map(|m| strip_git_comments(m)).collect();
    }

    Ok(messages)
}

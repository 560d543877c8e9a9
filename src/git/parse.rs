//! Git output parsing functions
//!
//! Each parser classifies one line explicitly instead of silently filtering:
//! a line is a branch, something to skip (blank lines, symbolic refs, other
//! remotes), or malformed.

use super::{Branch, GitError, LogEntry};

/// Symbolic-ref marker in `git branch -r` output (`origin/HEAD -> origin/main`)
const SYMREF_ARROW: &str = " -> ";

/// Outcome of parsing one line of branch-listing output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Branch(Branch),
    Skip,
    Malformed(String),
}

/// Parse one line of `git branch` output.
///
/// `* ` marks the current branch, `+ ` a branch checked out in another
/// worktree. Parenthesized entries (`(HEAD detached at 1a2b3c4)`,
/// `(no branch, rebasing dev)`) are not branches and are skipped.
pub fn parse_local_line(line: &str) -> ParsedLine {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ParsedLine::Skip;
    }

    let (name, is_current) = if let Some(rest) = trimmed.strip_prefix("* ") {
        (rest.trim(), true)
    } else if let Some(rest) = trimmed.strip_prefix("+ ") {
        (rest.trim(), false)
    } else {
        (trimmed, false)
    };

    if name.starts_with('(') && name.ends_with(')') {
        return ParsedLine::Skip;
    }
    // `*` cannot appear in a ref name; a bare marker means the name is missing
    if !is_valid_ref_name(name) || name.contains('*') {
        return ParsedLine::Malformed(line.to_string());
    }

    ParsedLine::Branch(Branch::local(name, is_current))
}

/// Parse one line of `git branch -r` output for the given remote.
///
/// Symbolic refs (`origin/HEAD -> origin/main`) are skipped, as are branches
/// of other remotes. The returned branch keeps the full ref as its name.
pub fn parse_remote_line(line: &str, remote: &str) -> ParsedLine {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.contains(SYMREF_ARROW) {
        return ParsedLine::Skip;
    }
    if trimmed.contains("->") || !is_valid_ref_name(trimmed) {
        return ParsedLine::Malformed(line.to_string());
    }

    let prefix = format!("{remote}/");
    match trimmed.strip_prefix(&prefix) {
        Some("") => ParsedLine::Malformed(line.to_string()),
        Some("HEAD") | None => ParsedLine::Skip,
        Some(short) => ParsedLine::Branch(Branch::remote(trimmed, short)),
    }
}

fn is_valid_ref_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(char::is_whitespace)
}

/// Strip `<remote>/` from a ref if present.
pub(crate) fn strip_remote_prefix<'a>(name: &'a str, remote: &str) -> &'a str {
    name.strip_prefix(remote)
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(name)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultBranchName(String);

impl DefaultBranchName {
    /// Parse `git rev-parse --abbrev-ref <remote>/HEAD` output.
    pub(crate) fn from_local(remote: &str, output: &str) -> Result<Self, GitError> {
        let trimmed = output.trim();

        let branch = strip_remote_prefix(trimmed, remote);

        // An unset symref resolves to the literal ref name
        if branch.is_empty() || branch == "HEAD" || branch == format!("{remote}/HEAD") {
            return Err(GitError::ParseError {
                message: format!("Empty branch name from {remote}/HEAD"),
            });
        }

        Ok(Self(branch.to_string()))
    }

    pub(crate) fn into_string(self) -> String {
        self.0
    }
}

/// Parse one line of `git log --format=%h%x09%D%x09%s`.
///
/// The origin column is the first decoration ref (with `HEAD -> ` and `tag: `
/// stripped), or `default_origin` for undecorated commits. Returns `None` for
/// blank and malformed lines; malformed ones are logged.
pub fn parse_log_line(line: &str, default_origin: &str) -> Option<LogEntry> {
    if line.trim().is_empty() {
        return None;
    }

    let mut parts = line.splitn(3, '\t');
    let (Some(hash), Some(decoration), Some(message)) = (parts.next(), parts.next(), parts.next())
    else {
        log::warn!("Skipping malformed log line: {line:?}");
        return None;
    };
    let hash = hash.trim();
    if hash.is_empty() {
        log::warn!("Skipping log line without hash: {line:?}");
        return None;
    }

    let origin = decoration
        .split(", ")
        .map(|r| r.trim())
        .map(|r| r.strip_prefix("HEAD -> ").unwrap_or(r))
        .map(|r| r.strip_prefix("tag: ").unwrap_or(r))
        .find(|r| !r.is_empty() && *r != "HEAD")
        .unwrap_or(default_origin);

    Some(LogEntry {
        hash: hash.to_string(),
        origin: origin.to_string(),
        message: message.trim_end().to_string(),
    })
}

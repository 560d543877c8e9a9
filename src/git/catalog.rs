//! The switchable-branch catalog.

use std::collections::HashSet;

use super::parse::strip_remote_prefix;
use super::{
    Branch, CommandRunner, GitError, ParsedLine, Repository, parse_local_line, parse_remote_line,
};

/// De-duplicated, classified view of the branches one can switch to.
///
/// Local branches come first, then remote-only branches, each group in the
/// order git listed them. A remote branch whose short name matches a local
/// branch is dropped rather than merged, and the current branch is never
/// offered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchCatalog {
    branches: Vec<Branch>,
    current: Option<String>,
    remote: String,
}

impl BranchCatalog {
    /// Build the catalog from raw `git branch` and `git branch -r` lines.
    pub fn build<L, R>(local_lines: L, remote_lines: R, remote: &str) -> Self
    where
        L: IntoIterator,
        L::Item: AsRef<str>,
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        let mut seen: HashSet<String> = HashSet::new();
        let mut current = None;

        let mut locals = Vec::new();
        for line in local_lines {
            match parse_local_line(line.as_ref()) {
                ParsedLine::Branch(branch) => {
                    if !seen.insert(branch.name.clone()) {
                        continue;
                    }
                    if branch.is_current {
                        current = Some(branch.name.clone());
                    }
                    locals.push(branch);
                }
                ParsedLine::Skip => {}
                ParsedLine::Malformed(line) => {
                    log::warn!("Ignoring malformed local branch line: {line:?}");
                }
            }
        }

        let mut remotes = Vec::new();
        for line in remote_lines {
            match parse_remote_line(line.as_ref(), remote) {
                ParsedLine::Branch(branch) => {
                    if seen.insert(branch.short_name().to_string()) {
                        remotes.push(branch);
                    } else {
                        log::debug!("Hiding {}: a local branch has the same name", branch.name);
                    }
                }
                ParsedLine::Skip => {}
                ParsedLine::Malformed(line) => {
                    log::warn!("Ignoring malformed remote branch line: {line:?}");
                }
            }
        }

        let branches = locals
            .into_iter()
            .chain(remotes)
            .filter(|branch| !branch.is_current)
            .collect();

        Self {
            branches,
            current,
            remote: remote.to_string(),
        }
    }

    /// List branches through `repo` and build the catalog.
    ///
    /// A failed local listing is fatal. A failed remote listing yields a
    /// local-only catalog plus the error, for the caller to report.
    pub fn load<C: CommandRunner>(
        repo: &Repository<C>,
        remote: &str,
    ) -> anyhow::Result<(Self, Option<GitError>)> {
        let local_lines = repo.local_branch_lines()?;
        let (remote_lines, remote_error) = match repo.remote_branch_lines() {
            Ok(lines) => (lines, None),
            Err(e) => (Vec::new(), Some(e.downcast::<GitError>()?)),
        };
        let catalog = Self::build(&local_lines, &remote_lines, remote);
        log::debug!(
            "{} switchable branches (current: {})",
            catalog.len(),
            catalog.current().unwrap_or("none")
        );
        Ok((catalog, remote_error))
    }

    /// Switchable branches, in catalog order.
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    /// The branch marked current in the local listing, if any.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Whether `query` names the current branch, with or without the remote
    /// prefix (`origin/main` while on `main`).
    pub fn is_current(&self, query: &str) -> bool {
        self.current().is_some_and(|current| {
            current == query || current == strip_remote_prefix(query, &self.remote)
        })
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Look up a switch target by name.
    ///
    /// Tries the exact `name` first, then the short name (`feature-x` finds
    /// `origin/feature-x`), then the query with the remote prefix stripped
    /// (`origin/dev` finds local `dev`).
    pub fn find(&self, query: &str) -> Option<&Branch> {
        let stripped = strip_remote_prefix(query, &self.remote);
        self.branches
            .iter()
            .find(|b| b.name == query)
            .or_else(|| self.branches.iter().find(|b| b.short_name() == query))
            .or_else(|| self.branches.iter().find(|b| b.short_name() == stripped))
    }
}

//! Switch-target resolution.
//!
//! [`SwitchResolver::resolve`] is pure: it maps a catalog entry to the
//! checkout that lands on a named local branch. Upstream discovery asks the
//! repository which default branch exists, in a fixed order.

use std::borrow::Cow;
use std::fmt;

use shell_escape::unix::escape;

use super::{Branch, CommandRunner, DEFAULT_BRANCH_CANDIDATES, GitRunner, Repository};

/// Render `git <args>` the way a user would type it.
fn command_line(args: &[&str]) -> String {
    let mut line = String::from("git");
    for arg in args {
        line.push(' ');
        line.push_str(&escape(Cow::Borrowed(*arg)));
    }
    line
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutCommand {
    /// `git checkout <name>`
    Plain(String),
    /// `git checkout -b <local> --track <remote_ref>`
    ///
    /// A bare checkout of a remote ref would detach HEAD instead of landing on
    /// a named branch.
    CreateTracking { local: String, remote_ref: String },
}

impl CheckoutCommand {
    pub fn args(&self) -> Vec<&str> {
        match self {
            Self::Plain(name) => vec!["checkout", name],
            Self::CreateTracking { local, remote_ref } => {
                vec!["checkout", "-b", local, "--track", remote_ref]
            }
        }
    }

    /// The local branch checked out once this command has run.
    pub fn local_branch(&self) -> &str {
        match self {
            Self::Plain(name) => name,
            Self::CreateTracking { local, .. } => local,
        }
    }
}

impl fmt::Display for CheckoutCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&command_line(&self.args()))
    }
}

/// Rebase `branch` onto `upstream`, a remote-tracking ref such as `origin/main`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebaseTarget {
    pub branch: String,
    pub upstream: String,
}

impl RebaseTarget {
    pub fn args(&self) -> Vec<&str> {
        vec!["rebase", &self.upstream]
    }
}

impl fmt::Display for RebaseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&command_line(&self.args()))
    }
}

/// Why no rebase follows the switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Neither `main`, `master`, nor the remote's HEAD pointer gave a target.
    Undeterminable,
    /// The switched-to branch is the default branch itself.
    AlreadyOnTarget { target: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undeterminable => f.write_str("could not determine main branch"),
            Self::AlreadyOnTarget { target } => write!(f, "already on {target}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamTarget {
    Rebase(RebaseTarget),
    Skip(SkipReason),
}

/// What `gitaddons switch` will run for one selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAction {
    pub checkout: CheckoutCommand,
    pub post_switch_rebase: Option<RebaseTarget>,
}

pub struct SwitchResolver<'a, R = GitRunner> {
    repo: &'a Repository<R>,
    remote: &'a str,
}

impl<'a, R: CommandRunner> SwitchResolver<'a, R> {
    pub fn new(repo: &'a Repository<R>, remote: &'a str) -> Self {
        Self { repo, remote }
    }

    pub fn resolve(&self, selected: &Branch) -> CheckoutCommand {
        if selected.is_remote_only() {
            CheckoutCommand::CreateTracking {
                local: selected.short_name().to_string(),
                remote_ref: selected.name.clone(),
            }
        } else {
            CheckoutCommand::Plain(selected.short_name().to_string())
        }
    }

    /// Decide what `current` should be rebased onto.
    ///
    /// The upstream is always the remote-tracking ref of the default branch,
    /// never the local copy, so the rebase sees the latest fetched state.
    pub fn resolve_upstream_target(&self, current: &str) -> anyhow::Result<UpstreamTarget> {
        let Some(target) = self.discover_default_branch()? else {
            return Ok(UpstreamTarget::Skip(SkipReason::Undeterminable));
        };

        if target == current {
            return Ok(UpstreamTarget::Skip(SkipReason::AlreadyOnTarget { target }));
        }

        Ok(UpstreamTarget::Rebase(RebaseTarget {
            branch: current.to_string(),
            upstream: format!("{}/{target}", self.remote),
        }))
    }

    /// Resolve the checkout, and the rebase too when `rebase` is set.
    ///
    /// The skip reason is returned alongside so callers can report it.
    pub fn plan(
        &self,
        selected: &Branch,
        rebase: bool,
    ) -> anyhow::Result<(ResolvedAction, Option<SkipReason>)> {
        let checkout = self.resolve(selected);

        let (post_switch_rebase, skipped) = if rebase {
            match self.resolve_upstream_target(checkout.local_branch())? {
                UpstreamTarget::Rebase(target) => (Some(target), None),
                UpstreamTarget::Skip(reason) => (None, Some(reason)),
            }
        } else {
            (None, None)
        };

        Ok((
            ResolvedAction {
                checkout,
                post_switch_rebase,
            },
            skipped,
        ))
    }

    fn discover_default_branch(&self) -> anyhow::Result<Option<String>> {
        for candidate in DEFAULT_BRANCH_CANDIDATES {
            if self.repo.local_branch_exists(candidate)? {
                return Ok(Some(candidate.to_string()));
            }
        }
        self.repo.remote_default_branch(self.remote)
    }
}

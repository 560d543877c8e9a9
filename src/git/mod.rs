//! Git operations and branch reconciliation
//!
//! Raw `git branch` / `git branch -r` text flows one way:
//!
//! ```text
//! Repository::local_branch_lines / remote_branch_lines
//!   │
//!   ▼
//! BranchCatalog::build     (classify, dedup, drop the current branch)
//!   │
//!   ▼
//! SwitchResolver           (checkout command + optional rebase target)
//!   │
//!   ▼
//! Repository::checkout / rebase
//! ```

// Submodules
mod catalog;
mod error;
mod parse;
mod repository;
mod resolve;
mod runner;


// Re-exports from submodules
pub use catalog::BranchCatalog;
pub use error::GitError;
pub use parse::{ParsedLine, parse_local_line, parse_log_line, parse_remote_line};
pub use repository::{Repository, set_base_path};
pub use resolve::{
    CheckoutCommand, RebaseTarget, ResolvedAction, SkipReason, SwitchResolver, UpstreamTarget,
};
pub use runner::{CommandOutput, CommandRunner, GitRunner};

pub(crate) use parse::DefaultBranchName;

/// Remote used when none is configured
pub const DEFAULT_REMOTE: &str = "origin";

/// Branches tried, in order, before falling back to `<remote>/HEAD`
pub const DEFAULT_BRANCH_CANDIDATES: [&str; 2] = ["main", "master"];

/// One ref known to the branch catalog.
///
/// `name` is the identity: the local name for local branches (`main`), the
/// full remote ref for remote-only branches (`origin/feature-x`). A branch
/// with a local counterpart is always local-only here; its remote duplicate
/// never makes it into the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub name: String,
    pub is_local: bool,
    pub is_remote: bool,
    pub is_current: bool,
    short_name: String,
}

impl Branch {
    pub fn local(name: impl Into<String>, is_current: bool) -> Self {
        let name = name.into();
        Self {
            short_name: name.clone(),
            name,
            is_local: true,
            is_remote: false,
            is_current,
        }
    }

    /// A remote-only branch. `full_ref` keeps the remote prefix (`origin/x`),
    /// `short_name` does not (`x`).
    pub fn remote(full_ref: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            name: full_ref.into(),
            is_local: false,
            is_remote: true,
            is_current: false,
            short_name: short_name.into(),
        }
    }

    /// Name without the remote prefix. Equal to `name` for local branches.
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn is_remote_only(&self) -> bool {
        self.is_remote && !self.is_local
    }

    /// Human-facing label. Never used for identity.
    pub fn display_name(&self) -> String {
        if self.is_current {
            format!("{} (current)", self.name)
        } else if self.is_remote_only() {
            format!("{} (remote)", self.short_name)
        } else {
            self.name.clone()
        }
    }
}

/// One commit row for `gitaddons who`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Abbreviated commit hash
    pub hash: String,
    /// First ref decorating the commit, or the remote name when undecorated
    pub origin: String,
    /// Commit subject
    pub message: String,
}

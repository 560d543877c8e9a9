//! gitaddons error types and formatting
//!
//! - **`GitError`** - A typed enum for domain errors that can be pattern-matched
//!   and tested. Use `.into()` to convert to `anyhow::Error` while preserving the
//!   type for pattern matching. Display produces styled output for users.

use std::path::PathBuf;

use color_print::cformat;

use crate::styling::{error_message, format_with_gutter, hint_message, warning_message};

/// Domain errors for branch listing, switching, and history lookup.
///
/// Each variant stores the data needed to construct a user-facing message.
///
/// ```ignore
/// return Err(GitError::BranchNotFound { branch: "feature".into() }.into());
///
/// if let Some(GitError::CheckoutFailed { .. }) = err.downcast_ref() {
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub enum GitError {
    /// The working directory is not inside a git work tree.
    NotARepository {
        path: PathBuf,
    },
    /// The `git` executable could not be spawned at all.
    GitUnavailable {
        error: String,
    },
    /// `git branch` failed; nothing can be listed without it.
    BranchListingFailed {
        error: String,
    },
    /// `git fetch` failed. Recoverable: callers warn and continue.
    FetchFailed {
        remote: String,
        error: String,
    },
    BranchNotFound {
        branch: String,
    },
    CheckoutFailed {
        command: String,
        error: String,
    },
    /// The post-switch rebase stopped. `git_output` holds `git status` for display.
    RebaseConflict {
        branch: String,
        upstream: String,
        git_output: String,
    },
    /// `git rebase` refused to start (bad upstream, dirty tree). No rebase is
    /// in progress; `error` is git's own message.
    RebaseFailed {
        branch: String,
        upstream: String,
        error: String,
    },
    ParseError {
        message: String,
    },
    CommandFailed {
        command: String,
        error: String,
    },
}

impl std::error::Error for GitError {}

impl std::fmt::Display for GitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GitError::NotARepository { path } => {
                let path = path.display();
                write!(
                    f,
                    "{}\n{}",
                    error_message(cformat!("Not a git repository: <bold>{path}</>")),
                    hint_message(cformat!(
                        "Run from inside a repository, or pass <bright-black>-C PATH</>"
                    ))
                )
            }

            GitError::GitUnavailable { error } => {
                write!(
                    f,
                    "{}\n{}",
                    error_message(format!("Could not run git: {error}")),
                    hint_message("Check that git is installed and on PATH")
                )
            }

            GitError::BranchListingFailed { error } => {
                write!(f, "{}", error_message("Could not list local branches"))?;
                write_details(f, error)
            }

            GitError::FetchFailed { remote, error } => {
                write!(
                    f,
                    "{}",
                    error_message(cformat!("Could not fetch from <bold>{remote}</>"))
                )?;
                write_details(f, error)
            }

            GitError::BranchNotFound { branch } => {
                write!(
                    f,
                    "{}\n{}",
                    error_message(cformat!("No branch named <bold>{branch}</>")),
                    hint_message(cformat!(
                        "To pick from the available branches, run <bright-black>gitaddons switch</>"
                    ))
                )
            }

            GitError::CheckoutFailed { command, error } => {
                write!(
                    f,
                    "{}",
                    error_message(cformat!("Checkout failed: <bright-black>{command}</>"))
                )?;
                write_details(f, error)
            }

            GitError::RebaseConflict {
                branch,
                upstream,
                git_output,
            } => {
                write!(
                    f,
                    "{}",
                    error_message(cformat!(
                        "Rebase of <bold>{branch}</> onto <bold>{upstream}</> incomplete"
                    ))
                )?;
                write_details(f, git_output)?;
                write!(
                    f,
                    "\n{}\n{}",
                    hint_message(cformat!(
                        "To continue after resolving conflicts, run <bright-black>git rebase --continue</>"
                    )),
                    hint_message(cformat!("To abort, run <bright-black>git rebase --abort</>"))
                )
            }

            GitError::RebaseFailed {
                branch,
                upstream,
                error,
            } => {
                write!(
                    f,
                    "{}",
                    warning_message(cformat!(
                        "Could not rebase <bold>{branch}</> onto <bold>{upstream}</>; branch left as checked out"
                    ))
                )?;
                write_details(f, error)
            }

            GitError::ParseError { message } => {
                write!(f, "{}", error_message(message))
            }

            GitError::CommandFailed { command, error } => {
                write!(
                    f,
                    "{}",
                    error_message(cformat!("Command failed: <bright-black>{command}</>"))
                )?;
                write_details(f, error)
            }
        }
    }
}

/// Append external command output in a gutter, if there is any.
fn write_details(f: &mut std::fmt::Formatter<'_>, details: &str) -> std::fmt::Result {
    if details.trim().is_empty() {
        Ok(())
    } else {
        write!(f, "\n{}", format_with_gutter(details))
    }
}

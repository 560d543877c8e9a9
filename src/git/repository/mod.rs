use std::path::PathBuf;
use std::sync::OnceLock;

use super::{
    CheckoutCommand, CommandOutput, CommandRunner, DefaultBranchName, GitError, GitRunner,
    LogEntry, RebaseTarget, parse_log_line,
};

/// Global base path for repository operations, set by -C flag
static BASE_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Initialize the global base path for repository operations.
///
/// This should be called once at program startup from main().
/// If not called, defaults to "." (current directory).
pub fn set_base_path(path: PathBuf) {
    BASE_PATH.set(path).ok();
}

fn base_path() -> &'static PathBuf {
    static DEFAULT: OnceLock<PathBuf> = OnceLock::new();
    BASE_PATH
        .get()
        .unwrap_or_else(|| DEFAULT.get_or_init(|| PathBuf::from(".")))
}

/// Repository context for git operations.
///
/// Every query goes through the repository's [`CommandRunner`], and every
/// failure is translated into a [`GitError`] here, at the point of invocation.
/// Callers branch on the variant, never on stderr text.
///
/// # Examples
///
/// ```no_run
/// use gitaddons::git::Repository;
///
/// let repo = Repository::current();
/// repo.ensure_work_tree()?;
/// let lines = repo.local_branch_lines()?;
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug)]
pub struct Repository<R = GitRunner> {
    path: PathBuf,
    runner: R,
}

impl Repository {
    /// Create a repository context at the specified path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            runner: GitRunner::new(path.clone()),
            path,
        }
    }

    /// Create a repository context for the current directory.
    ///
    /// If the -C flag was used, this uses that path instead.
    pub fn current() -> Self {
        Self::at(base_path().clone())
    }
}

impl<R: CommandRunner> Repository<R> {
    pub fn with_runner(path: impl Into<PathBuf>, runner: R) -> Self {
        Self {
            path: path.into(),
            runner,
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run git and capture its output, whatever the exit status.
    fn output(&self, args: &[&str]) -> anyhow::Result<CommandOutput> {
        let output = self
            .runner
            .run(args)
            .map_err(|e| GitError::GitUnavailable {
                error: e.to_string(),
            })?;

        if !output.success {
            for line in output.stderr.trim().lines() {
                log::debug!("  ! {}", line);
            }
        }
        Ok(output)
    }

    /// Run a git command and return its stdout.
    ///
    /// A non-zero exit becomes [`GitError::CommandFailed`].
    pub fn run_command(&self, args: &[&str]) -> anyhow::Result<String> {
        let output = self.output(args)?;
        if !output.success {
            return Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                error: failure_text(&output),
            }
            .into());
        }
        Ok(output.stdout)
    }

    /// Run a git command and report only whether it exited zero.
    pub fn run_command_check(&self, args: &[&str]) -> anyhow::Result<bool> {
        Ok(self.output(args)?.success)
    }

    /// Fail with [`GitError::NotARepository`] unless inside a work tree.
    pub fn ensure_work_tree(&self) -> anyhow::Result<()> {
        let output = self.output(&["rev-parse", "--is-inside-work-tree"])?;
        if output.success && output.stdout.trim() == "true" {
            Ok(())
        } else {
            Err(GitError::NotARepository {
                path: self.path.clone(),
            }
            .into())
        }
    }

    pub fn fetch(&self, remote: &str) -> anyhow::Result<()> {
        let output = self.output(&["fetch", remote])?;
        if output.success {
            Ok(())
        } else {
            Err(GitError::FetchFailed {
                remote: remote.to_string(),
                error: failure_text(&output),
            }
            .into())
        }
    }

    /// Raw `git branch` lines. Failure is [`GitError::BranchListingFailed`].
    pub fn local_branch_lines(&self) -> anyhow::Result<Vec<String>> {
        let output = self.output(&["branch", "--no-color"])?;
        if !output.success {
            return Err(GitError::BranchListingFailed {
                error: failure_text(&output),
            }
            .into());
        }
        Ok(lines(&output.stdout))
    }

    /// Raw `git branch -r` lines.
    pub fn remote_branch_lines(&self) -> anyhow::Result<Vec<String>> {
        let stdout = self.run_command(&["branch", "-r", "--no-color"])?;
        Ok(lines(&stdout))
    }

    pub fn local_branch_exists(&self, name: &str) -> anyhow::Result<bool> {
        let reference = format!("refs/heads/{name}");
        self.run_command_check(&["rev-parse", "--verify", "--quiet", &reference])
    }

    /// The branch `<remote>/HEAD` points at, without the remote prefix.
    ///
    /// `None` when the symbolic ref is unset or unreadable.
    pub fn remote_default_branch(&self, remote: &str) -> anyhow::Result<Option<String>> {
        let symref = format!("{remote}/HEAD");
        let output = self.output(&["rev-parse", "--abbrev-ref", &symref])?;
        if !output.success {
            return Ok(None);
        }
        match DefaultBranchName::from_local(remote, &output.stdout) {
            Ok(name) => Ok(Some(name.into_string())),
            Err(e) => {
                log::debug!("Ignoring {symref}: {}", anstream::adapter::strip_str(&e.to_string()));
                Ok(None)
            }
        }
    }

    pub fn checkout(&self, command: &CheckoutCommand) -> anyhow::Result<()> {
        let output = self.output(&command.args())?;
        if output.success {
            Ok(())
        } else {
            Err(GitError::CheckoutFailed {
                command: command.to_string(),
                error: failure_text(&output),
            }
            .into())
        }
    }

    /// Run the rebase. Nothing is aborted or resolved on the user's behalf.
    ///
    /// A rebase that stopped part way becomes [`GitError::RebaseConflict`]
    /// carrying `git status`; one that never started becomes
    /// [`GitError::RebaseFailed`] carrying git's error.
    pub fn rebase(&self, target: &RebaseTarget) -> anyhow::Result<()> {
        let output = self.output(&target.args())?;
        if output.success {
            return Ok(());
        }

        if !self.rebase_in_progress()? {
            return Err(GitError::RebaseFailed {
                branch: target.branch.clone(),
                upstream: target.upstream.clone(),
                error: failure_text(&output),
            }
            .into());
        }

        let status = self.output(&["status"])?;
        let git_output = if status.success {
            status.stdout
        } else {
            failure_text(&output)
        };
        Err(GitError::RebaseConflict {
            branch: target.branch.clone(),
            upstream: target.upstream.clone(),
            git_output,
        }
        .into())
    }

    /// Whether a rebase state directory (`rebase-merge` or `rebase-apply`)
    /// exists in the git dir.
    pub fn rebase_in_progress(&self) -> anyhow::Result<bool> {
        for state_dir in ["rebase-merge", "rebase-apply"] {
            let stdout = self.run_command(&["rev-parse", "--git-path", state_dir])?;
            // Relative to the directory git ran in
            let path = self.path.join(stdout.trim());
            if path.exists() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// `git config user.name`, if set.
    pub fn user_name(&self) -> anyhow::Result<Option<String>> {
        let output = self.output(&["config", "user.name"])?;
        let name = output.stdout.trim();
        Ok((output.success && !name.is_empty()).then(|| name.to_string()))
    }

    /// Commit authors, newest first, each listed once.
    pub fn contributors(&self) -> anyhow::Result<Vec<String>> {
        let stdout = self.run_command(&["log", "--format=%an"])?;
        let mut authors: Vec<String> = Vec::new();
        for author in stdout.lines().map(str::trim).filter(|a| !a.is_empty()) {
            if !authors.iter().any(|seen| seen == author) {
                authors.push(author.to_string());
            }
        }
        Ok(authors)
    }

    /// Commits by `author` since `since`, newest first.
    ///
    /// Undecorated commits report `default_origin` as their origin.
    pub fn author_log(
        &self,
        author: &str,
        since: &str,
        default_origin: &str,
    ) -> anyhow::Result<Vec<LogEntry>> {
        let since = format!("--since={since}");
        let author = format!("--author={author}");
        let stdout = self.run_command(&["log", &since, &author, "--format=%h%x09%D%x09%s"])?;
        Ok(stdout
            .lines()
            .filter_map(|line| parse_log_line(line, default_origin))
            .collect())
    }
}

fn lines(stdout: &str) -> Vec<String> {
    stdout.lines().map(str::to_string).collect()
}

/// Error text for a failed command.
///
/// Some git commands print errors to stdout, so both streams are kept.
fn failure_text(output: &CommandOutput) -> String {
    // Git uses \r for progress updates
    let stderr = output.stderr.replace('\r', "\n");
    [stderr.trim(), output.stdout.trim()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

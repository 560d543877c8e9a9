//! Shared fixtures for integration tests.
//!
//! Every test gets its own temporary repository with an isolated git config,
//! fixed commit timestamps, and its own gitaddons config path, so tests never
//! read the developer's settings and can run in parallel.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Null device path, platform-appropriate.
///
/// Use this for GIT_CONFIG_SYSTEM to disable system config in tests.
#[cfg(windows)]
const NULL_DEVICE: &str = "NUL";
#[cfg(not(windows))]
const NULL_DEVICE: &str = "/dev/null";

/// Commit timestamp for every test commit (2025-01-01T00:00:00Z)
pub const TEST_DATE: &str = "2025-01-01T00:00:00Z";

/// Environment variables that would leak the caller's settings into a test.
const INHERITED_ENV: [&str; 6] = [
    "GITADDONS_REMOTE",
    "GITADDONS_FETCH",
    "GITADDONS_REBASE",
    "GITADDONS_WHO_SINCE",
    "RUST_LOG",
    "CLICOLOR_FORCE",
];

/// Configure a git command with isolated environment for testing.
///
/// Sets environment variables for:
/// - Isolated git config
/// - Deterministic commit timestamps
/// - Consistent locale settings
/// - No terminal prompts
pub fn configure_git_cmd(cmd: &mut Command, git_config_path: &Path) {
    cmd.env("GIT_CONFIG_GLOBAL", git_config_path);
    cmd.env("GIT_CONFIG_SYSTEM", NULL_DEVICE);
    cmd.env("GIT_AUTHOR_DATE", TEST_DATE);
    cmd.env("GIT_COMMITTER_DATE", TEST_DATE);
    cmd.env("LC_ALL", "C");
    cmd.env("LANG", "C");
    cmd.env("GIT_TERMINAL_PROMPT", "0");
}

fn check_git_status(output: &Output, command: &str) {
    assert!(
        output.status.success(),
        "git {command} failed:\nstdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

pub struct TestRepo {
    temp_dir: TempDir,
    root: PathBuf,
    git_config_path: PathBuf,
    test_config_path: PathBuf,
    remote: Option<PathBuf>,
}

impl TestRepo {
    /// A repository on `main` with one commit and no remote.
    pub fn new() -> Self {
        let repo = Self::empty();
        repo.commit_file("README.md", "# test\n", "Initial commit");
        repo
    }

    /// An initialized repository with no commits.
    pub fn empty() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("repo");
        std::fs::create_dir(&root).unwrap();
        let root = std::fs::canonicalize(&root).unwrap();

        let test_config_path = temp_dir.path().join("test-config.toml");
        let git_config_path = temp_dir.path().join("test-gitconfig");
        std::fs::write(
            &git_config_path,
            "[user]\n\tname = Test User\n\temail = test@example.com\n\
             [advice]\n\tmergeConflict = false\n\tresolveConflict = false\n\
             [init]\n\tdefaultBranch = main\n",
        )
        .unwrap();

        let repo = Self {
            temp_dir,
            root,
            git_config_path,
            test_config_path,
            remote: None,
        };
        repo.run_git(&["init", "-q"]);
        repo
    }

    pub fn root_path(&self) -> &Path {
        &self.root
    }

    /// A directory inside the temp dir that is not a repository.
    pub fn outside_path(&self) -> PathBuf {
        let dir = self.temp_dir.path().join("not-a-repo");
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    pub fn git_command(&self) -> Command {
        let mut cmd = Command::new("git");
        configure_git_cmd(&mut cmd, &self.git_config_path);
        cmd.current_dir(&self.root);
        cmd
    }

    pub fn run_git(&self, args: &[&str]) {
        let output = self.git_command().args(args).output().unwrap();
        check_git_status(&output, &args.join(" "));
    }

    fn run_git_in(&self, dir: &Path, args: &[&str]) {
        let mut cmd = Command::new("git");
        configure_git_cmd(&mut cmd, &self.git_config_path);
        let output = cmd.args(args).current_dir(dir).output().unwrap();
        check_git_status(&output, &args.join(" "));
    }

    /// Trimmed stdout of a git command that must succeed.
    pub fn git_output(&self, args: &[&str]) -> String {
        let output = self.git_command().args(args).output().unwrap();
        check_git_status(&output, &args.join(" "));
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Whether a git command exits zero.
    pub fn git_succeeds(&self, args: &[&str]) -> bool {
        self.git_command()
            .args(args)
            .output()
            .unwrap()
            .status
            .success()
    }

    pub fn commit_file(&self, path: &str, content: &str, message: &str) {
        std::fs::write(self.root.join(path), content).unwrap();
        self.run_git(&["add", path]);
        self.run_git(&["commit", "-q", "-m", message]);
    }

    pub fn current_branch(&self) -> String {
        self.git_output(&["branch", "--show-current"])
    }

    /// Create a bare `origin`, push `default_branch`, and point `origin/HEAD` at it.
    pub fn setup_remote(&mut self, default_branch: &str) {
        let remote_path = self.temp_dir.path().join("origin.git");
        std::fs::create_dir(&remote_path).unwrap();
        self.run_git_in(
            &remote_path,
            &["init", "--bare", "-q", "--initial-branch", default_branch],
        );
        let remote_path = std::fs::canonicalize(&remote_path).unwrap();

        self.run_git(&["remote", "add", "origin", remote_path.to_str().unwrap()]);
        self.run_git(&["push", "-q", "-u", "origin", default_branch]);
        self.run_git(&["remote", "set-head", "origin", default_branch]);
        self.remote = Some(remote_path);
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Create `name` on the remote only: branch, commit, push, delete locally.
    pub fn push_remote_branch(&self, name: &str) {
        assert!(self.has_remote(), "call setup_remote first");
        let current = self.current_branch();
        self.run_git(&["checkout", "-q", "-b", name]);
        self.commit_file(&format!("{name}.txt"), name, &format!("Add {name}"));
        self.run_git(&["push", "-q", "origin", name]);
        self.run_git(&["checkout", "-q", &current]);
        self.run_git(&["branch", "-q", "-D", name]);
    }

    pub fn write_config(&self, content: &str) {
        std::fs::write(&self.test_config_path, content).unwrap();
    }

    /// The `gitaddons` binary, run from the repository root.
    pub fn gitaddons(&self, args: &[&str]) -> Command {
        self.gitaddons_in(&self.root, args)
    }

    pub fn gitaddons_in(&self, dir: &Path, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_gitaddons"));
        configure_git_cmd(&mut cmd, &self.git_config_path);
        for key in INHERITED_ENV {
            cmd.env_remove(key);
        }
        cmd.env("GITADDONS_CONFIG_PATH", &self.test_config_path);
        cmd.args(args).current_dir(dir);
        cmd
    }
}

/// Captured output of a finished command.
pub struct Run {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

pub fn run(mut cmd: Command) -> Run {
    let output = cmd.output().unwrap();
    Run {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

/// Basic TestRepo fixture - a fresh repository on `main`.
#[rstest::fixture]
pub fn repo() -> TestRepo {
    TestRepo::new()
}

/// A repository whose `main` is pushed to a bare `origin`.
#[rstest::fixture]
pub fn repo_with_remote() -> TestRepo {
    let mut repo = TestRepo::new();
    repo.setup_remote("main");
    repo
}

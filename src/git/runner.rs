//! The command-runner seam.
//!
//! Everything that needs `git` output takes a [`CommandRunner`], so branch
//! resolution can be tested against scripted output instead of a real
//! repository.

use std::path::PathBuf;
use std::process::Command;

use crate::shell_exec;

/// Captured result of one external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

impl CommandOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            success: true,
        }
    }

    pub fn failure(stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            success: false,
        }
    }
}

/// Runs `git <args>` and reports what happened.
///
/// An `Err` means the command could not be started at all; a command that ran
/// and exited non-zero is an `Ok` with `success == false`.
pub trait CommandRunner {
    fn run(&self, args: &[&str]) -> std::io::Result<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, args: &[&str]) -> std::io::Result<CommandOutput> {
        (**self).run(args)
    }
}

/// Runs the real `git` binary in a fixed working directory.
#[derive(Debug, Clone)]
pub struct GitRunner {
    path: PathBuf,
}

impl GitRunner {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Short label for log lines: the directory name, or `.`.
    fn logging_context(&self) -> String {
        if self.path.to_str() == Some(".") {
            ".".to_string()
        } else {
            self.path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("?")
                .to_string()
        }
    }
}

impl CommandRunner for GitRunner {
    fn run(&self, args: &[&str]) -> std::io::Result<CommandOutput> {
        let mut cmd = Command::new("git");
        cmd.args(args);
        cmd.current_dir(&self.path);
        // Never block on a credential prompt in the middle of a pipeline
        cmd.env("GIT_TERMINAL_PROMPT", "0");

        let output = shell_exec::run(&mut cmd, Some(&self.logging_context()))?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            success: output.status.success(),
        })
    }
}

//! External command execution
//!
//! Every `git` invocation in gitaddons goes through [`run`], so each one is
//! logged with its arguments, working directory, duration, and exit status.
//!
//! ```text
//! $ git branch -r [repo]
//! [ga-trace] context=repo cmd="git branch -r" dur=4.1ms ok=true
//! ```

use std::process::{Command, Output};
use std::time::Instant;

/// Render a command as a single display string (`git checkout -b x`).
pub fn command_string(cmd: &Command) -> String {
    let program = cmd.get_program().to_string_lossy();
    let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy()).collect();
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

/// Execute a command with timing and debug logging.
///
/// The `context` parameter is typically the repository directory name for git commands.
pub fn run(cmd: &mut Command, context: Option<&str>) -> std::io::Result<Output> {
    let cmd_str = command_string(cmd);

    match context {
        Some(ctx) => log::debug!("$ {} [{}]", cmd_str, ctx),
        None => log::debug!("$ {}", cmd_str),
    }

    let t0 = Instant::now();
    let result = cmd.output();
    let duration_ms = t0.elapsed().as_secs_f64() * 1000.0;
    let context = context.map(|ctx| format!("context={ctx} ")).unwrap_or_default();

    match &result {
        Ok(output) => log::debug!(
            "[ga-trace] {}cmd=\"{}\" dur={:.1}ms ok={}",
            context,
            cmd_str,
            duration_ms,
            output.status.success()
        ),
        Err(e) => log::debug!(
            "[ga-trace] {}cmd=\"{}\" dur={:.1}ms err=\"{}\"",
            context,
            cmd_str,
            duration_ms,
            e
        ),
    }

    result
}

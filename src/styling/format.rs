//! Gutter formatting for quoted content.

use super::GUTTER;

/// Format multi-line content with a gutter on the left.
///
/// Used to quote output from external commands (e.g. `git status` after a
/// failed rebase) so it reads as separate from our own messages. Blank lines
/// keep their gutter; trailing blank lines are dropped.
///
/// ```
/// use gitaddons::styling::format_with_gutter;
///
/// print!("{}", format_with_gutter("On branch main\nnothing to commit"));
/// ```
pub fn format_with_gutter(content: &str) -> String {
    content
        .trim_end()
        .lines()
        .map(|line| format!("{GUTTER} {GUTTER:#} {}", line.trim_end()))
        .collect::<Vec<_>>()
        .join("\n")
}

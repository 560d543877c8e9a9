use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Color, Styles};
use clap::{Parser, Subcommand};

/// Custom styles for help output
fn help_styles() -> Styles {
    Styles::styled()
        .header(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .usage(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .literal(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Cyan))),
        )
        .placeholder(anstyle::Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
        .error(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .valid(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .invalid(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        )
}

#[derive(Parser)]
#[command(name = "gitaddons")]
#[command(about = "Interactive helpers on top of git", long_about = None)]
#[command(version)]
#[command(disable_help_subcommand = true)]
#[command(styles = help_styles())]
#[command(arg_required_else_help = true)]
#[command(after_long_help = "\
Getting started

  gitaddons switch               # Pick a branch, switch, rebase onto main
  gitaddons switch feature-x     # Switch without the picker
  gitaddons who                  # Your commits from the last week
  gitaddons who -T               # Pick the time range")]
pub(crate) struct Cli {
    /// Working directory for this command
    #[arg(
        short = 'C',
        global = true,
        value_name = "path",
        display_order = 100
    )]
    pub directory: Option<PathBuf>,

    /// User config file path
    #[arg(long, global = true, value_name = "path", display_order = 101)]
    pub config: Option<PathBuf>,

    /// Show debug logs (-vv for trace)
    #[arg(
        short,
        long,
        global = true,
        action = clap::ArgAction::Count,
        display_order = 102
    )]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Switch to a branch and rebase it onto the default branch
    #[command(after_long_help = "\
Remote-only branches are checked out as new local branches tracking the
remote. After switching, the branch is rebased onto the remote copy of the
default branch: main if it exists locally, else master, else whatever the
remote's HEAD points at.

A conflicting rebase is left in place for manual resolution.")]
    Switch {
        /// Branch to switch to
        ///
        /// Opens a picker when omitted. Remote-only branches can be named with
        /// or without the remote prefix.
        branch: Option<String>,

        /// Skip the rebase after switching
        #[arg(long)]
        no_rebase: bool,

        /// Print the commands instead of running them
        #[arg(long)]
        preview: bool,
    },

    /// Show an author's recent commits
    Who {
        /// Author to filter by [default: git config user.name]
        author: Option<String>,

        /// Pick the author from the repository's contributors
        #[arg(short = 't', long = "pick-author", conflicts_with = "author")]
        pick_author: bool,

        /// Pick the time range from a list
        #[arg(short = 'T', long = "pick-since", conflicts_with = "since")]
        pick_since: bool,

        /// Time range, in any format git log accepts [default: 1 week ago]
        #[arg(long, value_name = "RANGE")]
        since: Option<String>,
    },
}

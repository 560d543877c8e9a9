use std::io::Write;
use std::process;

use clap::Parser;
use gitaddons::config::{UserConfig, set_config_path};
use gitaddons::git::{GitError, set_base_path};
use gitaddons::styling::{eprintln, error_message};
use log::LevelFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{SwitchOptions, WhoOptions};

/// Warnings from every crate; `-v` turns on debug logs for gitaddons itself.
/// `RUST_LOG` is applied last and wins.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter_module("gitaddons", level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

fn run(command: Commands) -> anyhow::Result<()> {
    let config = UserConfig::load()?;

    match command {
        Commands::Switch {
            branch,
            no_rebase,
            preview,
        } => commands::handle_switch(
            &config,
            SwitchOptions {
                branch,
                rebase: config.rebase && !no_rebase,
                preview,
            },
        ),
        Commands::Who {
            author,
            pick_author,
            pick_since,
            since,
        } => commands::handle_who(
            &config,
            WhoOptions {
                author,
                pick_author,
                pick_since,
                since,
            },
        ),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(path) = cli.directory {
        set_base_path(path);
    }
    if let Some(path) = cli.config {
        set_config_path(path);
    }

    if let Err(e) = run(cli.command) {
        // GitError renders its own symbol, hints, and gutter
        if e.downcast_ref::<GitError>().is_some() {
            eprintln!("{e}");
        } else {
            eprintln!("{}", error_message(format!("{e:#}")));
        }
        process::exit(1);
    }
}

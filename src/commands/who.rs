//! `gitaddons who`

use color_print::cformat;
use gitaddons::config::UserConfig;
use gitaddons::git::{LogEntry, Repository};
use gitaddons::styling::{CELL, HASH, Table, eprintln, info_message, println};
use strum::IntoEnumIterator;

use super::picker::{self, Choice};

pub(crate) struct WhoOptions {
    pub author: Option<String>,
    pub pick_author: bool,
    pub pick_since: bool,
    pub since: Option<String>,
}

/// Time ranges offered by `who -T`, as `git log --since` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter)]
pub(crate) enum TimeRange {
    #[strum(serialize = "1 day ago")]
    Day,
    #[strum(serialize = "1 week ago")]
    Week,
    #[strum(serialize = "2 weeks ago")]
    TwoWeeks,
    #[strum(serialize = "1 month ago")]
    Month,
    #[strum(serialize = "3 months ago")]
    ThreeMonths,
    #[strum(serialize = "6 months ago")]
    SixMonths,
}

pub(crate) fn handle_who(config: &UserConfig, opts: WhoOptions) -> anyhow::Result<()> {
    let repo = Repository::current();
    repo.ensure_work_tree()?;

    let author = if opts.pick_author {
        let contributors = repo.contributors()?;
        let choices = contributors
            .into_iter()
            .map(|name| Choice::new(name.clone(), name))
            .collect();
        match picker::pick("author", choices)? {
            Some(author) => author,
            None => return Ok(()),
        }
    } else if let Some(author) = opts.author {
        author
    } else {
        repo.user_name()?.ok_or_else(|| {
            anyhow::anyhow!("No author given and git config user.name is not set")
        })?
    };

    let since = if opts.pick_since {
        let choices = TimeRange::iter()
            .map(|range| Choice::new(range.to_string(), range.to_string()))
            .collect();
        match picker::pick("since", choices)? {
            Some(since) => since,
            None => return Ok(()),
        }
    } else {
        opts.since.unwrap_or_else(|| config.who.since.clone())
    };

    let entries = repo.author_log(&author, &since, &config.remote)?;
    if entries.is_empty() {
        eprintln!(
            "{}",
            info_message(cformat!("No commits by <bold>{author}</> since {since}"))
        );
        return Ok(());
    }

    println!("{}", render_log_table(&entries));
    Ok(())
}

fn render_log_table(entries: &[LogEntry]) -> String {
    let mut table = Table::new(["Commit Hash", "Commit Message", "Origin"])
        .column_style(0, HASH)
        .column_style(2, CELL.bold());
    for entry in entries {
        table.push_row([
            entry.hash.as_str(),
            entry.message.as_str(),
            entry.origin.as_str(),
        ]);
    }
    table.render()
}

//! `gitaddons switch`

use color_print::cformat;
use gitaddons::config::UserConfig;
use gitaddons::git::{
    Branch, BranchCatalog, CheckoutCommand, CommandRunner, GitError, Repository, ResolvedAction,
    SkipReason, SwitchResolver,
};
use gitaddons::styling::{
    eprintln, info_message, println, progress_message, success_message, warning_message,
};

use super::picker::{self, Choice};

pub(crate) struct SwitchOptions {
    pub branch: Option<String>,
    pub rebase: bool,
    pub preview: bool,
}

pub(crate) fn handle_switch(config: &UserConfig, opts: SwitchOptions) -> anyhow::Result<()> {
    let repo = Repository::current();
    repo.ensure_work_tree()?;
    let remote = config.remote.as_str();

    // Preview stays read-only, so it works from whatever was fetched last
    if config.fetch && !opts.preview {
        fetch_remote(&repo, remote)?;
    }

    let catalog = build_catalog(&repo, remote)?;

    let selected = match opts.branch {
        Some(query) => {
            if let Some(current) = catalog.current()
                && catalog.is_current(&query)
            {
                eprintln!(
                    "{}",
                    info_message(cformat!("Already on <bold>{current}</>"))
                );
                return Ok(());
            }
            catalog
                .find(&query)
                .cloned()
                .ok_or(GitError::BranchNotFound { branch: query })?
        }
        None => {
            if catalog.is_empty() {
                eprintln!("{}", info_message("No other branches to switch to"));
                return Ok(());
            }
            match pick_branch(&catalog)? {
                Some(branch) => branch,
                None => return Ok(()),
            }
        }
    };

    let resolver = SwitchResolver::new(&repo, remote);
    let (action, skipped) = resolver.plan(&selected, opts.rebase)?;

    if opts.preview {
        print_preview(&action);
        if let Some(reason) = &skipped {
            report_skip(reason);
        }
        return Ok(());
    }

    execute(&repo, &action, skipped.as_ref())
}

/// Fetch `remote`. Failure only costs freshness, so it is a warning.
fn fetch_remote<R: CommandRunner>(repo: &Repository<R>, remote: &str) -> anyhow::Result<()> {
    eprintln!(
        "{}",
        progress_message(cformat!("Fetching <bold>{remote}</>..."))
    );
    match repo.fetch(remote) {
        Ok(()) => Ok(()),
        Err(e) => match e.downcast_ref::<GitError>() {
            Some(GitError::FetchFailed { error, .. }) => {
                log::debug!("git fetch {remote}: {error}");
                eprintln!(
                    "{}",
                    warning_message(cformat!(
                        "Could not fetch <bold>{remote}</>; remote branches may be stale"
                    ))
                );
                Ok(())
            }
            _ => Err(e),
        },
    }
}

/// Remote listing failure falls back to local branches only.
fn build_catalog<R: CommandRunner>(
    repo: &Repository<R>,
    remote: &str,
) -> anyhow::Result<BranchCatalog> {
    let (catalog, remote_error) = BranchCatalog::load(repo, remote)?;
    if let Some(e) = remote_error {
        log::debug!("{}", anstream::adapter::strip_str(&e.to_string()));
        eprintln!(
            "{}",
            warning_message("Could not list remote branches; showing local branches only")
        );
    }
    Ok(catalog)
}

fn pick_branch(catalog: &BranchCatalog) -> anyhow::Result<Option<Branch>> {
    let choices = catalog
        .branches()
        .iter()
        .map(|branch| Choice::new(branch.display_name(), branch.name.clone()))
        .collect();
    let Some(name) = picker::pick("switch", choices)? else {
        return Ok(None);
    };
    Ok(catalog.branches().iter().find(|b| b.name == name).cloned())
}

fn print_preview(action: &ResolvedAction) {
    println!("{}", action.checkout);
    if let Some(target) = &action.post_switch_rebase {
        println!("{target}");
    }
}

fn report_skip(reason: &SkipReason) {
    match reason {
        SkipReason::Undeterminable => eprintln!(
            "{}",
            warning_message("Could not determine main branch; skipping rebase")
        ),
        SkipReason::AlreadyOnTarget { target } => eprintln!(
            "{}",
            info_message(cformat!("On <bold>{target}</>; nothing to rebase onto"))
        ),
    }
}

fn execute<R: CommandRunner>(
    repo: &Repository<R>,
    action: &ResolvedAction,
    skipped: Option<&SkipReason>,
) -> anyhow::Result<()> {
    repo.checkout(&action.checkout)?;
    match &action.checkout {
        CheckoutCommand::Plain(name) => {
            eprintln!("{}", success_message(cformat!("Switched to <bold>{name}</>")));
        }
        CheckoutCommand::CreateTracking { local, remote_ref } => {
            eprintln!(
                "{}",
                success_message(cformat!(
                    "Created <bold>{local}</> tracking <bold>{remote_ref}</>"
                ))
            );
        }
    }

    if let Some(reason) = skipped {
        report_skip(reason);
    }

    let Some(target) = &action.post_switch_rebase else {
        return Ok(());
    };
    eprintln!(
        "{}",
        progress_message(cformat!(
            "Rebasing <bold>{}</> onto <bold>{}</>...",
            target.branch,
            target.upstream
        ))
    );
    match repo.rebase(target) {
        Ok(()) => {
            eprintln!(
                "{}",
                success_message(cformat!(
                    "Rebased <bold>{}</> onto <bold>{}</>",
                    target.branch,
                    target.upstream
                ))
            );
            Ok(())
        }
        // The switch itself succeeded; the user resolves the rebase by hand
        Err(e)
            if matches!(
                e.downcast_ref::<GitError>(),
                Some(GitError::RebaseConflict { .. } | GitError::RebaseFailed { .. })
            ) =>
        {
            eprintln!("{e}");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

use rstest::rstest;

use crate::common::{TestRepo, repo, repo_with_remote, run};

#[rstest]
fn test_switch_to_local_branch_rebases_onto_origin_main(repo_with_remote: TestRepo) {
    let repo = repo_with_remote;
    repo.run_git(&["branch", "dev"]);
    repo.commit_file("main.txt", "newer main\n", "Advance main");
    repo.run_git(&["push", "-q", "origin", "main"]);

    let result = run(repo.gitaddons(&["switch", "dev"]));
    assert!(result.success, "{}", result.stderr);

    assert_eq!(repo.current_branch(), "dev");
    assert!(repo.git_succeeds(&["merge-base", "--is-ancestor", "origin/main", "dev"]));
    assert!(result.stderr.contains("Fetching origin..."), "{}", result.stderr);
    assert!(result.stderr.contains("Switched to dev"), "{}", result.stderr);
    assert!(result.stderr.contains("Rebased dev onto origin/main"), "{}", result.stderr);
    assert!(result.stdout.is_empty());
}

#[rstest]
fn test_switch_to_remote_only_branch_creates_tracking_branch(repo_with_remote: TestRepo) {
    let repo = repo_with_remote;
    repo.push_remote_branch("feature-x");
    assert!(!repo.git_succeeds(&["rev-parse", "--verify", "--quiet", "refs/heads/feature-x"]));

    let result = run(repo.gitaddons(&["switch", "feature-x"]));
    assert!(result.success, "{}", result.stderr);

    assert_eq!(repo.current_branch(), "feature-x");
    assert_eq!(
        repo.git_output(&["rev-parse", "--abbrev-ref", "feature-x@{upstream}"]),
        "origin/feature-x"
    );
    assert!(
        result.stderr.contains("Created feature-x tracking origin/feature-x"),
        "{}",
        result.stderr
    );
}

#[rstest]
fn test_switch_accepts_full_remote_ref(repo_with_remote: TestRepo) {
    let repo = repo_with_remote;
    repo.push_remote_branch("feature-x");

    let result = run(repo.gitaddons(&["switch", "origin/feature-x", "--no-rebase"]));
    assert!(result.success, "{}", result.stderr);
    assert_eq!(repo.current_branch(), "feature-x");
}

#[rstest]
fn test_preview_prints_commands_without_running_them(repo_with_remote: TestRepo) {
    let repo = repo_with_remote;
    repo.push_remote_branch("feature-x");

    let result = run(repo.gitaddons(&["switch", "feature-x", "--preview"]));
    assert!(result.success, "{}", result.stderr);

    insta::assert_snapshot!(result.stdout, @r"
    git checkout -b feature-x --track origin/feature-x
    git rebase origin/main
    ");
    assert_eq!(repo.current_branch(), "main");
    // Preview never fetches
    assert!(!result.stderr.contains("Fetching"), "{}", result.stderr);
}

#[rstest]
fn test_no_rebase_drops_the_rebase_step(repo_with_remote: TestRepo) {
    let repo = repo_with_remote;
    repo.run_git(&["branch", "dev"]);

    let result = run(repo.gitaddons(&["switch", "dev", "--no-rebase", "--preview"]));
    assert!(result.success, "{}", result.stderr);
    assert_eq!(result.stdout, "git checkout dev\n");
}

#[rstest]
fn test_rebase_disabled_in_config(repo_with_remote: TestRepo) {
    let repo = repo_with_remote;
    repo.run_git(&["branch", "dev"]);
    repo.write_config("rebase = false\nfetch = false\n");

    let result = run(repo.gitaddons(&["switch", "dev"]));
    assert!(result.success, "{}", result.stderr);
    assert_eq!(repo.current_branch(), "dev");
    assert!(!result.stderr.contains("Fetching"), "{}", result.stderr);
    assert!(!result.stderr.contains("Rebasing"), "{}", result.stderr);
}

#[rstest]
fn test_switching_to_main_skips_rebase(repo_with_remote: TestRepo) {
    let repo = repo_with_remote;
    repo.run_git(&["checkout", "-q", "-b", "dev"]);

    let result = run(repo.gitaddons(&["switch", "main"]));
    assert!(result.success, "{}", result.stderr);
    assert_eq!(repo.current_branch(), "main");
    assert!(
        result.stderr.contains("On main; nothing to rebase onto"),
        "{}",
        result.stderr
    );
    assert!(!result.stderr.contains("Rebasing"), "{}", result.stderr);
}

#[rstest]
fn test_undeterminable_default_branch_skips_rebase(repo: TestRepo) {
    repo.run_git(&["branch", "-m", "main", "trunk"]);
    repo.run_git(&["branch", "dev"]);

    let result = run(repo.gitaddons(&["switch", "dev"]));
    assert!(result.success, "{}", result.stderr);
    assert_eq!(repo.current_branch(), "dev");
    // No remote: the fetch warns and the switch carries on
    assert!(result.stderr.contains("Could not fetch origin"), "{}", result.stderr);
    assert!(
        result
            .stderr
            .contains("Could not determine main branch; skipping rebase"),
        "{}",
        result.stderr
    );
}

#[rstest]
fn test_rebase_conflict_is_reported_not_fatal(repo_with_remote: TestRepo) {
    let repo = repo_with_remote;
    repo.commit_file("shared.txt", "base\n", "Add shared file");
    repo.run_git(&["push", "-q", "origin", "main"]);

    repo.run_git(&["checkout", "-q", "-b", "dev"]);
    repo.commit_file("shared.txt", "dev version\n", "Change shared on dev");
    repo.run_git(&["checkout", "-q", "main"]);
    repo.commit_file("shared.txt", "main version\n", "Change shared on main");
    repo.run_git(&["push", "-q", "origin", "main"]);

    let result = run(repo.gitaddons(&["switch", "dev"]));
    assert!(result.success, "{}", result.stderr);
    assert!(
        result.stderr.contains("Rebase of dev onto origin/main incomplete"),
        "{}",
        result.stderr
    );
    assert!(result.stderr.contains("git rebase --continue"), "{}", result.stderr);
    assert!(result.stderr.contains("git rebase --abort"), "{}", result.stderr);

    // Left mid-rebase for manual resolution
    let git_dir = repo.git_output(&["rev-parse", "--absolute-git-dir"]);
    let git_dir = std::path::Path::new(&git_dir);
    assert!(git_dir.join("rebase-merge").exists() || git_dir.join("rebase-apply").exists());
}

#[rstest]
fn test_rebase_onto_missing_upstream_is_a_warning(repo: TestRepo) {
    // Local main exists, but there is no origin/main to rebase onto
    repo.run_git(&["branch", "dev"]);

    let result = run(repo.gitaddons(&["switch", "dev"]));
    assert!(result.success, "{}", result.stderr);
    assert_eq!(repo.current_branch(), "dev");
    assert!(
        result
            .stderr
            .contains("Could not rebase dev onto origin/main"),
        "{}",
        result.stderr
    );
    assert!(result.stderr.contains("invalid upstream"), "{}", result.stderr);
    assert!(!result.stderr.contains("--continue"), "{}", result.stderr);
    assert!(!result.stderr.contains("incomplete"), "{}", result.stderr);

    let git_dir = repo.git_output(&["rev-parse", "--absolute-git-dir"]);
    let git_dir = std::path::Path::new(&git_dir);
    assert!(!git_dir.join("rebase-merge").exists() && !git_dir.join("rebase-apply").exists());
}

#[rstest]
fn test_rebase_blocked_by_dirty_tree_is_a_warning(repo_with_remote: TestRepo) {
    let repo = repo_with_remote;
    repo.run_git(&["branch", "dev"]);
    repo.commit_file("main.txt", "newer main\n", "Advance main");
    repo.run_git(&["push", "-q", "origin", "main"]);
    // Unstaged change to a tracked file survives the checkout but blocks the rebase
    std::fs::write(repo.root_path().join("README.md"), "local edit\n").unwrap();

    let result = run(repo.gitaddons(&["switch", "dev"]));
    assert!(result.success, "{}", result.stderr);
    assert_eq!(repo.current_branch(), "dev");
    assert!(
        result
            .stderr
            .contains("Could not rebase dev onto origin/main"),
        "{}",
        result.stderr
    );
    assert!(!result.stderr.contains("--continue"), "{}", result.stderr);
}

#[rstest]
fn test_unknown_branch_fails(repo: TestRepo) {
    let result = run(repo.gitaddons(&["switch", "nope"]));
    assert!(!result.success);
    assert!(result.stderr.contains("No branch named nope"), "{}", result.stderr);
    assert_eq!(repo.current_branch(), "main");
}

#[rstest]
fn test_switch_to_current_branch_is_a_no_op(repo: TestRepo) {
    let result = run(repo.gitaddons(&["switch", "main"]));
    assert!(result.success, "{}", result.stderr);
    assert!(result.stderr.contains("Already on main"), "{}", result.stderr);
}

#[rstest]
fn test_switch_to_current_branch_by_remote_name_is_a_no_op(repo: TestRepo) {
    let result = run(repo.gitaddons(&["switch", "origin/main"]));
    assert!(result.success, "{}", result.stderr);
    assert!(result.stderr.contains("Already on main"), "{}", result.stderr);
    assert!(!result.stderr.contains("No branch named"), "{}", result.stderr);
}

#[rstest]
fn test_outside_repository_fails(repo: TestRepo) {
    let outside = repo.outside_path();
    let result = run(repo.gitaddons_in(&outside, &["switch", "dev"]));
    assert!(!result.success);
    assert!(result.stderr.contains("Not a git repository"), "{}", result.stderr);
}

#[rstest]
fn test_directory_flag_selects_repository(repo: TestRepo) {
    repo.run_git(&["branch", "dev"]);
    let outside = repo.outside_path();
    let root = repo.root_path().to_str().unwrap().to_string();

    let result = run(repo.gitaddons_in(&outside, &["-C", &root, "switch", "dev", "--no-rebase"]));
    assert!(result.success, "{}", result.stderr);
    assert_eq!(repo.current_branch(), "dev");
}

#[rstest]
fn test_picker_requires_terminal(repo: TestRepo) {
    repo.run_git(&["branch", "dev"]);
    let result = run(repo.gitaddons(&["switch"]));
    assert!(!result.success);
    assert!(
        result.stderr.contains("requires an interactive terminal"),
        "{}",
        result.stderr
    );
}

#[rstest]
fn test_picker_with_nothing_to_pick(repo: TestRepo) {
    let result = run(repo.gitaddons(&["switch"]));
    assert!(result.success, "{}", result.stderr);
    assert!(
        result.stderr.contains("No other branches to switch to"),
        "{}",
        result.stderr
    );
}

#[rstest]
fn test_checkout_failure_is_fatal(repo: TestRepo) {
    repo.run_git(&["checkout", "-q", "-b", "dev"]);
    repo.commit_file("README.md", "dev readme\n", "Change readme on dev");
    repo.run_git(&["checkout", "-q", "main"]);
    // Uncommitted change that the checkout would overwrite
    std::fs::write(repo.root_path().join("README.md"), "local edit\n").unwrap();

    let result = run(repo.gitaddons(&["switch", "dev", "--no-rebase"]));
    assert!(!result.success);
    assert!(
        result.stderr.contains("Checkout failed: git checkout dev"),
        "{}",
        result.stderr
    );
    assert_eq!(repo.current_branch(), "main");
}

#[rstest]
fn test_invalid_config_fails(repo: TestRepo) {
    repo.write_config("remtoe = \"origin\"\n");
    let result = run(repo.gitaddons(&["switch", "main"]));
    assert!(!result.success);
    assert!(result.stderr.contains("Failed to parse config file"), "{}", result.stderr);
    assert!(result.stderr.contains("remtoe"), "{}", result.stderr);
}

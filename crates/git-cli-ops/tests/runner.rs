mod common;

use git_cli_ops::{commit, stage_all, CommitOutcome, GitCliOpsError, GitCommandRunner};

#[tokio::test]
async fn run_captures_stdout_on_success() {
    if !common::git_available().await {
        eprintln!("git not available, skipping");
        return;
    }

    let runner = GitCommandRunner::new();
    let output = runner
        .run(&std::env::temp_dir(), &["--version".to_string()], 30)
        .await
        .expect("git --version");

    assert_eq!(output.exit_code, Some(0));
    assert!(output.stdout.contains("git version"));
}

#[tokio::test]
async fn nonzero_exit_carries_argv_and_stderr() {
    if !common::git_available().await {
        eprintln!("git not available, skipping");
        return;
    }

    let runner = GitCommandRunner::new();
    let (_dir, repo_path) = common::init_test_repo(&runner).await;

    let argv = vec!["checkout".to_string(), "no-such-branch".to_string()];
    let err = runner
        .run(&repo_path, &argv, 30)
        .await
        .expect_err("checkout of a missing branch must fail");

    match err {
        GitCliOpsError::CommandFailed {
            argv: failed_argv,
            exit_code,
            stderr,
            ..
        } => {
            assert_eq!(failed_argv, argv);
            assert_ne!(exit_code, Some(0));
            assert!(!stderr.is_empty());
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn commit_reports_clean_tree_without_erroring() {
    if !common::git_available().await {
        eprintln!("git not available, skipping");
        return;
    }

    let runner = GitCommandRunner::new();
    let (_dir, repo_path) = common::init_test_repo(&runner).await;

    // Nothing staged yet: the outcome must be NothingToCommit, not an error.
    let outcome = commit(&runner, &repo_path, "empty").await.expect("commit");
    assert!(matches!(outcome, CommitOutcome::NothingToCommit));

    common::create_file(&repo_path, "README.md", "# Test\n");
    stage_all(&runner, &repo_path).await.expect("stage all");

    let outcome = commit(&runner, &repo_path, "Add README")
        .await
        .expect("commit");
    assert!(matches!(outcome, CommitOutcome::Created(_)));

    // Re-committing the same tree is the idempotent no-op case.
    let outcome = commit(&runner, &repo_path, "again").await.expect("commit");
    assert!(matches!(outcome, CommitOutcome::NothingToCommit));
}

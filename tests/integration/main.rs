//! Integration tests for the repolog CLI
//!
//! These tests run the binary over real git repositories and check what it
//! prints. Repository lists are piped in, or served by a stand-in `ghq`
//! script when stdin is not a pipe.


use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;

use git_repo::{TempGitRepo, Workspace, listing};

/// Helper to create a repolog command isolated from the user's config
fn repolog(workspace: &Workspace) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("repolog"));
    cmd.env("XDG_CONFIG_HOME", workspace.path().join("config"))
        .env("HOME", workspace.path())
        .env_remove("RUST_LOG");
    cmd
}

/// Two repositories: alpha (alice, two commits) and beta (bob, one commit)
fn two_repos(workspace: &Workspace) -> (TempGitRepo, TempGitRepo) {
    let alpha = workspace.repo("ghq/github.com/team/alpha", "alice");
    alpha.commit("msg1");
    alpha.commit("msg2");
    let beta = workspace.repo("ghq/github.com/team/beta", "bob");
    beta.commit("fix bug\n\nthe body\nmore body");
    (alpha, beta)
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

// =============================================================================
// BASIC CLI
// =============================================================================

#[test]
fn test_help_lists_flags() {
    let workspace = Workspace::new();
    repolog(&workspace)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--exclude-repo"))
        .stdout(predicate::str::contains("--include-log"))
        .stdout(predicate::str::contains("--oneline"))
        .stdout(predicate::str::contains("--parallelism"));
}

#[test]
fn test_version_flag() {
    let workspace = Workspace::new();
    repolog(&workspace)
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_flag_fails() {
    let workspace = Workspace::new();
    repolog(&workspace).arg("--no-such-flag").write_stdin("").assert().failure();
}

// =============================================================================
// DUMPING LOGS
// =============================================================================

#[test]
fn test_dumps_every_piped_repository() {
    let workspace = Workspace::new();
    let (alpha, beta) = two_repos(&workspace);

    let output = repolog(&workspace)
        .args(["-f", "[%rn] <%an> %s"])
        .write_stdin(listing(&[&alpha, &beta]))
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    let mut lines: Vec<&str> = stdout.lines().collect();
    // newest first within a repository
    let msg2 = lines.iter().position(|line| *line == "[alpha] <alice> msg2").unwrap();
    let msg1 = lines.iter().position(|line| *line == "[alpha] <alice> msg1").unwrap();
    assert!(msg2 < msg1);
    lines.sort_unstable();
    assert_eq!(lines, vec!["[alpha] <alice> msg1", "[alpha] <alice> msg2", "[beta] <bob> fix bug"]);
}

#[test]
fn test_default_format_keeps_full_message() {
    let workspace = Workspace::new();
    let (_alpha, beta) = two_repos(&workspace);

    repolog(&workspace)
        .write_stdin(listing(&[&beta]))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[beta] <bob> fix bug\n\nthe body\nmore body"));
}

#[test]
fn test_oneline_collapses_messages() {
    let workspace = Workspace::new();
    let (_alpha, beta) = two_repos(&workspace);

    repolog(&workspace)
        .arg("-1")
        .write_stdin(listing(&[&beta]))
        .assert()
        .success()
        .stdout("[beta] <bob> fix bug: the body more body\n");
}

#[test]
fn test_repo_path_placeholder() {
    let workspace = Workspace::new();
    let (alpha, _beta) = two_repos(&workspace);
    let expected = alpha.path().display().to_string();
    let expected = expected.trim_start_matches('/');

    repolog(&workspace)
        .args(["--format", "%rp|%s"])
        .write_stdin(listing(&[&alpha]))
        .assert()
        .success()
        .stdout(format!("{expected}|msg2\n{expected}|msg1\n"));
}

#[test]
fn test_blank_input_lines_are_ignored() {
    let workspace = Workspace::new();
    let (alpha, _beta) = two_repos(&workspace);
    let input = format!("\n\n{}\n   \n", alpha.path().display());

    repolog(&workspace)
        .args(["-f", "%s", "-p", "1"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("msg2\nmsg1\n");
}

#[test]
fn test_repository_without_commits_prints_nothing() {
    let workspace = Workspace::new();
    let empty = workspace.repo("ghq/github.com/team/empty", "carol");

    repolog(&workspace).write_stdin(listing(&[&empty])).assert().success().stdout("");
}

#[test]
fn test_empty_input_prints_nothing() {
    let workspace = Workspace::new();
    repolog(&workspace).write_stdin("").assert().success().stdout("");
}

/// Install a stand-in `ghq` that lists `repos` under `root`
#[cfg(unix)]
fn fake_ghq(workspace: &Workspace, root: &std::path::Path, repos: &[&TempGitRepo]) -> std::ffi::OsString {
    use std::os::unix::fs::PermissionsExt;

    let bin = workspace.path().join("bin");
    fs::create_dir_all(&bin).unwrap();
    let script = format!(
        "#!/bin/sh\ncase \"$1\" in\n  -v) echo 'ghq version 1.0.0' ;;\n  root) echo '{}' ;;\n  list) printf '%s' '{}' ;;\nesac\n",
        root.display(),
        listing(repos),
    );
    let ghq = bin.join("ghq");
    fs::write(&ghq, script).unwrap();
    fs::set_permissions(&ghq, fs::Permissions::from_mode(0o755)).unwrap();

    let mut paths = vec![bin];
    paths.extend(std::env::split_paths(&std::env::var_os("PATH").unwrap_or_default()));
    std::env::join_paths(paths).unwrap()
}

#[cfg(unix)]
#[test]
fn test_null_stdin_lists_repositories_with_ghq() {
    let workspace = Workspace::new();
    let (alpha, beta) = two_repos(&workspace);
    let path = fake_ghq(&workspace, &workspace.path().join("ghq"), &[&alpha, &beta]);

    // assert_cmd always pipes stdin, so use std's Command for a real null stdin
    let output = std::process::Command::new(cargo::cargo_bin!("repolog"))
        .env("XDG_CONFIG_HOME", workspace.path().join("config"))
        .env("HOME", workspace.path())
        .env_remove("RUST_LOG")
        .env("PATH", path)
        .args(["-f", "%rp %s"])
        .stdin(std::process::Stdio::null())
        .output()
        .unwrap();

    assert!(output.status.success(), "{output:?}");
    let stdout = stdout_of(&output);
    let mut lines: Vec<&str> = stdout.lines().collect();
    lines.sort_unstable();
    assert_eq!(
        lines,
        vec!["github.com/team/alpha msg1", "github.com/team/alpha msg2", "github.com/team/beta fix bug"]
    );
}

#[test]
fn test_piped_file_is_read_instead_of_ghq() {
    let workspace = Workspace::new();
    let (alpha, _beta) = two_repos(&workspace);
    let list = workspace.path().join("repos.txt");
    fs::write(&list, listing(&[&alpha])).unwrap();

    repolog(&workspace)
        .args(["-f", "%s"])
        .pipe_stdin(&list)
        .unwrap()
        .assert()
        .success()
        .stdout("msg2\nmsg1\n");
}

// =============================================================================
// FILTERS
// =============================================================================

#[test]
fn test_include_and_exclude_repositories() {
    let workspace = Workspace::new();
    let (alpha, beta) = two_repos(&workspace);
    let input = listing(&[&alpha, &beta]);

    repolog(&workspace)
        .args(["-f", "%s", "-i", "alpha"])
        .write_stdin(input.clone())
        .assert()
        .success()
        .stdout("msg2\nmsg1\n");

    repolog(&workspace)
        .args(["-f", "%s", "-i", "team", "-e", "alpha"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("fix bug\n");
}

#[test]
fn test_include_and_exclude_logs() {
    let workspace = Workspace::new();
    let (alpha, beta) = two_repos(&workspace);
    let input = listing(&[&alpha, &beta]);

    repolog(&workspace)
        .args(["-f", "%s", "-I", "msg", "-E", "msg1"])
        .write_stdin(input.clone())
        .assert()
        .success()
        .stdout("msg2\n");

    repolog(&workspace)
        .args(["-f", "%an %s", "--include-log", "(?i)^BOB"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("bob fix bug\n");
}

// =============================================================================
// FAILURES
// =============================================================================

#[test]
fn test_invalid_pattern_fails() {
    let workspace = Workspace::new();
    let (alpha, _beta) = two_repos(&workspace);

    repolog(&workspace)
        .args(["-E", "(unclosed"])
        .write_stdin(listing(&[&alpha]))
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("invalid filter pattern `(unclosed`"));
}

#[test]
fn test_missing_repository_fails() {
    let workspace = Workspace::new();

    repolog(&workspace)
        .write_stdin("/nonexistent/repolog/repo\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read commit logs of /nonexistent/repolog/repo"));
}

// =============================================================================
// CONFIG FILE
// =============================================================================

#[test]
fn test_config_file_supplies_defaults() {
    let workspace = Workspace::new();
    let (alpha, beta) = two_repos(&workspace);
    let config = workspace.path().join("repolog.toml");
    fs::write(&config, "[log]\nformat = \"<%an> %s\"\n\n[filter]\nexclude_repo = [\"beta\"]\n").unwrap();

    repolog(&workspace)
        .arg("--config")
        .arg(&config)
        .write_stdin(listing(&[&alpha, &beta]))
        .assert()
        .success()
        .stdout("<alice> msg2\n<alice> msg1\n");
}

#[test]
fn test_flags_override_config_file() {
    let workspace = Workspace::new();
    let (alpha, _beta) = two_repos(&workspace);
    let config_dir = workspace.path().join("config").join("repolog");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "[log]\nformat = \"<%an> %s\"\n").unwrap();

    repolog(&workspace)
        .args(["-f", "%s"])
        .write_stdin(listing(&[&alpha]))
        .assert()
        .success()
        .stdout("msg2\nmsg1\n");
}

#[test]
fn test_malformed_config_fails() {
    let workspace = Workspace::new();
    let config = workspace.path().join("broken.toml");
    fs::write(&config, "[log\nformat = 1\n").unwrap();

    repolog(&workspace)
        .arg("--config")
        .arg(&config)
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration file"));
}

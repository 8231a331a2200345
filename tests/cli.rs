//! End-to-end tests: run the built `jobshell` binary with `-c <line>`.

use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use std::time::{Duration, Instant};

const EXIT_NOTICE: &str = "\nExiting...\n";

/// Run one line in `dir` with an isolated HOME so no user config or log is touched.
fn jobshell(dir: &Path, line: &str) -> Output {
    Command::new(env!("CARGO_BIN_EXE_jobshell"))
        .arg("--log-file")
        .arg(dir.join("jobshell.log"))
        .arg("-c")
        .arg(line)
        .current_dir(dir)
        .env("HOME", dir)
        .output()
        .expect("run jobshell")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn pipeline_output_matches_producer() {
    let dir = tempfile::tempdir().unwrap();
    let alone = jobshell(dir.path(), "echo hi");
    let piped = jobshell(dir.path(), "echo hi | cat");

    assert!(piped.status.success());
    assert_eq!(stdout_of(&piped), stdout_of(&alone));
    assert_eq!(stdout_of(&piped), format!("hi\n{EXIT_NOTICE}"));
}

#[test]
fn pipeline_with_many_lines() {
    let dir = tempfile::tempdir().unwrap();
    let out = jobshell(dir.path(), "seq 1 5000 | wc -l");
    assert_eq!(stdout_of(&out).trim_end_matches(EXIT_NOTICE).trim(), "5000");
}

#[test]
fn redirect_twice_appends_twice() {
    let dir = tempfile::tempdir().unwrap();
    jobshell(dir.path(), "echo hi > f.txt");
    let out = jobshell(dir.path(), "echo hi > f.txt");

    assert_eq!(stdout_of(&out), EXIT_NOTICE);
    assert_eq!(fs::read_to_string(dir.path().join("f.txt")).unwrap(), "hi\nhi\n");
}

#[test]
fn redirect_uses_only_first_target_token() {
    let dir = tempfile::tempdir().unwrap();
    jobshell(dir.path(), "echo hi > a.txt b.txt");
    assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "hi\n");
    assert!(!dir.path().join("b.txt").exists());
}

#[test]
fn path_builtins() {
    let dir = tempfile::tempdir().unwrap();
    let out = jobshell(dir.path(), "$PATH; $PATH=$PATH:/opt/bin; $PATH");
    assert_eq!(
        stdout_of(&out),
        format!(":/bin/:/usr/bin/\n:/bin/:/usr/bin/:/opt/bin\n{EXIT_NOTICE}")
    );
}

#[test]
fn cd_then_pwd() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("nested");
    fs::create_dir(&nested).unwrap();
    let canonical = fs::canonicalize(&nested).unwrap();

    let out = jobshell(dir.path(), "cd nested; pwd");
    assert_eq!(
        stdout_of(&out),
        format!("{}/\n{EXIT_NOTICE}", canonical.display())
    );
}

#[test]
fn unknown_command_is_reported_and_session_continues() {
    let dir = tempfile::tempdir().unwrap();
    let out = jobshell(dir.path(), "no-such-cmd-xyz; echo after");

    assert!(out.status.success());
    assert_eq!(stdout_of(&out), format!("after\n{EXIT_NOTICE}"));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("no-such-cmd-xyz: command not found"), "stderr: {stderr}");
}

#[test]
fn exit_skips_the_rest_of_the_line() {
    let dir = tempfile::tempdir().unwrap();
    let out = jobshell(dir.path(), "echo before; exit; echo after");
    assert_eq!(stdout_of(&out), format!("before\n{EXIT_NOTICE}"));
}

#[test]
fn background_jobs_return_at_once_and_are_killed_at_exit() {
    let dir = tempfile::tempdir().unwrap();
    let started = Instant::now();
    // `output()` waits for stderr to close, which the sleepers hold until they are killed.
    let out = jobshell(dir.path(), "sleep 30 & ; sleep 30 &");
    assert!(started.elapsed() < Duration::from_secs(15));
    assert!(out.status.success());

    let stdout = stdout_of(&out);
    let notices: Vec<&str> = stdout.lines().filter(|l| l.starts_with('[')).collect();
    assert_eq!(notices.len(), 2, "stdout: {stdout}");
    assert!(notices[0].starts_with("[1] "), "stdout: {stdout}");
    assert!(notices[1].starts_with("[2] "), "stdout: {stdout}");
    assert!(stdout.ends_with(EXIT_NOTICE));
}

#[test]
fn background_output_is_discarded() {
    let dir = tempfile::tempdir().unwrap();
    let out = jobshell(dir.path(), "echo hidden &");
    let stdout = stdout_of(&out);
    assert!(!stdout.contains("hidden"), "stdout: {stdout}");
}

#[test]
fn end_of_input_shuts_down() {
    let dir = tempfile::tempdir().unwrap();
    let out = Command::new(env!("CARGO_BIN_EXE_jobshell"))
        .arg("--log-file")
        .arg(dir.path().join("jobshell.log"))
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .stdin(std::process::Stdio::null())
        .output()
        .expect("run jobshell");

    assert!(out.status.success());
    assert!(stdout_of(&out).ends_with(EXIT_NOTICE));
}

#[test]
fn config_file_sets_search_path() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("custom.toml");
    fs::write(&config, "search_path = [\"/usr/bin/\"]\nbanner = false\n").unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_jobshell"))
        .arg("--config")
        .arg(&config)
        .arg("--log-file")
        .arg(dir.path().join("jobshell.log"))
        .arg("-c")
        .arg("$PATH")
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .output()
        .expect("run jobshell");
    assert_eq!(stdout_of(&out), format!("/usr/bin/\n{EXIT_NOTICE}"));
}

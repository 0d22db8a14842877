//! Integration Tests

extern crate assert_cli;
extern crate tempdir;

use std::fs;

use assert_cli::Assert;
use tempdir::TempDir;

trait AssertExt {
    fn exit_status_is(self, exit_status: i32) -> Self;
}

impl AssertExt for Assert {
    fn exit_status_is(self, exit_status: i32) -> Self {
        if exit_status == 0 {
            self.succeeds()
        } else {
            self.fails_with(exit_status)
        }
    }
}

fn run_command(command: &str) -> Assert {
    Assert::command(&[env!("CARGO_BIN_EXE_ccsh")]).with_args(&["-c", command])
}

fn run_script(dir: &TempDir, contents: &str) -> Assert {
    let script = dir.path().join("script.ccsh");
    fs::write(&script, contents).unwrap();
    Assert::command(&[env!("CARGO_BIN_EXE_ccsh")])
        .with_args(&[script.to_str().unwrap()])
        .current_dir(dir.path())
}

#[test]
fn simple_echo() {
    run_command("echo test")
        .stdout()
        .is("test")
        .exit_status_is(0)
        .unwrap();
}

#[test]
fn exit_status_is_forwarded() {
    run_command("exit 85").exit_status_is(85).unwrap();
}

#[test]
fn command_not_found() {
    run_command("definitely-not-a-real-command-ccsh")
        .stderr()
        .contains("command not found")
        .exit_status_is(127)
        .unwrap();
}

#[test]
fn output_redirection_truncates_then_appends() {
    let dir = TempDir::new("ccsh-it").unwrap();
    run_script(
        &dir,
        "echo first > out.txt\n\
         echo second >> out.txt\n\
         cat out.txt\n",
    )
    .stdout()
    .is("first\nsecond")
    .exit_status_is(0)
    .unwrap();
}

#[test]
fn input_redirection() {
    let dir = TempDir::new("ccsh-it").unwrap();
    fs::write(dir.path().join("in.txt"), "hello\n").unwrap();
    run_script(&dir, "cat < in.txt\n")
        .stdout()
        .is("hello")
        .exit_status_is(0)
        .unwrap();
}

#[test]
fn unmatched_glob_is_passed_through_verbatim() {
    let dir = TempDir::new("ccsh-it").unwrap();
    run_script(&dir, "echo *.nonexistent\n")
        .stdout()
        .is("*.nonexistent")
        .exit_status_is(0)
        .unwrap();
}

#[test]
fn glob_expands_matches_sorted() {
    let dir = TempDir::new("ccsh-it").unwrap();
    fs::write(dir.path().join("b.txt"), "").unwrap();
    fs::write(dir.path().join("a.txt"), "").unwrap();
    run_script(&dir, "echo *.txt\n")
        .stdout()
        .is("a.txt b.txt")
        .exit_status_is(0)
        .unwrap();
}

#[test]
fn script_continues_past_a_failing_line() {
    let dir = TempDir::new("ccsh-it").unwrap();
    run_script(
        &dir,
        "cat < missing.txt\n\
         echo still here\n",
    )
    .stdout()
    .contains("still here")
    .stderr()
    .contains("ccsh:")
    .exit_status_is(0)
    .unwrap();
}

#[test]
fn aliases_expand_within_a_session() {
    let dir = TempDir::new("ccsh-it").unwrap();
    run_script(
        &dir,
        "alias greet='echo hello'\n\
         greet world\n",
    )
    .stdout()
    .is("hello world")
    .exit_status_is(0)
    .unwrap();
}

#[test]
fn background_job_reports_index_and_pid() {
    let dir = TempDir::new("ccsh-it").unwrap();
    run_script(
        &dir,
        "sleep 0.2 &\n\
         jobs\n\
         fg 0\n",
    )
    .stdout()
    .contains("[0]")
    .exit_status_is(0)
    .unwrap();
}

#[test]
fn fg_with_invalid_index_reports_an_error() {
    run_command("fg 3")
        .stderr()
        .contains("no such job")
        .exit_status_is(1)
        .unwrap();
}

#[test]
fn grep_builtin_over_a_file() {
    let dir = TempDir::new("ccsh-it").unwrap();
    fs::write(dir.path().join("hay.txt"), "needle\nhay\n").unwrap();
    run_script(&dir, "grep needle hay.txt\n")
        .stdout()
        .is("needle")
        .exit_status_is(0)
        .unwrap();
}

#[test]
fn which_reports_missing_names() {
    run_command("which definitely-not-a-real-command-ccsh")
        .stderr()
        .contains("not found")
        .exit_status_is(1)
        .unwrap();
}

#[test]
fn source_executes_a_file_in_the_current_shell() {
    let dir = TempDir::new("ccsh-it").unwrap();
    fs::write(
        dir.path().join("defs.ccsh"),
        "alias greet='echo sourced'\n",
    )
    .unwrap();
    run_script(
        &dir,
        "source defs.ccsh\n\
         greet\n",
    )
    .stdout()
    .is("sourced")
    .exit_status_is(0)
    .unwrap();
}

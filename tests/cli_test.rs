//! Integration tests for the usercmd binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const COMMANDS: &str = r#"
commands:
  hello:
    definition: echo hello {args}
    help: Say hello
  fail: exit 7
  loud:
    type: override
    definition: usercmd#announce
  say:
    type: plugin
    definition: usercmd.std.echo
"#;

const WRAPPED: &str = r#"
commands:
  hello:
    type: override
    definition: usercmd#announce
"#;

fn setup_project(commands: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join(".usercmd");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("commands.yml"), commands).unwrap();
    temp
}

fn usercmd(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("usercmd"));
    cmd.current_dir(temp.path())
        .env("USERCMD_HOME", temp.path().join("home"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

const VALID: &str = "commands:\n  hello:\n    definition: echo hello {args}\n    help: Say hello\n  fail: exit 7\n  say:\n    type: plugin\n    definition: usercmd.std.echo\n";

#[test]
fn cli_help_lists_subcommands() {
    let temp = TempDir::new().unwrap();
    usercmd(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn cli_version() {
    let temp = TempDir::new().unwrap();
    usercmd(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("usercmd"));
}

#[test]
fn run_shell_command_with_args() {
    let temp = setup_project(VALID);
    usercmd(&temp)
        .args(["run", "hello", "big", "world"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hello big world"));
}

#[test]
fn run_passes_exit_code_through() {
    let temp = setup_project(VALID);
    usercmd(&temp).args(["run", "fail"]).assert().code(7);
}

#[test]
fn run_plugin_command() {
    let temp = setup_project(VALID);
    usercmd(&temp)
        .args(["run", "say", "from", "plugin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("from plugin"));
}

#[test]
fn run_builtin_without_files() {
    let temp = TempDir::new().unwrap();
    usercmd(&temp)
        .args(["run", "version"])
        .assert()
        .success()
        .stdout(predicate::str::contains("usercmd "));
}

#[test]
fn run_unknown_command_fails() {
    let temp = setup_project(VALID);
    usercmd(&temp)
        .args(["run", "nope"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown command: nope"));
}

#[test]
fn override_from_extra_file_wraps_project_command() {
    let temp = setup_project(VALID);
    let extra = temp.path().join("wrap.yml");
    fs::write(&extra, WRAPPED).unwrap();

    usercmd(&temp)
        .args(["--file", extra.to_str().unwrap(), "run", "hello", "you"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Running hello you"))
        .stdout(predicate::str::contains("hello you"));
}

#[test]
fn override_without_target_fails_to_load() {
    let temp = setup_project(COMMANDS);
    usercmd(&temp)
        .args(["run", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot override 'loud'"));
}

#[test]
fn list_shows_commands_by_source() {
    let temp = setup_project(VALID);
    usercmd(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("commands.yml"))
        .stdout(predicate::str::contains("Say hello"))
        .stdout(predicate::str::contains("Run: exit 7"))
        .stdout(predicate::str::contains("[plugin]"));
}

#[test]
fn list_json() {
    let temp = setup_project(VALID);
    let output = usercmd(&temp).args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 3);
}

#[test]
fn no_discover_ignores_project_files() {
    let temp = setup_project(VALID);
    usercmd(&temp)
        .args(["--no-discover", "run", "hello"])
        .assert()
        .code(2);
}

#[test]
fn check_reports_errors() {
    let temp = setup_project("commands:\n  x:\n    type: bogus\n    definition: y\n");
    usercmd(&temp)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown command type 'bogus'"));
}

#[test]
fn check_passes_valid_files() {
    let temp = setup_project(VALID);
    usercmd(&temp)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 command(s)"));
}

#[test]
fn user_commands_are_loaded_before_project() {
    let temp = setup_project("commands:\n  who: echo project\n");
    let home = temp.path().join("home");
    fs::create_dir_all(&home).unwrap();
    fs::write(
        home.join("commands.yml"),
        "commands:\n  who: echo user\n  mine: echo mine\n",
    )
    .unwrap();

    usercmd(&temp)
        .args(["run", "who"])
        .assert()
        .success()
        .stdout(predicate::str::contains("project"));
    usercmd(&temp)
        .args(["run", "mine"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mine"));
}

#[test]
fn schema_is_json() {
    let temp = TempDir::new().unwrap();
    let output = usercmd(&temp).arg("schema").output().unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["required"][0], "commands");
}

#[test]
fn completions_bash() {
    let temp = TempDir::new().unwrap();
    usercmd(&temp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("usercmd"));
}

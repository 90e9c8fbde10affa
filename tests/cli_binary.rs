//! End-to-end checks of the `fs-visit` binary.

use assert_cmd::prelude::*;
use std::fs;
use std::process::Command;

fn fs_visit() -> Command {
    Command::new(env!("CARGO_BIN_EXE_fs-visit"))
}

fn stdout_of(command: &mut Command) -> String {
    let output = command.output().expect("run fs-visit");
    String::from_utf8(output.stdout).expect("stdout is UTF-8")
}

#[test]
fn help_lists_usage() {
    let assert = fs_visit().arg("--help").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("UTF-8");

    assert!(stdout.contains("Usage: fs-visit"));
    assert!(assert.get_output().stderr.is_empty());
}

#[test]
fn without_operands_reports_usage_error() {
    fs_visit().assert().code(1);
}

#[test]
fn lists_directory_contents_in_pre_order() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path().join("top");
    fs::create_dir_all(root.join("sub")).expect("mkdir");
    fs::write(root.join("sub/inner.txt"), b"inner").expect("write");
    fs::write(root.join("outer.txt"), b"outer").expect("write");

    let expected = format!(
        "{}\n{}\n{}\n{}\n",
        root.display(),
        root.join("sub").display(),
        root.join("sub/inner.txt").display(),
        root.join("outer.txt").display(),
    );
    fs_visit().arg(&root).assert().success().stdout(expected);
}

#[test]
fn exclusions_prune_directories() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path().join("top");
    fs::create_dir_all(root.join("target/debug")).expect("mkdir");
    fs::write(root.join("target/debug/app"), b"bin").expect("write");
    fs::write(root.join("main.rs"), b"fn main() {}").expect("write");

    let stdout = stdout_of(fs_visit().args(["--exclude", "target/"]).arg(&root));

    let pruned = root.join("target").display().to_string();
    assert!(!stdout.contains(&pruned));
    assert!(stdout.contains(&root.join("main.rs").display().to_string()));
}

#[test]
fn invalid_pattern_exits_with_usage_error() {
    let temp = tempfile::tempdir().expect("tempdir");

    let assert = fs_visit()
        .args(["--include", "["])
        .arg(temp.path())
        .assert()
        .code(1);
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).expect("UTF-8");
    assert!(stderr.starts_with("fs-visit error:"));
}

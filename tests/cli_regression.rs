// Regression tests: the CLI derives the default output path and renders
// diagnostics with miette.
// Requires: assert_cmd, predicates crates in [dev-dependencies]

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::str::contains;

fn scratch_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("xcm2sl-{}-{}", test, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn converts_to_the_default_output_path() {
    let dir = scratch_dir("default-output");
    let input = dir.join("models.xcm");
    fs::write(&input, "mdefine mypow e*a\n").unwrap();

    let mut cmd = Command::cargo_bin("xcm2sl").unwrap();
    cmd.arg(&input);
    cmd.assert().success();

    let text = fs::read_to_string(dir.join("models.sl")).unwrap();
    assert!(text.contains("%%% Automatically translated by xcm2sl %%%"));
    assert!(text.contains("define mypow_fit(lo,hi,par)"));
    assert!(text.contains("add_slang_function(\"mypow\", [\"norm\",\"a\"]);"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn honors_an_explicit_output_path() {
    let dir = scratch_dir("explicit-output");
    let input = dir.join("models.xcm");
    let output = dir.join("translated.sl");
    fs::write(&input, "mdefine screen exp(0-tau*e) : mul\n").unwrap();

    let mut cmd = Command::cargo_bin("xcm2sl").unwrap();
    cmd.arg(&input).arg(&output);
    cmd.assert().success();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("define screen_fit(lo,hi,par)"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_input_is_a_fatal_error() {
    let mut cmd = Command::cargo_bin("xcm2sl").unwrap();
    cmd.arg("no-such-file.xcm");
    cmd.assert().failure().stderr(contains("xcm2sl::io"));
}

#[test]
fn skipped_lines_are_diagnosed_but_the_run_still_succeeds() {
    let dir = scratch_dir("skipped-lines");
    let input = dir.join("mixed.xcm");
    fs::write(
        &input,
        "statistic chi\nmdefine ok e*a\n", // first line is not a directive
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("xcm2sl").unwrap();
    cmd.arg(&input);
    cmd.assert()
        .success()
        .stderr(contains("xcm2sl::convert::unrecognized_line"));

    let text = fs::read_to_string(dir.join("mixed.sl")).unwrap();
    assert!(text.contains("define ok_fit(lo,hi,par)"));

    let _ = fs::remove_dir_all(&dir);
}

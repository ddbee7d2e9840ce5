// Regression tests: CLI surface and miette-rendered errors
// Requires: assert_cmd, predicates crates in [dev-dependencies]

use std::fs;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

#[test]
fn list_suites_prints_builtin_registry() {
    let mut cmd = Command::cargo_bin("loxcheck").unwrap();
    cmd.arg("list-suites");
    cmd.assert().success().stdout(
        contains("globals")
            .and(contains("closures"))
            .and(contains("inheritance")),
    );
}

#[test]
fn expectations_subcommand_prints_parsed_set() {
    let fixture = "tests/expectations_fixture.lox";
    fs::write(
        fixture,
        "print \"ok\"; // expect: ok\nprint x; // expect runtime error: Undefined variable 'x'.\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("loxcheck").unwrap();
    cmd.arg("expectations").arg(fixture);
    cmd.assert().success().stdout(
        contains("Line: 1, Output: ok")
            .and(contains("Runtime Error: Undefined variable 'x'."))
            .and(contains("Expected exit code: 70")),
    );

    let _ = fs::remove_file(fixture);
}

#[test]
fn expectations_on_bare_script_reports_none() {
    let fixture = "tests/bare_fixture.lox";
    fs::write(fixture, "var a = 1;\nprint a;\n").unwrap();

    let mut cmd = Command::cargo_bin("loxcheck").unwrap();
    cmd.arg("expectations").arg(fixture);
    cmd.assert()
        .success()
        .stdout(contains("No expectations found"));

    let _ = fs::remove_file(fixture);
}

#[test]
fn unknown_suite_is_a_fatal_diagnostic() {
    let mut cmd = Command::cargo_bin("loxcheck").unwrap();
    cmd.arg("run").arg("chapters");
    cmd.assert()
        .failure()
        .stderr(contains("unknown suite 'chapters'"));
}

#[test]
fn missing_suites_file_is_a_fatal_diagnostic() {
    let mut cmd = Command::cargo_bin("loxcheck").unwrap();
    cmd.arg("list-suites")
        .arg("--suites-file")
        .arg("tests/no_such_suites.yaml");
    cmd.assert()
        .failure()
        .stderr(contains("failed to read").and(contains("no_such_suites.yaml")));
}

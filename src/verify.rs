//! Result verification.
//!
//! Compares what the interpreter actually did against a test case's
//! expectation set and produces human-readable failure descriptions.
//! Checks run in a fixed order — exit code, then the error branch, then
//! stdout — so the failure list for a given input is deterministic. Every
//! check is a pure function over its inputs; nothing here touches global
//! state, and verifying the same run twice yields the same list.

use lazy_static::lazy_static;
use regex::Regex;

use crate::exec::RunOutput;
use crate::expectation::{ExpectedOutput, TestCase};

lazy_static! {
    static ref STACK_TRACE: Regex = Regex::new(r"\[line (\d+)\]").unwrap();
    static ref SYNTAX_ERROR: Regex = Regex::new(r"\[.*line (\d+)\] (Error.+)").unwrap();
}

/// Splits captured process output into lines, dropping the final element
/// produced by splitting on the trailing newline. Output that does not end
/// in a newline loses its unterminated fragment, which is the contract the
/// corpus format was built against.
pub fn split_lines(output: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = output.split('\n').collect();
    lines.pop();
    lines
}

/// Runs the full check sequence and appends failures to the test case.
pub fn verify(case: &mut TestCase, run: &RunOutput) {
    let mut failures = check_exit_code(case.expected_exit_code, run.exit_code);

    // Runtime-error and compile-error verification are mutually exclusive
    // paths, even when both kinds of expectation were recorded.
    match &case.expected_runtime_error {
        Some(message) => failures.extend(check_runtime_error(
            message,
            case.runtime_error_line,
            &run.stderr,
        )),
        None => failures.extend(check_compile_errors(&case.expected_errors, &run.stderr)),
    }

    failures.extend(check_output(&case.expected_output, &run.stdout));
    case.failures.extend(failures);
}

pub fn check_exit_code(expected: i32, actual: i32) -> Vec<String> {
    if actual != expected {
        vec![format!("Expected exit code {}, but got {}", expected, actual)]
    } else {
        Vec::new()
    }
}

/// The first stderr line must carry the runtime-error message verbatim, and
/// one of the remaining lines must be a stack-trace entry pointing at the
/// expected line.
pub fn check_runtime_error(expected: &str, expected_line: usize, stderr: &str) -> Vec<String> {
    let lines = split_lines(stderr);

    if lines.is_empty() {
        return vec![format!(
            "Expected runtime error {:?}, but got nothing",
            expected
        )];
    }

    if lines[0] != expected {
        return vec![format!(
            "Expected runtime error {}, but got {}",
            expected, lines[0]
        )];
    }

    let matched = lines[1..].iter().any(|line| {
        STACK_TRACE
            .captures(line)
            .and_then(|caps| caps[1].parse::<usize>().ok())
            .map_or(false, |line_number| line_number == expected_line)
    });
    if matched {
        Vec::new()
    } else {
        vec![format!(
            "Expected stack trace at line {}, but got nothing",
            expected_line
        )]
    }
}

/// Every stderr line must have the compile-error shape; conforming lines are
/// normalized to `[<line>] <message>` and each expected error must appear
/// among them. The search is existence-based: extra normalized errors beyond
/// the expected set are not individually flagged.
pub fn check_compile_errors(expected_errors: &[String], stderr: &str) -> Vec<String> {
    let mut failures = Vec::new();
    let mut found_errors = Vec::new();

    for line in split_lines(stderr) {
        match SYNTAX_ERROR.captures(line) {
            Some(caps) => found_errors.push(format!("[{}] {}", &caps[1], &caps[2])),
            None => failures.push(format!("Unexpected error: {:?}", line)),
        }
    }

    for expected in expected_errors {
        if !found_errors.iter().any(|found| found == expected) {
            failures.push(format!(
                "Expected compile error {:?}, but got nothing",
                expected
            ));
        }
    }
    failures
}

/// Walks actual stdout lines against the expected sequence position by
/// position.
pub fn check_output(expected_output: &[ExpectedOutput], stdout: &str) -> Vec<String> {
    let mut failures = Vec::new();
    let lines = split_lines(stdout);

    let mut i = 0;
    while i < lines.len() {
        match expected_output.get(i) {
            None => failures.push(format!("Unexpected output: {}", lines[i])),
            Some(expected) if expected.text != lines[i] => failures.push(format!(
                "Expected output {:?}, but got {:?}",
                expected.text, lines[i]
            )),
            Some(_) => {}
        }
        i += 1;
    }

    if i < expected_output.len() {
        failures.push(format!(
            "Expected output: \n{}\nBut got nothing",
            expected_output[i]
        ));
    }
    failures
}

//! Handles all user-facing output for conformance runs.
//!
//! Centralizing print logic here keeps the orchestration layer free of
//! formatting concerns and gives every command a consistent look. A passing
//! file prints nothing; only failing files and the end-of-run summary make
//! noise.

use crate::config::{HarnessConfig, BOLD, GREEN, RED};
use crate::expectation::TestCase;
use crate::suite::RunSummary;

/// Announces a suite before its corpus traversal starts.
pub fn print_suite_header(name: &str, config: &HarnessConfig) {
    println!("Running suite {}", config.colorize(name, BOLD));
}

/// Prints a failing file's path followed by its ordered failure list.
pub fn print_failures(case: &TestCase, config: &HarnessConfig) {
    println!("{}: {}", config.colorize("FAIL", RED), case.path.display());
    for failure in &case.failures {
        println!("  {}", failure);
    }
}

/// End-of-run totals across every suite that ran.
pub fn print_summary(summary: &RunSummary, config: &HarnessConfig) {
    let passed = summary.files_run - summary.files_failed;
    println!(
        "\nConformance summary: {} suites, {} files, {} {}, {} {}, {} expectations checked",
        summary.suites,
        summary.files_run,
        config.colorize("passed", GREEN),
        passed,
        config.colorize("failed", RED),
        summary.files_failed,
        summary.expectations,
    );
}

//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::config::HarnessConfig;
use crate::diagnostics::print_error;
use crate::expectation::TestCase;
use crate::report;
use crate::suite::run_suites;
use crate::suites;

// ============================================================================
// CLI ARGUMENTS - Command-line argument definitions
// ============================================================================

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "loxcheck",
    version,
    about = "Conformance-test harness for Lox interpreter binaries."
)]
pub struct LoxcheckArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run conformance suites against the interpreter binary.
    Run {
        /// Names of the suites to run; all suites when omitted.
        suites: Vec<String>,
        /// Root directory of the test corpus.
        #[arg(long)]
        corpus: Option<String>,
        /// Path to the interpreter binary under test.
        #[arg(long)]
        binary: Option<PathBuf>,
        /// YAML file defining the suite registry, replacing the built-ins.
        #[arg(long)]
        suites_file: Option<PathBuf>,
    },
    /// List the names of all available suites.
    ListSuites {
        /// YAML file defining the suite registry, replacing the built-ins.
        #[arg(long)]
        suites_file: Option<PathBuf>,
    },
    /// Parse one script and print its extracted expectations.
    Expectations {
        /// The path to the script file to parse.
        #[arg(required = true)]
        file: PathBuf,
    },
}

// ============================================================================
// MAIN ENTRY POINT - Command dispatch
// ============================================================================

/// The main entry point for the CLI.
pub fn run() {
    let args = LoxcheckArgs::parse();

    match args.command {
        Command::Run {
            suites,
            corpus,
            binary,
            suites_file,
        } => {
            run_conformance(suites, corpus, binary, suites_file);
        }

        Command::ListSuites { suites_file } => {
            let registry = load_registry_or_exit(suites_file);
            for name in registry.keys() {
                println!("  {}", name);
            }
        }

        Command::Expectations { file } => {
            let mut case = TestCase::new(file);
            if let Err(e) = case.parse() {
                print_error(e);
                process::exit(1);
            }
            print_expectations(&case);
        }
    }
}

fn run_conformance(
    requested: Vec<String>,
    corpus: Option<String>,
    binary: Option<PathBuf>,
    suites_file: Option<PathBuf>,
) {
    let registry = load_registry_or_exit(suites_file);
    let selected = suites::select_suites(registry, &requested).unwrap_or_else(|e| {
        print_error(e);
        process::exit(1);
    });

    let mut config = HarnessConfig::default();
    if let Some(corpus) = corpus {
        config.corpus_root = corpus;
    }
    if let Some(binary) = binary {
        config.binary = binary;
    }

    let summary = run_suites(selected, &config).unwrap_or_else(|e| {
        print_error(e);
        process::exit(1);
    });
    report::print_summary(&summary, &config);

    if summary.files_failed > 0 {
        process::exit(1);
    }
}

// ============================================================================
// HELPER FUNCTIONS - Common patterns extracted
// ============================================================================

fn load_registry_or_exit(suites_file: Option<PathBuf>) -> suites::SuiteRegistry {
    match suites_file {
        Some(path) => suites::load_suites_file(&path).unwrap_or_else(|e| {
            print_error(e);
            process::exit(1);
        }),
        None => suites::builtin_suites(),
    }
}

// ============================================================================
// OUTPUT FUNCTIONS - Simple, direct output
// ============================================================================

fn print_expectations(case: &TestCase) {
    println!("File: {}", case.path.display());
    if case.expectations == 0 {
        println!("No expectations found");
        return;
    }
    for expected in &case.expected_output {
        println!("{}", expected);
    }
    for error in &case.expected_errors {
        println!("Error: {}", error);
    }
    if let Some(message) = &case.expected_runtime_error {
        println!("Runtime Error: {}", message);
    }
    println!("Expected exit code: {}", case.expected_exit_code);
}

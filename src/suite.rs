//! Suite orchestration.
//!
//! A [`Suite`] binds a policy map to one corpus traversal: discover files,
//! resolve each file's policy immediately, retain the passing ones, then
//! parse, execute, and verify them in discovery order. Any configuration,
//! I/O, or process-start error aborts the run; verification failures are
//! recorded on the test case and reported, never propagated.

use crate::config::{HarnessConfig, PathPolicyMap, Policy};
use crate::diagnostics::HarnessError;
use crate::discovery::{discover_files, policy_key};
use crate::exec::run_interpreter;
use crate::expectation::TestCase;
use crate::report;
use crate::suites::SuiteRegistry;
use crate::verify::verify;

/// One named conformance run over the corpus.
#[derive(Debug)]
pub struct Suite {
    pub name: String,
    pub policies: PathPolicyMap,
    pub cases: Vec<TestCase>,
}

/// Counters for one suite's run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuiteSummary {
    pub files_run: usize,
    pub files_failed: usize,
    pub expectations: usize,
}

/// Aggregated counters for a multi-suite run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub suites: usize,
    pub files_run: usize,
    pub files_failed: usize,
    pub expectations: usize,
}

impl Suite {
    pub fn new(name: impl Into<String>, policies: PathPolicyMap) -> Self {
        Self {
            name: name.into(),
            policies,
            cases: Vec::new(),
        }
    }

    /// Discovers the corpus and retains every file this suite must run.
    ///
    /// Resolution happens per discovered file, and an unresolved file aborts
    /// the suite before anything executes: silently dropping it would mask
    /// drift between the corpus and the suite definition.
    fn discover(&mut self, config: &HarnessConfig) -> Result<(), HarnessError> {
        for path in discover_files(&config.corpus_root)? {
            let key = policy_key(&path);
            match self.policies.resolve(&key) {
                Policy::Unknown => return Err(HarnessError::UnresolvedPath { path: key }),
                Policy::Skip => continue,
                Policy::Pass => self.cases.push(TestCase::new(path)),
            }
        }
        Ok(())
    }

    /// Runs the suite to completion, printing each failing file as it is
    /// verified.
    pub fn run(&mut self, config: &HarnessConfig) -> Result<SuiteSummary, HarnessError> {
        self.discover(config)?;

        let mut summary = SuiteSummary::default();
        for case in &mut self.cases {
            case.parse()?;
            let run = run_interpreter(&config.binary, &case.path)?;
            verify(case, &run);

            summary.files_run += 1;
            summary.expectations += case.expectations;
            if !case.failures.is_empty() {
                summary.files_failed += 1;
                report::print_failures(case, config);
            }
        }
        Ok(summary)
    }
}

/// Runs every suite in the registry in sorted name order, aborting the whole
/// run on the first fatal error.
pub fn run_suites(
    registry: SuiteRegistry,
    config: &HarnessConfig,
) -> Result<RunSummary, HarnessError> {
    let mut total = RunSummary::default();
    for (name, policies) in registry {
        report::print_suite_header(&name, config);
        let mut suite = Suite::new(name, policies);
        let summary = suite.run(config)?;
        total.suites += 1;
        total.files_run += summary.files_run;
        total.files_failed += summary.files_failed;
        total.expectations += summary.expectations;
    }
    Ok(total)
}

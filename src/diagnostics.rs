//! Unified diagnostic system for the harness.
//!
//! All fatal failure modes are represented by [`HarnessError`]. Verification
//! mismatches are not errors: they are accumulated on the test case and
//! reported, never propagated. The split matters because a fatal error
//! terminates the whole multi-suite run, while a mismatch only marks one
//! file as failing.

use std::fmt;
use std::io;

use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all fatal harness failure modes.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A discovered file matched no pass/skip rule. This signals drift
    /// between the corpus and the suite definition and is never skipped
    /// over silently.
    #[error("no policy configured for {path}")]
    UnresolvedPath { path: String },

    #[error("unknown suite '{name}'")]
    UnknownSuite { name: String },

    #[error("suite '{suite}' references unknown fragment '{fragment}'")]
    UnknownFragment { suite: String, fragment: String },

    #[error("failed to walk corpus directory: {message}")]
    Walk { message: String },

    #[error("failed to read {path}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to launch interpreter '{binary}'")]
    Spawn {
        binary: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to load suites file {path}: {message}")]
    SuitesFile { path: String, message: String },
}

impl HarnessError {
    /// Error code suffix used to build the diagnostic code.
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::UnresolvedPath { .. } => "unresolved_path",
            Self::UnknownSuite { .. } => "unknown_suite",
            Self::UnknownFragment { .. } => "unknown_fragment",
            Self::Walk { .. } => "walk",
            Self::Read { .. } => "read",
            Self::Spawn { .. } => "spawn",
            Self::SuitesFile { .. } => "suites_file",
        }
    }

    const fn area(&self) -> &'static str {
        match self {
            Self::UnresolvedPath { .. }
            | Self::UnknownSuite { .. }
            | Self::UnknownFragment { .. }
            | Self::SuitesFile { .. } => "config",
            Self::Walk { .. } | Self::Read { .. } => "corpus",
            Self::Spawn { .. } => "exec",
        }
    }

    fn help_text(&self) -> Option<String> {
        match self {
            Self::UnresolvedPath { path } => Some(format!(
                "every discovered file must resolve to a pass or skip rule; \
                 add a rule for '{}' or one of its parent directories",
                path
            )),
            Self::UnknownFragment { .. } => {
                Some("fragments must be declared in the suites file that uses them".into())
            }
            Self::Spawn { .. } => {
                Some("check that the --binary path points at an executable interpreter".into())
            }
            _ => None,
        }
    }
}

impl Diagnostic for HarnessError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!(
            "loxcheck::{}::{}",
            self.area(),
            self.code_suffix()
        )))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help_text()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }
}

/// Prints a HarnessError with full miette diagnostics.
///
/// Use this for user-facing error display at the CLI boundary.
pub fn print_error(error: HarnessError) {
    use miette::Report;
    let report = Report::new(error);
    eprintln!("{report:?}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_area_kind_format() {
        let err = HarnessError::UnresolvedPath {
            path: "test/foo.lox".into(),
        };
        assert_eq!(
            err.code().unwrap().to_string(),
            "loxcheck::config::unresolved_path"
        );

        let err = HarnessError::Spawn {
            binary: "bin/lox".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.code().unwrap().to_string(), "loxcheck::exec::spawn");
    }

    #[test]
    fn unresolved_path_names_the_file() {
        let err = HarnessError::UnresolvedPath {
            path: "test/limit/loop_too_large.lox".into(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("test/limit/loop_too_large.lox"));
        assert!(err
            .help()
            .unwrap()
            .to_string()
            .contains("parent directories"));
    }
}

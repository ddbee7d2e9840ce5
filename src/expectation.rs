//! Expectation extraction.
//!
//! Conformance scripts carry machine-readable expectations as trailing
//! comments. Four independent syntaxes are recognized, and more than one may
//! match the same line:
//!
//! - `// expect: <text>` — an expected stdout line (text may be empty)
//! - `// expect runtime error: <message>` — expected runtime failure
//! - `// [line <N>] Error…` — expected compile error at an explicit line
//! - `// Error…` — expected compile error at the current line
//!
//! Message text is accepted verbatim; the extractor performs no semantic
//! validation of what the interpreter is supposed to say.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use lazy_static::lazy_static;
use regex::Regex;

use crate::diagnostics::HarnessError;

lazy_static! {
    static ref EXPECTED_OUTPUT: Regex = Regex::new(r"// expect: ?(.*)").unwrap();
    static ref EXPECTED_ERROR: Regex = Regex::new(r"// (Error.*)").unwrap();
    static ref EXPECTED_ERROR_LINE: Regex = Regex::new(r"// \[line (\d+)\] (Error.*)").unwrap();
    static ref EXPECTED_RUNTIME_ERROR: Regex =
        Regex::new(r"// expect runtime error: (.+)").unwrap();
}

/// One expected stdout line, anchored to the script line that declared it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedOutput {
    pub line: usize,
    pub text: String,
}

impl fmt::Display for ExpectedOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line: {}, Output: {}", self.line, self.text)
    }
}

/// One script file plus its extracted expectations and accumulated
/// verification failures.
#[derive(Debug, Clone, Default)]
pub struct TestCase {
    pub path: PathBuf,
    pub expected_output: Vec<ExpectedOutput>,
    /// Expected compile errors, normalized to `[<line>] <message>`.
    pub expected_errors: Vec<String>,
    pub expected_runtime_error: Option<String>,
    /// Line the runtime stack trace must point at.
    pub runtime_error_line: usize,
    pub expected_exit_code: i32,
    /// Total number of expectations found in the script.
    pub expectations: usize,
    pub failures: Vec<String>,
}

impl TestCase {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            ..Self::default()
        }
    }

    /// Reads the script from disk and extracts its expectation set.
    pub fn parse(&mut self) -> Result<(), HarnessError> {
        let content = fs::read_to_string(&self.path).map_err(|e| HarnessError::Read {
            path: self.path.display().to_string(),
            source: e,
        })?;
        self.parse_source(&content);
        Ok(())
    }

    /// Extracts expectations from script text. Lines are 1-indexed; the four
    /// pattern checks are independent, so a single line may contribute more
    /// than one expectation.
    pub fn parse_source(&mut self, source: &str) {
        for (i, line) in source.split('\n').enumerate() {
            let line_number = i + 1;

            if let Some(caps) = EXPECTED_OUTPUT.captures(line) {
                self.expected_output.push(ExpectedOutput {
                    line: line_number,
                    text: caps[1].to_string(),
                });
                self.expectations += 1;
            }
            if let Some(caps) = EXPECTED_ERROR.captures(line) {
                self.expected_errors
                    .push(format!("[{}] {}", line_number, &caps[1]));
                self.expectations += 1;
            }
            if let Some(caps) = EXPECTED_RUNTIME_ERROR.captures(line) {
                self.expected_runtime_error = Some(caps[1].to_string());
                self.runtime_error_line = line_number;
                self.expectations += 1;
            }
            if let Some(caps) = EXPECTED_ERROR_LINE.captures(line) {
                self.expected_errors
                    .push(format!("[{}] {}", &caps[1], &caps[2]));
                self.expectations += 1;
            }
        }

        // A runtime-error expectation decides the exit code even when
        // compile-error expectations are also recorded; the derived code must
        // not depend on the textual order of the comments.
        self.expected_exit_code = if self.expected_runtime_error.is_some() {
            70
        } else if !self.expected_errors.is_empty() {
            65
        } else {
            0
        };
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(source: &str) -> TestCase {
        let mut case = TestCase::new(PathBuf::from("test/sample.lox"));
        case.parse_source(source);
        case
    }

    #[test]
    fn extracts_expected_output_with_line_number() {
        let case = parsed("var a = 1;\nvar b = 2;\nprint a + b; // expect: 3\n");
        assert_eq!(
            case.expected_output,
            [ExpectedOutput {
                line: 3,
                text: "3".to_string(),
            }]
        );
        assert_eq!(case.expectations, 1);
        assert_eq!(case.expected_exit_code, 0);
    }

    #[test]
    fn expected_output_text_may_be_empty() {
        let case = parsed("print \"\"; // expect: \n");
        assert_eq!(case.expected_output[0].text, "");
    }

    #[test]
    fn runtime_error_sets_message_line_and_exit_code() {
        let case = parsed("var a;\nvar b;\nvar c;\nvar d;\nprint x; // expect runtime error: Undefined variable 'x'.\n");
        assert_eq!(
            case.expected_runtime_error.as_deref(),
            Some("Undefined variable 'x'.")
        );
        assert_eq!(case.runtime_error_line, 5);
        assert_eq!(case.expected_exit_code, 70);
        assert_eq!(case.expectations, 1);
    }

    #[test]
    fn explicit_line_compile_error_keeps_declared_line() {
        let case = parsed("}\n// [line 1] Error at '}': Expected expression.\n");
        assert_eq!(
            case.expected_errors,
            ["[1] Error at '}': Expected expression."]
        );
        assert_eq!(case.expected_exit_code, 65);
    }

    #[test]
    fn bare_compile_error_uses_current_line() {
        let case = parsed("var 1 = x; // Error at '1': Expected variable name.\n");
        assert_eq!(
            case.expected_errors,
            ["[1] Error at '1': Expected variable name."]
        );
        assert_eq!(case.expected_exit_code, 65);
    }

    #[test]
    fn runtime_error_takes_exit_code_precedence_over_compile_errors() {
        // Compile-error comment after the runtime-error comment: the derived
        // exit code must still be 70.
        let case = parsed(
            "print x; // expect runtime error: Undefined variable 'x'.\n// Error at 'y': whatever.\n",
        );
        assert_eq!(case.expected_exit_code, 70);
        assert_eq!(case.expected_errors.len(), 1);
        assert_eq!(case.expectations, 2);
    }

    #[test]
    fn checks_are_independent_per_line() {
        // A line that satisfies both the bare form and the explicit-line form
        // records both expectations; duplication is accepted at extraction.
        let case = parsed("x // Error ahead // [line 2] Error at 'x': bad.\n");
        assert_eq!(case.expected_errors.len(), 2);
        assert_eq!(
            case.expected_errors[0],
            "[1] Error ahead // [line 2] Error at 'x': bad."
        );
        assert_eq!(case.expected_errors[1], "[2] Error at 'x': bad.");
        assert_eq!(case.expectations, 2);
    }

    #[test]
    fn plain_script_has_no_expectations() {
        let case = parsed("var a = 1;\nprint a;\n");
        assert_eq!(case.expectations, 0);
        assert_eq!(case.expected_exit_code, 0);
        assert!(case.expected_output.is_empty());
        assert!(case.expected_errors.is_empty());
        assert!(case.expected_runtime_error.is_none());
    }
}

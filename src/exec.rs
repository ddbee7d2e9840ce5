//! Interpreter invocation.
//!
//! The interpreter under test is a black box: it is handed a script path,
//! and everything it reports back — stdout, stderr, exit code — is data for
//! the verifier. A non-zero exit code is not a driver failure; only being
//! unable to launch the process is.

use std::path::Path;
use std::process::Command;

use crate::diagnostics::HarnessError;

/// Captured observable behavior of one interpreter invocation.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub stdout: String,
    pub stderr: String,
    /// Process exit code; `-1` when the process died without one (signal).
    pub exit_code: i32,
}

/// Runs `<binary> <script>` to completion and captures both streams.
pub fn run_interpreter(binary: &Path, script: &Path) -> Result<RunOutput, HarnessError> {
    let output = Command::new(binary)
        .arg(script)
        .output()
        .map_err(|e| HarnessError::Spawn {
            binary: binary.display().to_string(),
            source: e,
        })?;

    Ok(RunOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_code: output.status.code().unwrap_or(-1),
    })
}

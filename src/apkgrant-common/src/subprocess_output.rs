//! Subprocess output handling utilities.
//!
//! Every external tool call is judged by what it wrote to stderr, so stdout
//! and stderr are always captured separately and never interleaved.

use std::io;
use std::process::{Command, Output, Stdio};

/// Output streams from a subprocess, kept separate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeparatedOutput {
    /// Standard output content
    pub stdout: String,
    /// Standard error content
    pub stderr: String,
    /// Exit code if process completed
    pub exit_code: Option<i32>,
}

impl SeparatedOutput {
    /// Create from process output
    pub fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code(),
        }
    }

    /// Successful output with the given stdout.
    pub fn with_stdout(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            exit_code: Some(0),
        }
    }

    /// Failed output with the given stderr.
    pub fn with_stderr(stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            exit_code: Some(1),
        }
    }

    /// Check if there was any stderr output.
    ///
    /// adb and aapt report failures on stderr while frequently still exiting
    /// with 0, so this is the failure signal used throughout the crate.
    pub fn has_stderr(&self) -> bool {
        !self.stderr.is_empty()
    }

    /// First non-blank stderr line, trimmed. Used as a short failure reason.
    pub fn stderr_summary(&self) -> String {
        self.stderr
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or_default()
            .to_string()
    }

    /// Get combined output with clear separation
    pub fn combined_with_labels(&self) -> String {
        let mut result = String::new();

        if !self.stdout.is_empty() {
            result.push_str(&self.stdout);
        }

        if !self.stderr.is_empty() {
            if !result.is_empty() && !result.ends_with('\n') {
                result.push('\n');
            }
            result.push_str("[stderr]\n");
            result.push_str(&self.stderr);
        }

        result
    }
}

/// Run a process to completion and capture its output with clean separation.
///
/// Stdin is closed so a tool waiting for input cannot steal the operator's
/// terminal. There is no timeout: a hung tool hangs the caller.
pub fn run_with_separated_output(mut command: Command) -> io::Result<SeparatedOutput> {
    command.stdin(Stdio::null());
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());

    let output = command.output()?;

    Ok(SeparatedOutput::from_output(&output))
}

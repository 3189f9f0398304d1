//! Error types for the adb and aapt wrappers.

use std::io;
use thiserror::Error;

/// Errors raised while talking to the external tools.
#[derive(Debug, Error)]
pub enum AdbError {
    /// One or more required executables could not be resolved.
    #[error("required tools not found: {}", .0.join(", "))]
    MissingTools(Vec<String>),

    /// The external program could not be started.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The external program wrote to stderr.
    #[error("{program} reported an error: {message}")]
    Reported { program: String, message: String },
}

pub type Result<T> = std::result::Result<T, AdbError>;

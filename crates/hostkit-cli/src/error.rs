//! CLI-specific error types and exit codes.

use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A probe did not finish within the requested time.
    #[error("Detection timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// IO error while writing output.
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h. Invalid arguments never get this far:
    /// clap rejects them and exits with 2.
    /// - 74: IO error
    /// - 75: Temporary failure (timeout)
    /// - 78: Configuration error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 74,          // EX_IOERR
            Self::Timeout { .. } => 75, // EX_TEMPFAIL
            Self::Config(_) => 78,      // EX_CONFIG
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Io(format!("failed to serialize output: {err}"))
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("YAML error: {0}")]
    Yaml(String),

    #[error("Invalid pipeline document: {0}")]
    InvalidDocument(String),

    #[error("shellcheck unavailable: {0}")]
    ShellcheckUnavailable(String),

    #[error("shellcheck analysis failed with exit code {exit_code}: {stderr}")]
    AnalysisFailed { exit_code: i32, stderr: String },

    #[error("Invalid shellcheck output: {0}")]
    InvalidOutput(String),

    #[error(
        "Diagnostic line {line} is outside the position index of {job}:{key} ({len} lines)"
    )]
    LineOutOfRange {
        job: String,
        key: String,
        line: usize,
        len: usize,
    },

    #[error("Analysis task failed: {0}")]
    TaskFailed(String),

    #[error("Invalid command line arguments: {0}")]
    InvalidArguments(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl CheckError {
    /// Errors that point at a broken internal invariant rather than the
    /// environment. These are never downgraded to a per-job warning.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, CheckError::LineOutOfRange { .. })
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// A diagnostic exactly as shellcheck reports it. `line` is relative to the
/// analyzed blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDiagnostic {
    pub level: String,
    pub code: u32,
    pub line: usize,
    pub message: String,
    #[serde(default)]
    pub column: Option<usize>,
    #[serde(default)]
    pub end_line: Option<usize>,
    #[serde(default)]
    pub end_column: Option<usize>,
}

impl RawDiagnostic {
    pub fn new(level: impl Into<String>, code: u32, line: usize, message: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            code,
            line,
            message: message.into(),
            column: None,
            end_line: None,
            end_column: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Unknown,
    Style,
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Total over every level string; anything outside shellcheck's
    /// vocabulary becomes `Unknown`.
    pub fn from_level(level: &str) -> Self {
        match level {
            "error" => Severity::Error,
            "warning" => Severity::Warning,
            "info" => Severity::Info,
            "style" => Severity::Style,
            _ => Severity::Unknown,
        }
    }

    /// Unknown sits below the known range.
    pub fn ordinal(&self) -> u8 {
        match self {
            Severity::Unknown => 0,
            Severity::Style => 1,
            Severity::Info => 2,
            Severity::Warning => 3,
            Severity::Error => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Unknown => "UNKNOWN",
            Severity::Style => "STYLE",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }
}

/// Parses a user supplied threshold. Unlike [`Severity::from_level`] this is
/// case-insensitive and rejects anything outside the known levels.
impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Severity::from_level(&s.to_lowercase()) {
            Severity::Unknown => Err(format!(
                "unknown severity '{}', expected one of error, warning, info, style",
                s
            )),
            severity => Ok(severity),
        }
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.ordinal().cmp(&other.ordinal())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A diagnostic mapped back onto the pipeline document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub code: String,
    pub line: usize,
    pub message: String,
    pub link: String,
    pub file: PathBuf,
}

impl Finding {
    /// Sort key for reproducible output: file, line, then most severe first.
    pub fn sort_key(&self) -> (&PathBuf, usize, std::cmp::Reverse<Severity>, &str, &str) {
        (
            &self.file,
            self.line,
            std::cmp::Reverse(self.severity),
            self.code.as_str(),
            self.message.as_str(),
        )
    }
}

/// Orders findings deterministically. The orchestrator returns them in task
/// completion order.
pub fn sort_findings(findings: &mut [Finding]) {
    findings.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}

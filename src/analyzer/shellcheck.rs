use crate::error::CheckError;
use crate::models::RawDiagnostic;
use futures::future::BoxFuture;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

pub const DEFAULT_PROGRAM: &str = "shellcheck";

/// Arguments placed before any caller supplied flags.
const BASE_ARGS: &[&str] = &["-f", "json", "-s", "bash"];

pub type AnalysisFuture<'a> = BoxFuture<'a, Result<Vec<RawDiagnostic>, CheckError>>;

/// Something that can lint a shell snippet. Any error means the whole
/// snippet failed; there are no partial results.
pub trait ScriptAnalyzer: Send + Sync {
    fn analyze<'a>(&'a self, snippet: &'a [u8], flags: &'a [String]) -> AnalysisFuture<'a>;
    fn name(&self) -> &str;
}

/// Runs the `shellcheck` binary, feeding the snippet over stdin.
#[derive(Debug, Clone)]
pub struct ShellChecker {
    program: PathBuf,
    version: String,
}

impl ShellChecker {
    /// Resolves `program` and makes sure it actually runs.
    pub async fn locate(program: impl Into<PathBuf>) -> Result<Self, CheckError> {
        let program = program.into();

        let output = Command::new(&program)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                CheckError::ShellcheckUnavailable(format!("{}: {}", program.display(), e))
            })?;

        if !output.status.success() {
            return Err(CheckError::ShellcheckUnavailable(format!(
                "{} --version exited with {}",
                program.display(),
                output.status
            )));
        }

        let version = Self::parse_version(&String::from_utf8_lossy(&output.stdout));
        tracing::debug!(program = %program.display(), version = %version, "Located shellcheck");

        Ok(Self { program, version })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Picks the value of the `version:` line of `shellcheck --version`.
    pub fn parse_version(output: &str) -> String {
        output
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(key, _)| key.trim() == "version")
            .map(|(_, value)| value.trim().to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn command_args(flags: &[String]) -> Vec<String> {
        BASE_ARGS
            .iter()
            .map(|arg| arg.to_string())
            .chain(flags.iter().cloned())
            .chain(std::iter::once("-".to_string()))
            .collect()
    }

    /// Exit code 0 means clean and 1 means comments were found. Anything else
    /// is shellcheck refusing to run.
    pub fn parse_output(
        exit_code: i32,
        stdout: &[u8],
        stderr: &[u8],
    ) -> Result<Vec<RawDiagnostic>, CheckError> {
        if exit_code != 0 && exit_code != 1 {
            return Err(CheckError::AnalysisFailed {
                exit_code,
                stderr: String::from_utf8_lossy(stderr).trim().to_string(),
            });
        }

        serde_json::from_slice(stdout).map_err(|e| CheckError::InvalidOutput(e.to_string()))
    }

    async fn run(&self, snippet: &[u8], flags: &[String]) -> Result<Vec<RawDiagnostic>, CheckError> {
        let mut child = Command::new(&self.program)
            .args(Self::command_args(flags))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                CheckError::ShellcheckUnavailable(format!("{}: {}", self.program.display(), e))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| CheckError::InvalidOutput("shellcheck stdin unavailable".to_string()))?;

        // stdin is dropped at the end of the block, which signals EOF
        let writer = async move { stdin.write_all(snippet).await };
        let (written, output) = tokio::join!(writer, child.wait_with_output());
        let output = output?;

        if let Err(e) = written {
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(e.into());
            }
        }

        Self::parse_output(
            output.status.code().unwrap_or(-1),
            &output.stdout,
            &output.stderr,
        )
    }
}

impl ScriptAnalyzer for ShellChecker {
    fn analyze<'a>(&'a self, snippet: &'a [u8], flags: &'a [String]) -> AnalysisFuture<'a> {
        Box::pin(self.run(snippet, flags))
    }

    fn name(&self) -> &str {
        "shellcheck"
    }
}

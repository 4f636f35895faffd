use crate::analyzer::shellcheck::DEFAULT_PROGRAM;
use crate::error::CheckError;
use crate::models::Severity;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Flags the tool sets itself; overriding them would break output parsing.
const RESERVED_FLAGS: &[&str] = &["-", "-f", "--format"];

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "ci-shellcheck")]
#[command(about = "Run shellcheck over the scripts of a GitLab CI pipeline definition")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    /// Pipeline definition to check
    #[arg(short = 'f', long, default_value = ".gitlab-ci.yml")]
    pub file: PathBuf,

    /// Extra arguments for shellcheck, comma separated (e.g. --exclude=SC2086,--severity=warning)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub shellcheck_flags: Vec<String>,

    /// shellcheck binary to run
    #[arg(long, env = "SHELLCHECK_PATH", default_value = DEFAULT_PROGRAM)]
    pub shellcheck_path: PathBuf,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Exit with 1 when a finding at or above this severity exists (error, warning, info, style)
    #[arg(long, default_value = "warning")]
    pub fail_severity: Severity,

    /// Enable verbose output to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short = 'd', long)]
    pub debug: bool,
}

impl Cli {
    /// Parses the process arguments. `--help`, `--version` and usage errors
    /// are handled by clap and exit the process.
    pub fn parse_args() -> Result<Self, CheckError> {
        let cli = Self::parse();
        cli.validate()?;
        Ok(cli)
    }

    pub fn validate(&self) -> Result<(), CheckError> {
        if self.file.as_os_str().is_empty() {
            return Err(CheckError::InvalidArguments(
                "Pipeline file path cannot be empty".to_string(),
            ));
        }

        if let Some(flag) = self.shellcheck_flags.iter().find(|flag| {
            RESERVED_FLAGS.contains(&flag.as_str()) || flag.starts_with("--format=")
        }) {
            return Err(CheckError::InvalidArguments(format!(
                "shellcheck flag {} is managed by ci-shellcheck",
                flag
            )));
        }

        Ok(())
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose || self.debug
    }

    /// Default tracing filter when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &'static str {
        if self.debug {
            "ci_shellcheck=debug"
        } else if self.verbose {
            "ci_shellcheck=info"
        } else {
            "ci_shellcheck=warn"
        }
    }

    pub fn should_use_color(&self) -> bool {
        std::env::var("NO_COLOR").is_err()
    }
}

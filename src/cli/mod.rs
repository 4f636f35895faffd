pub mod args;
pub mod reporter;

pub use args::{Cli, OutputFormat};
pub use reporter::ReportFormatter;

use crate::analyzer::{AnalysisOrchestrator, OrchestratorConfig};
use crate::error::CheckError;
use crate::models::CheckReport;
use crate::parser::Document;

pub struct CliHandler {
    cli: Cli,
}

impl CliHandler {
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    pub async fn run(&self) -> Result<i32, CheckError> {
        // Step 1: Load the pipeline definition
        let document = Document::load(&self.cli.file)?;
        tracing::info!(file = %self.cli.file.display(), "Loaded pipeline definition");

        // Step 2: Start shellcheck before any job is touched
        let config = OrchestratorConfig::new(&self.cli.file)
            .with_flags(self.cli.shellcheck_flags.iter().cloned());
        let orchestrator =
            AnalysisOrchestrator::with_shellcheck(&self.cli.shellcheck_path, config).await?;

        // Step 3: Analyze every job
        let report = orchestrator.check_document(&document).await?.sorted();

        // Step 4: Report
        let formatter = ReportFormatter::new(&self.cli);
        println!("{}", formatter.format_report(&report)?);

        Ok(self.exit_code(&report))
    }

    pub fn exit_code(&self, report: &CheckReport) -> i32 {
        if report.count_at_or_above(self.cli.fail_severity) > 0 {
            1
        } else {
            0
        }
    }
}

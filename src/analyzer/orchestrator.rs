use crate::analyzer::assembler::assemble;
use crate::analyzer::shellcheck::{ScriptAnalyzer, ShellChecker};
use crate::analyzer::translator::translate;
use crate::error::CheckError;
use crate::models::{CheckReport, Finding, JobScripts};
use crate::parser::{Document, ScriptLocator};
use futures::future::join_all;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::instrument::WithSubscriber;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrchestratorConfig {
    pub shellcheck_flags: Vec<String>,
    pub file: PathBuf,
}

impl OrchestratorConfig {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            shellcheck_flags: Vec::new(),
            file: file.into(),
        }
    }

    pub fn with_flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.shellcheck_flags = flags.into_iter().map(Into::into).collect();
        self
    }
}

enum JobOutcome {
    Analyzed,
    Failed,
}

/// Fans out one task per job and gathers their findings.
pub struct AnalysisOrchestrator {
    analyzer: Arc<dyn ScriptAnalyzer>,
    config: Arc<OrchestratorConfig>,
}

impl AnalysisOrchestrator {
    pub fn new(analyzer: Arc<dyn ScriptAnalyzer>, config: OrchestratorConfig) -> Self {
        Self {
            analyzer,
            config: Arc::new(config),
        }
    }

    /// Fails before any job runs when the binary cannot be started.
    pub async fn with_shellcheck(
        program: impl Into<PathBuf>,
        config: OrchestratorConfig,
    ) -> Result<Self, CheckError> {
        let checker = ShellChecker::locate(program).await?;
        tracing::info!(version = %checker.version(), "Using shellcheck");
        Ok(Self::new(Arc::new(checker), config))
    }

    pub async fn check_document(&self, document: &Document) -> Result<CheckReport, CheckError> {
        self.run(ScriptLocator::new(document)).await
    }

    /// Findings come back in completion order. Per-job analysis failures are
    /// logged and leave that job out; a broken line mapping fails the run.
    pub async fn run<I>(&self, jobs: I) -> Result<CheckReport, CheckError>
    where
        I: IntoIterator<Item = JobScripts>,
    {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut names = Vec::new();
        let mut handles = Vec::new();

        for job in jobs {
            names.push(job.job_name.clone());
            let task = analyze_job(
                job,
                Arc::clone(&self.analyzer),
                Arc::clone(&self.config),
                tx.clone(),
            );
            handles.push(tokio::spawn(task.with_current_subscriber()));
        }

        // The channel closes once the last task drops its sender
        drop(tx);

        let mut report = CheckReport::new();
        while let Some(finding) = rx.recv().await {
            report.findings.push(finding);
        }

        let mut violation = None;
        for (name, outcome) in names.into_iter().zip(join_all(handles).await) {
            match outcome {
                Ok(Ok(JobOutcome::Analyzed)) => report.jobs_analyzed += 1,
                Ok(Ok(JobOutcome::Failed)) => report.failed_jobs.push(name),
                Ok(Err(e)) => {
                    tracing::error!(job = %name, error = %e, "Analysis of job {} broke an invariant", name);
                    violation.get_or_insert(e);
                }
                Err(e) => {
                    violation.get_or_insert(CheckError::TaskFailed(format!("{}: {}", name, e)));
                }
            }
        }

        if let Some(e) = violation {
            return Err(e);
        }

        tracing::debug!(
            findings = report.findings.len(),
            analyzed = report.jobs_analyzed,
            failed = report.failed_jobs.len(),
            "Script analysis finished"
        );

        Ok(report)
    }
}

/// Analyzes each script field of `job` on its own, so a finding's key is the
/// key that was analyzed. The job's findings are only sent once every field
/// succeeded.
async fn analyze_job(
    job: JobScripts,
    analyzer: Arc<dyn ScriptAnalyzer>,
    config: Arc<OrchestratorConfig>,
    tx: mpsc::UnboundedSender<Finding>,
) -> Result<JobOutcome, CheckError> {
    let mut findings = Vec::new();

    for key in job.keys().collect::<Vec<_>>() {
        let snippet = assemble(&job, &[key]);
        if snippet.is_empty() {
            continue;
        }

        let diagnostics = match analyzer
            .analyze(snippet.as_bytes(), &config.shellcheck_flags)
            .await
        {
            Ok(diagnostics) => diagnostics,
            Err(e) => {
                tracing::warn!(
                    job = %job.job_name,
                    key = %key,
                    analyzer = analyzer.name(),
                    error = %e,
                    "Failed to analyze snippet in job {}",
                    job.job_name
                );
                return Ok(JobOutcome::Failed);
            }
        };

        for diagnostic in &diagnostics {
            findings.push(translate(
                diagnostic,
                &snippet.index,
                &job.job_name,
                key,
                &config.file,
            )?);
        }
    }

    for finding in findings {
        // Only fails if the receiver is gone, in which case nobody is listening
        if tx.send(finding).is_err() {
            break;
        }
    }

    Ok(JobOutcome::Analyzed)
}

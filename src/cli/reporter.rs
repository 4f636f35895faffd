use crate::cli::args::{Cli, OutputFormat};
use crate::error::CheckError;
use crate::models::{CheckReport, Finding, Severity};

pub struct ReportFormatter {
    use_colors: bool,
    verbose: bool,
    format: OutputFormat,
}

impl ReportFormatter {
    pub fn new(cli: &Cli) -> Self {
        Self {
            use_colors: cli.should_use_color(),
            verbose: cli.is_verbose(),
            format: cli.format,
        }
    }

    pub fn plain(format: OutputFormat) -> Self {
        Self {
            use_colors: false,
            verbose: false,
            format,
        }
    }

    pub fn format_report(&self, report: &CheckReport) -> Result<String, CheckError> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Text => Ok(self.format_text(report)),
        }
    }

    fn format_text(&self, report: &CheckReport) -> String {
        let mut output = String::new();

        for finding in &report.findings {
            output.push_str(&self.format_finding(finding));
            output.push('\n');
        }

        if !report.findings.is_empty() {
            output.push('\n');
        }

        output.push_str(&format!(
            "{} finding(s) in {} job(s)",
            report.findings.len(),
            report.jobs_analyzed
        ));

        if let Some(severity) = report.max_severity() {
            output.push_str(&format!(
                " (highest severity {})",
                self.format_severity(severity)
            ));
        }

        if !report.failed_jobs.is_empty() {
            output.push_str(&format!(
                ", {} job(s) could not be analyzed",
                report.failed_jobs.len()
            ));
            if self.verbose {
                output.push_str(&format!(": {}", report.failed_jobs.join(", ")));
            }
        }

        output
    }

    fn format_finding(&self, finding: &Finding) -> String {
        format!(
            "{}:{} {} {} {} ({})",
            finding.file.display(),
            finding.line,
            self.format_severity(finding.severity),
            finding.code,
            finding.message,
            finding.link
        )
    }

    fn format_severity(&self, severity: Severity) -> String {
        if !self.use_colors {
            return severity.as_str().to_string();
        }

        let color = match severity {
            Severity::Error => "\x1b[31m",
            Severity::Warning => "\x1b[33m",
            Severity::Info => "\x1b[36m",
            Severity::Style => "\x1b[32m",
            Severity::Unknown => "\x1b[35m",
        };
        format!("{}{}\x1b[0m", color, severity.as_str())
    }
}

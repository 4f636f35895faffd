pub mod analyzer;
pub mod cli;
pub mod error;
pub mod models;
pub mod parser;

pub use error::CheckError;

// Re-export commonly used types
pub use models::{
    CheckReport, Finding, JobScripts, LineNode, PositionIndex, RawDiagnostic, ScriptKey, Severity,
};

pub use analyzer::{AnalysisOrchestrator, OrchestratorConfig, ScriptAnalyzer, ShellChecker};

pub use parser::{Document, ScriptLocator};

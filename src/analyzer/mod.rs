// Analyzer module - snippet assembly, shellcheck integration and orchestration

pub mod assembler;
pub mod orchestrator;
pub mod shellcheck;
pub mod translator;

pub use assembler::{assemble, Snippet};
pub use orchestrator::{AnalysisOrchestrator, OrchestratorConfig};
pub use shellcheck::{AnalysisFuture, ScriptAnalyzer, ShellChecker};
pub use translator::translate;

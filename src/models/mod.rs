pub mod finding;
pub mod report;
pub mod script;

pub use finding::{sort_findings, Finding, RawDiagnostic, Severity};
pub use report::CheckReport;
pub use script::{JobScripts, LineNode, PositionIndex, ScriptKey};

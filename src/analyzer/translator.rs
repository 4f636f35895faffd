use crate::error::CheckError;
use crate::models::{Finding, PositionIndex, RawDiagnostic, ScriptKey, Severity};
use std::path::Path;

pub const CODE_PREFIX: &str = "SC-";

pub fn code_string(code: u32) -> String {
    format!("{}{}", CODE_PREFIX, code)
}

pub fn wiki_link(code: u32) -> String {
    format!("https://www.shellcheck.net/wiki/SC{}", code)
}

/// Maps a blob-relative diagnostic onto the pipeline document through the
/// index built for that exact blob.
pub fn translate(
    diagnostic: &RawDiagnostic,
    index: &PositionIndex,
    job_name: &str,
    key: ScriptKey,
    file: &Path,
) -> Result<Finding, CheckError> {
    let node = index
        .get(diagnostic.line)
        .ok_or_else(|| CheckError::LineOutOfRange {
            job: job_name.to_string(),
            key: key.to_string(),
            line: diagnostic.line,
            len: index.len(),
        })?;

    Ok(Finding {
        severity: Severity::from_level(&diagnostic.level),
        code: code_string(diagnostic.code),
        line: node.line(),
        message: format!(
            "[{}:{}:{}] {}",
            job_name, key, diagnostic.line, diagnostic.message
        ),
        link: wiki_link(diagnostic.code),
        file: file.to_path_buf(),
    })
}

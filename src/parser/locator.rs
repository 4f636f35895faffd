use crate::models::{JobScripts, LineNode, ScriptKey};
use crate::parser::document::{Document, Node, ScalarStyle, MERGE_KEY};

/// Top-level keys that configure the pipeline instead of defining a job.
const GLOBAL_KEYWORDS: &[&str] = &[
    "after_script",
    "before_script",
    "cache",
    "default",
    "image",
    "include",
    "services",
    "stages",
    "types",
    "variables",
    "workflow",
];

const REFERENCE_TAG: &str = "reference";

/// Walks the jobs of a document, yielding the script fields of each job that
/// has any. Jobs come out in document order.
pub struct ScriptLocator<'a> {
    entries: std::slice::Iter<'a, (Node, Node)>,
}

impl<'a> ScriptLocator<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self {
            entries: document.root().entries().iter(),
        }
    }

    /// Merge keys pull entries into the root; they never name a job.
    pub fn is_job_name(name: &str) -> bool {
        name != MERGE_KEY && !GLOBAL_KEYWORDS.contains(&name)
    }
}

impl Iterator for ScriptLocator<'_> {
    type Item = JobScripts;

    fn next(&mut self) -> Option<Self::Item> {
        for (key, value) in self.entries.by_ref() {
            let Some(name) = key.as_str() else {
                continue;
            };

            if !Self::is_job_name(name) || !value.is_mapping() {
                continue;
            }

            let job = extract_job_scripts(name, value);
            if job.has_scripts() {
                return Some(job);
            }

            tracing::debug!(job = %name, "Skipping job without scripts");
        }

        None
    }
}

/// Convenience wrapper when every job is needed up front.
pub fn extract_scripts(document: &Document) -> Vec<JobScripts> {
    ScriptLocator::new(document).collect()
}

fn extract_job_scripts(name: &str, job: &Node) -> JobScripts {
    let mut scripts = JobScripts::new(name);

    for key in ScriptKey::ALL {
        if let Some(node) = job.get(key.as_str()) {
            let mut lines = Vec::new();
            collect_lines(node, &mut lines);
            if !lines.is_empty() {
                scripts = scripts.with_part(key, lines);
            }
        }
    }

    scripts
}

fn collect_lines(node: &Node, lines: &mut Vec<LineNode>) {
    if node.tag() == Some(REFERENCE_TAG) {
        return;
    }

    match node {
        // A literal block keeps its line breaks, so text line `i` sits on
        // source line `line + i`. The scalar's mark is its first content line.
        Node::Scalar {
            value,
            line,
            style: ScalarStyle::Literal,
            ..
        } => {
            if value.is_empty() {
                return;
            }
            let text = value.strip_suffix('\n').unwrap_or(value.as_str());
            for (offset, text_line) in text.split('\n').enumerate() {
                lines.push(LineNode::new(line + offset, text_line));
            }
        }
        Node::Scalar { value, line, .. } => {
            if !node.is_null() {
                lines.push(LineNode::new(*line, value.as_str()));
            }
        }
        Node::Sequence { items, .. } => {
            for item in items {
                collect_lines(item, lines);
            }
        }
        Node::Mapping { .. } => {}
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// One scalar of shell text as held by the parsed document, together with the
/// 1-based line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineNode {
    line: usize,
    text: Arc<str>,
}

impl LineNode {
    pub fn new(line: usize, text: impl Into<Arc<str>>) -> Self {
        Self {
            line,
            text: text.into(),
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptKey {
    BeforeScript,
    Script,
    AfterScript,
}

impl ScriptKey {
    /// Execution order within a job.
    pub const ALL: [ScriptKey; 3] = [
        ScriptKey::BeforeScript,
        ScriptKey::Script,
        ScriptKey::AfterScript,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptKey::BeforeScript => "before_script",
            ScriptKey::Script => "script",
            ScriptKey::AfterScript => "after_script",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "before_script" => Some(ScriptKey::BeforeScript),
            "script" => Some(ScriptKey::Script),
            "after_script" => Some(ScriptKey::AfterScript),
            _ => None,
        }
    }
}

impl fmt::Display for ScriptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The script fields of a single job. Fields are kept in [`ScriptKey`] order
/// so iteration is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobScripts {
    pub job_name: String,
    pub script_parts: BTreeMap<ScriptKey, Vec<LineNode>>,
}

impl JobScripts {
    pub fn new(job_name: impl Into<String>) -> Self {
        Self {
            job_name: job_name.into(),
            script_parts: BTreeMap::new(),
        }
    }

    pub fn with_part(mut self, key: ScriptKey, lines: Vec<LineNode>) -> Self {
        self.script_parts.insert(key, lines);
        self
    }

    pub fn part(&self, key: ScriptKey) -> &[LineNode] {
        self.script_parts
            .get(&key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Keys that carry at least one line, in execution order.
    pub fn keys(&self) -> impl Iterator<Item = ScriptKey> + '_ {
        self.script_parts
            .iter()
            .filter(|(_, lines)| !lines.is_empty())
            .map(|(key, _)| *key)
    }

    pub fn has_scripts(&self) -> bool {
        self.script_parts.values().any(|lines| !lines.is_empty())
    }
}

/// Maps 1-based blob lines back to the node that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionIndex {
    entries: Vec<LineNode>,
}

impl PositionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: LineNode) {
        self.entries.push(node);
    }

    /// Node for blob line `line`, where line 1 is the first entry.
    pub fn get(&self, line: usize) -> Option<&LineNode> {
        line.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineNode> {
        self.entries.iter()
    }
}

use crate::models::{JobScripts, PositionIndex, ScriptKey};

/// A blob ready for analysis and the index that maps its lines back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snippet {
    pub blob: String,
    pub index: PositionIndex,
}

impl Snippet {
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.blob.as_bytes()
    }
}

/// Concatenates the `keys` fields of `job`, in the order given.
///
/// Every emitted blob line gets exactly one index entry, so line `n` of the
/// blob is `index.get(n)`. Multi-line scalars contribute one entry per text
/// line, all pointing at the scalar that holds them.
pub fn assemble(job: &JobScripts, keys: &[ScriptKey]) -> Snippet {
    let mut snippet = Snippet::default();

    for key in keys {
        for node in job.part(*key) {
            for text_line in split_lines(node.text()) {
                snippet.blob.push_str(text_line);
                snippet.blob.push('\n');
                snippet.index.push(node.clone());
            }
        }
    }

    snippet
}

/// Splits on `\n` only, keeping blank lines. A single trailing newline (block
/// scalar clip chomping) does not open another line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let text = text.strip_suffix('\n').unwrap_or(text);
    text.split('\n')
}

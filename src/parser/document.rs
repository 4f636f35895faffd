use crate::error::CheckError;
use std::collections::HashMap;
use std::path::Path;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

pub const MERGE_KEY: &str = "<<";

/// How a scalar was written. Literal block scalars keep one text line per
/// source line; folded and quoted ones do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarStyle {
    Plain,
    Quoted,
    Literal,
    Folded,
}

impl From<TScalarStyle> for ScalarStyle {
    fn from(style: TScalarStyle) -> Self {
        match style {
            TScalarStyle::Plain => ScalarStyle::Plain,
            TScalarStyle::Literal => ScalarStyle::Literal,
            TScalarStyle::Folded => ScalarStyle::Folded,
            _ => ScalarStyle::Quoted,
        }
    }
}

/// A YAML node that remembers the 1-based line it starts on.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Scalar {
        value: String,
        line: usize,
        tag: Option<String>,
        style: ScalarStyle,
    },
    Sequence {
        items: Vec<Node>,
        line: usize,
        tag: Option<String>,
    },
    Mapping {
        entries: Vec<(Node, Node)>,
        line: usize,
    },
}

impl Node {
    pub fn line(&self) -> usize {
        match self {
            Node::Scalar { line, .. } | Node::Sequence { line, .. } | Node::Mapping { line, .. } => {
                *line
            }
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Scalar { tag, .. } | Node::Sequence { tag, .. } => tag.as_deref(),
            Node::Mapping { .. } => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(
            self,
            Node::Scalar { value, style: ScalarStyle::Plain, .. }
                if value.is_empty() || value == "~" || value == "null" || value == "Null" || value == "NULL"
        )
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Node::Mapping { .. })
    }

    /// Mapping entries in document order. Empty for non-mappings.
    pub fn entries(&self) -> &[(Node, Node)] {
        match self {
            Node::Mapping { entries, .. } => entries,
            _ => &[],
        }
    }

    /// Looks up `key`, falling back to mappings merged in with `<<`.
    pub fn get(&self, key: &str) -> Option<&Node> {
        let entries = self.entries();

        if let Some((_, value)) = entries.iter().find(|(k, _)| k.as_str() == Some(key)) {
            return Some(value);
        }

        entries
            .iter()
            .filter(|(k, _)| k.as_str() == Some(MERGE_KEY))
            .flat_map(|(_, merged)| match merged {
                Node::Sequence { items, .. } => items.iter().collect::<Vec<_>>(),
                other => vec![other],
            })
            .find_map(|merged| merged.get(key))
    }
}

/// A parsed pipeline definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Node,
}

impl Document {
    pub fn parse(source: &str) -> Result<Self, CheckError> {
        let mut builder = TreeBuilder::default();
        let mut parser = Parser::new_from_str(source);
        parser
            .load(&mut builder, false)
            .map_err(|e| CheckError::Yaml(e.to_string()))?;

        if let Some(error) = builder.error {
            return Err(CheckError::InvalidDocument(error));
        }

        let root = builder.documents.into_iter().next().unwrap_or(Node::Mapping {
            entries: Vec::new(),
            line: 1,
        });

        if root.is_null() {
            return Ok(Self {
                root: Node::Mapping {
                    entries: Vec::new(),
                    line: root.line(),
                },
            });
        }

        if !root.is_mapping() {
            return Err(CheckError::InvalidDocument(format!(
                "top level must be a mapping of jobs (line {})",
                root.line()
            )));
        }

        Ok(Self { root })
    }

    pub fn load(path: &Path) -> Result<Self, CheckError> {
        let source = std::fs::read_to_string(path)?;
        Self::parse(&source)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }
}

enum Frame {
    Sequence {
        items: Vec<Node>,
        line: usize,
        tag: Option<String>,
        anchor: usize,
    },
    Mapping {
        entries: Vec<(Node, Node)>,
        pending_key: Option<Node>,
        line: usize,
        anchor: usize,
    },
}

#[derive(Default)]
struct TreeBuilder {
    stack: Vec<Frame>,
    anchors: HashMap<usize, Node>,
    documents: Vec<Node>,
    error: Option<String>,
}

impl TreeBuilder {
    fn register(&mut self, anchor: usize, node: &Node) {
        if anchor > 0 {
            self.anchors.insert(anchor, node.clone());
        }
    }

    fn push_value(&mut self, node: Node) {
        match self.stack.last_mut() {
            None => self.documents.push(node),
            Some(Frame::Sequence { items, .. }) => items.push(node),
            Some(Frame::Mapping {
                entries,
                pending_key,
                ..
            }) => match pending_key.take() {
                Some(key) => entries.push((key, node)),
                None => *pending_key = Some(node),
            },
        }
    }
}

impl MarkedEventReceiver for TreeBuilder {
    fn on_event(&mut self, ev: Event, mark: Marker) {
        if self.error.is_some() {
            return;
        }

        let line = mark.line();

        match ev {
            Event::Scalar(value, style, anchor, tag) => {
                let node = Node::Scalar {
                    value,
                    line,
                    tag: tag.map(|t| t.suffix),
                    style: style.into(),
                };
                self.register(anchor, &node);
                self.push_value(node);
            }
            Event::SequenceStart(anchor, tag) => self.stack.push(Frame::Sequence {
                items: Vec::new(),
                line,
                tag: tag.map(|t| t.suffix),
                anchor,
            }),
            Event::MappingStart(anchor, _) => self.stack.push(Frame::Mapping {
                entries: Vec::new(),
                pending_key: None,
                line,
                anchor,
            }),
            Event::SequenceEnd | Event::MappingEnd => {
                let (node, anchor) = match self.stack.pop() {
                    Some(Frame::Sequence {
                        items,
                        line,
                        tag,
                        anchor,
                    }) => (Node::Sequence { items, line, tag }, anchor),
                    Some(Frame::Mapping {
                        entries,
                        line,
                        anchor,
                        ..
                    }) => (Node::Mapping { entries, line }, anchor),
                    None => {
                        self.error = Some(format!("unbalanced collection end at line {}", line));
                        return;
                    }
                };
                self.register(anchor, &node);
                self.push_value(node);
            }
            Event::Alias(id) => match self.anchors.get(&id).cloned() {
                Some(node) => self.push_value(node),
                None => self.error = Some(format!("unknown alias at line {}", line)),
            },
            _ => {}
        }
    }
}

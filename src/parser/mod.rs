// Parser module - line-aware document model and script location

pub mod document;
pub mod locator;

pub use document::{Document, Node, ScalarStyle};
pub use locator::{extract_scripts, ScriptLocator};

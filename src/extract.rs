//! Depth-first extraction of sticky notes and their enclosing sections.
//!
//! The walk is pre-order in document order with an explicit work stack. Each stack entry carries
//! the section name in force for that node, so a nested section simply shadows its parent for
//! its own subtree and the parent's name comes back once the walk leaves it.

use crate::color;
use crate::document::{DocumentNode, NodeKind};
use crate::error::{BridgeError, Result};
use crate::note::{NoteRecord, NO_SECTION};
use indexmap::IndexMap;

/// Notes keyed by id, in document order.
pub type NoteMap = IndexMap<String, NoteRecord>;

/// Nesting bound used when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy)]
/// Walks a document tree and collects note records.
pub struct Extractor {
    max_depth: usize,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl Extractor {
    #[must_use]
    /// An extractor that refuses trees nested deeper than `max_depth` below the root.
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Collect every note in the tree with its nearest enclosing section name.
    ///
    /// Nodes that are neither notes nor sections are skipped but their children are still
    /// visited. If two notes share an id, the one visited later replaces the earlier one but
    /// stays where the first one was in the ordering.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::DepthExceeded`] if a node sits deeper than the configured bound.
    pub fn extract(&self, root: &DocumentNode) -> Result<NoteMap> {
        let mut notes = NoteMap::new();
        let mut stack: Vec<(&DocumentNode, &str, usize)> = vec![(root, NO_SECTION, 0)];

        while let Some((node, inherited, depth)) = stack.pop() {
            if depth > self.max_depth {
                return Err(BridgeError::DepthExceeded {
                    max_depth: self.max_depth,
                    node_id: node.id.clone(),
                });
            }

            let section = match node.kind {
                NodeKind::Section if !node.name.is_empty() => node.name.as_str(),
                _ => inherited,
            };

            if node.kind == NodeKind::Note {
                let record = note_record(node, section);
                if notes.contains_key(&record.id) {
                    log::warn!("duplicate note id {}, keeping the later one", record.id);
                }
                // An existing key keeps its first position.
                notes.insert(record.id.clone(), record);
            }

            // Reversed so the first child is popped first.
            for child in node.children.iter().rev() {
                stack.push((child, section, depth + 1));
            }
        }

        log::debug!("extracted {} notes from {}", notes.len(), root.id);
        Ok(notes)
    }
}

/// Extract notes with the default depth bound.
///
/// # Errors
///
/// Returns [`BridgeError::DepthExceeded`] for trees nested beyond [`DEFAULT_MAX_DEPTH`].
pub fn extract(root: &DocumentNode) -> Result<NoteMap> {
    Extractor::default().extract(root)
}

fn note_record(node: &DocumentNode, section: &str) -> NoteRecord {
    let raw_text = node
        .text
        .clone()
        .unwrap_or_else(|| node.name.clone());

    NoteRecord {
        id: node.id.clone(),
        raw_text,
        section_name: section.to_string(),
        color_hex: node.fill.map(color::to_hex).unwrap_or_default(),
    }
}

#[cfg(test)]
#[path = "tests/extract.rs"]
mod tests;

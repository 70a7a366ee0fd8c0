//! Typed whiteboard tree and the JSON ingestion boundary.
//!
//! Board exports arrive as loosely typed JSON in which every node carries a `type` tag and
//! whatever extra properties the design tool felt like attaching. We parse that once, here,
//! into [`DocumentNode`] so the rest of the crate only ever sees the three node kinds it cares
//! about. Unknown kinds are kept (their children may still hold notes) but never emitted.

use crate::error::{BridgeError, Result};
use indexmap::IndexMap;
use serde::de::IgnoredAny;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq)]
/// Fill color with each channel in the unit interval.
pub struct Rgb {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
}

impl Rgb {
    #[must_use]
    /// Builds a color from unit-interval channels.
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The node variants the extractor distinguishes.
pub enum NodeKind {
    /// Grouping frame whose name becomes the context for nested notes.
    Section,
    /// A sticky note, the unit of extraction.
    Note,
    /// Anything else, carrying the original type tag for diagnostics.
    Other(String),
}

impl NodeKind {
    #[must_use]
    /// Maps the export's `type` tag onto a node kind.
    pub fn from_type_tag(tag: &str) -> Self {
        match tag {
            "SECTION" => Self::Section,
            "STICKY" => Self::Note,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// One node of the whiteboard tree, children in document order.
pub struct DocumentNode {
    /// Identifier assigned by the design tool.
    pub id: String,
    /// Parsed node variant.
    pub kind: NodeKind,
    /// Display name; sections use it as their label, notes as a text fallback.
    pub name: String,
    /// Free-form text content, if the node has any.
    pub text: Option<String>,
    /// First fill color, if the node has a solid fill.
    pub fill: Option<Rgb>,
    /// Nested nodes in document order.
    pub children: Vec<DocumentNode>,
}

impl DocumentNode {
    #[must_use]
    /// A childless node of the given kind.
    pub fn new(id: impl Into<String>, kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            text: None,
            fill: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    /// A section node.
    pub fn section(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, NodeKind::Section, name)
    }

    #[must_use]
    /// A note node carrying `text` as its content.
    pub fn note(id: impl Into<String>, text: impl Into<String>) -> Self {
        let mut node = Self::new(id, NodeKind::Note, "");
        node.text = Some(text.into());
        node
    }

    #[must_use]
    /// A node of some kind the extractor does not emit.
    pub fn other(id: impl Into<String>, tag: &str) -> Self {
        Self::new(id, NodeKind::from_type_tag(tag), "")
    }

    #[must_use]
    /// Sets the fill color.
    pub fn with_fill(mut self, fill: Rgb) -> Self {
        self.fill = Some(fill);
        self
    }

    #[must_use]
    /// Replaces the children.
    pub fn with_children(mut self, children: Vec<DocumentNode>) -> Self {
        self.children = children;
        self
    }
}

#[derive(Deserialize)]
struct RawNode {
    id: String,
    #[serde(rename = "type")]
    type_tag: String,
    #[serde(default)]
    name: String,
    characters: Option<String>,
    #[serde(default)]
    fills: Option<Vec<RawPaint>>,
    #[serde(default)]
    children: Option<Vec<RawNode>>,
}

#[derive(Deserialize)]
struct RawPaint {
    color: Option<RawColor>,
}

#[derive(Deserialize)]
struct RawColor {
    r: f64,
    g: f64,
    b: f64,
}

#[derive(Deserialize)]
struct RawNodeEntry {
    document: RawNode,
}

#[derive(Deserialize)]
/// Top-level keys that tell the accepted export shapes apart.
struct RawExport {
    document: Option<RawNode>,
    nodes: Option<IndexMap<String, Option<RawNodeEntry>>>,
    id: Option<IgnoredAny>,
    #[serde(rename = "type")]
    type_tag: Option<IgnoredAny>,
}

impl From<RawNode> for DocumentNode {
    fn from(raw: RawNode) -> Self {
        // Only the first paint counts; image and gradient paints have no color.
        let fill = raw
            .fills
            .and_then(|fills| fills.into_iter().next())
            .and_then(|paint| paint.color)
            .map(|c| Rgb::new(c.r, c.g, c.b));

        Self {
            id: raw.id,
            kind: NodeKind::from_type_tag(&raw.type_tag),
            name: raw.name,
            text: raw.characters,
            fill,
            children: raw
                .children
                .unwrap_or_default()
                .into_iter()
                .map(Self::from)
                .collect(),
        }
    }
}

/// Parse a board export into its root node.
///
/// Accepts the full file response (`{"document": ...}`), the node lookup response
/// (`{"nodes": {id: {"document": ...}}}`, whose entries become children of a synthetic root in
/// map order), or a bare node.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or matches none of the accepted shapes.
pub fn parse_export(json_str: &str) -> Result<DocumentNode> {
    let export: RawExport = serde_json::from_str(json_str)?;

    if let Some(document) = export.document {
        return Ok(document.into());
    }

    if let Some(nodes) = export.nodes {
        let children = nodes
            .into_values()
            .flatten()
            .map(|entry| DocumentNode::from(entry.document))
            .collect();
        return Ok(DocumentNode::other("", "NODES").with_children(children));
    }

    if export.id.is_some() && export.type_tag.is_some() {
        let raw: RawNode = serde_json::from_str(json_str)?;
        return Ok(raw.into());
    }

    Err(BridgeError::MissingDocument)
}

/// Read and parse a board export from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails to parse.
pub fn load_export(path: &Path) -> Result<DocumentNode> {
    let contents = fs::read_to_string(path)?;
    let root = parse_export(&contents)?;
    log::debug!("loaded export {} (root {})", path.display(), root.id);
    Ok(root)
}

#[must_use]
/// Extract the file key from a board URL such as `https://www.figma.com/board/KEY/Name`.
///
/// The first path segment must be `file` or `board`, followed by a key made of ASCII
/// alphanumerics, `_` and `-`. Anything else, including unparseable URLs, yields `None`.
pub fn board_key(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let mut segments = parsed.path_segments()?;

    if !matches!(segments.next(), Some("file" | "board")) {
        return None;
    }

    let key = segments.next()?;
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    valid.then(|| key.to_string())
}

#[cfg(test)]
#[path = "tests/document.rs"]
mod tests;

//! Note records extracted from a whiteboard tree.
//!
//! A note record is the flattened view of one sticky: its text, the section it sits under, and
//! its normalised fill color. Records are rebuilt from scratch on every extraction pass.

use serde::Serialize;

/// Grouping label for notes with no enclosing section.
pub const NO_SECTION: &str = "no section";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Flattened sticky note with its resolved section and color.
pub struct NoteRecord {
    /// Node id, unique within one extraction pass.
    pub id: String,
    /// Note text, falling back to the node name, or empty.
    pub raw_text: String,
    /// Name of the nearest enclosing section, or [`NO_SECTION`].
    pub section_name: String,
    /// Lowercase `#rrggbb` fill color, or empty when the note has no fill.
    pub color_hex: String,
}

impl NoteRecord {
    #[must_use]
    /// Whether the note carries a fill color.
    pub fn has_color(&self) -> bool {
        !self.color_hex.is_empty()
    }
}

//! Section and color filtering over extracted notes.
//!
//! Within a dimension the selected values are alternatives; across dimensions they must all
//! hold. An empty dimension does not filter at all, so a fresh [`FilterSelection`] shows
//! everything.

use crate::color;
use crate::note::{NoteRecord, NO_SECTION};
use serde::Serialize;
use std::collections::BTreeSet;

/// Display label for the [`NO_SECTION`] option.
pub const NO_SECTION_LABEL: &str = "(no section)";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Sections and colors the user has narrowed the note list to.
pub struct FilterSelection {
    /// Section names to keep; empty keeps all.
    pub selected_sections: BTreeSet<String>,
    /// Lowercase hex colors to keep; empty keeps all.
    pub selected_colors: BTreeSet<String>,
}

impl FilterSelection {
    #[must_use]
    /// A selection that keeps every note.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selected sections.
    pub fn set_sections<I, S>(&mut self, sections: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_sections = sections.into_iter().map(Into::into).collect();
    }

    /// Replace the selected colors, lowercasing them and dropping empty entries.
    pub fn set_colors<I, S>(&mut self, colors: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_colors = colors
            .into_iter()
            .map(|c| c.into().to_ascii_lowercase())
            .filter(|c| !c.is_empty())
            .collect();
    }

    #[must_use]
    /// Whether neither dimension filters anything.
    pub fn is_empty(&self) -> bool {
        self.selected_sections.is_empty() && self.selected_colors.is_empty()
    }

    #[must_use]
    /// Whether a note passes both dimensions.
    pub fn matches(&self, note: &NoteRecord) -> bool {
        let section_ok = self.selected_sections.is_empty()
            || self.selected_sections.contains(&note.section_name);
        // A note without a fill never matches a color filter.
        let color_ok = self.selected_colors.is_empty()
            || (note.has_color() && self.selected_colors.contains(&note.color_hex));
        section_ok && color_ok
    }
}

#[must_use]
/// Notes passing `selection`, in input order.
pub fn filter<'a, I>(notes: I, selection: &FilterSelection) -> Vec<&'a NoteRecord>
where
    I: IntoIterator<Item = &'a NoteRecord>,
{
    notes
        .into_iter()
        .filter(|note| selection.matches(note))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// One choice offered in a filter picker.
pub struct FilterOption {
    /// Human-readable label.
    pub label: String,
    /// Value stored in the [`FilterSelection`] when chosen.
    pub value: String,
}

#[must_use]
/// Distinct section names, the no-section option first and the rest in first-seen order.
pub fn section_options<'a, I>(notes: I) -> Vec<FilterOption>
where
    I: IntoIterator<Item = &'a NoteRecord>,
{
    let mut seen = BTreeSet::new();
    let mut options: Vec<FilterOption> = notes
        .into_iter()
        .filter(|note| seen.insert(note.section_name.clone()))
        .map(|note| {
            let label = if note.section_name == NO_SECTION {
                NO_SECTION_LABEL.to_string()
            } else {
                note.section_name.clone()
            };
            FilterOption {
                label,
                value: note.section_name.clone(),
            }
        })
        .collect();

    // Stable sort: only the sentinel moves.
    options.sort_by_key(|option| option.value != NO_SECTION);
    options
}

#[must_use]
/// Distinct fill colors with their palette labels, sorted by label then hex.
pub fn color_options<'a, I>(notes: I) -> Vec<FilterOption>
where
    I: IntoIterator<Item = &'a NoteRecord>,
{
    let hexes: BTreeSet<&str> = notes
        .into_iter()
        .filter(|note| note.has_color())
        .map(|note| note.color_hex.as_str())
        .collect();

    let mut options: Vec<FilterOption> = hexes
        .into_iter()
        .map(|hex| FilterOption {
            label: color::classify(hex),
            value: hex.to_string(),
        })
        .collect();

    options.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.value.cmp(&b.value)));
    options
}

#[cfg(test)]
#[path = "tests/filter.rs"]
mod tests;

//! The owned workflow state from board export to issue drafts.
//!
//! A session moves through three steps: load a board (extracting notes), narrow and select
//! notes, then configure, which turns the selected visible notes into editable drafts. All of it
//! lives in one value the caller owns and passes around, so there is no hidden shared store.
//!
//! Loading a board resets everything downstream of it, and changing the selection throws away
//! drafts built from the previous selection.

use crate::config::Config;
use crate::document::DocumentNode;
use crate::draft::DraftStore;
use crate::error::Result;
use crate::extract::{Extractor, NoteMap};
use crate::filter::{self, FilterOption, FilterSelection};
use crate::note::NoteRecord;
use indexmap::IndexSet;
use std::time::Duration;

#[derive(Debug)]
/// Notes, filter, selection and drafts for one board.
pub struct Session {
    extractor: Extractor,
    debounce: Duration,
    notes: NoteMap,
    filter: FilterSelection,
    selected: IndexSet<String>,
    drafts: Option<DraftStore>,
}

impl Session {
    #[must_use]
    /// An empty session.
    pub fn new(extractor: Extractor, debounce: Duration) -> Self {
        Self {
            extractor,
            debounce,
            notes: NoteMap::new(),
            filter: FilterSelection::new(),
            selected: IndexSet::new(),
            drafts: None,
        }
    }

    #[must_use]
    /// An empty session using the configured depth bound and debounce delay.
    pub fn from_config(cfg: &Config) -> Self {
        Self::new(Extractor::new(cfg.max_depth), cfg.debounce())
    }

    /// Replace the session's notes with those extracted from `root`.
    ///
    /// Filter choices survive, but the selection and drafts are cleared, and so are the notes
    /// from any previous board, even if this extraction fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree exceeds the extractor's depth bound.
    pub fn load(&mut self, root: &DocumentNode) -> Result<usize> {
        self.notes.clear();
        self.selected.clear();
        self.drafts = None;

        self.notes = self.extractor.extract(root)?;
        Ok(self.notes.len())
    }

    #[must_use]
    /// Every extracted note, in document order.
    pub fn notes(&self) -> &NoteMap {
        &self.notes
    }

    #[must_use]
    /// The current filter.
    pub fn filter(&self) -> &FilterSelection {
        &self.filter
    }

    /// Restrict visible notes to these sections (empty shows all).
    pub fn set_section_filter<I, S>(&mut self, sections: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter.set_sections(sections);
    }

    /// Restrict visible notes to these hex colors (empty shows all).
    pub fn set_color_filter<I, S>(&mut self, colors: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter.set_colors(colors);
    }

    #[must_use]
    /// Notes passing the filter, in document order.
    pub fn visible(&self) -> Vec<&NoteRecord> {
        filter::filter(self.notes.values(), &self.filter)
    }

    #[must_use]
    /// Section choices across all notes.
    pub fn section_options(&self) -> Vec<FilterOption> {
        filter::section_options(self.notes.values())
    }

    #[must_use]
    /// Color choices across all notes.
    pub fn color_options(&self) -> Vec<FilterOption> {
        filter::color_options(self.notes.values())
    }

    /// Flip the selection of note `id`, returning whether it is now selected.
    ///
    /// Ids not on the board are ignored.
    pub fn toggle_note(&mut self, id: &str) -> bool {
        if !self.notes.contains_key(id) {
            log::warn!("cannot select unknown note {id}");
            return false;
        }

        self.drafts = None;
        if self.selected.shift_remove(id) {
            false
        } else {
            self.selected.insert(id.to_string());
            true
        }
    }

    /// Select note `id`, leaving it selected if it already was.
    ///
    /// Returns `false` for ids not on the board.
    pub fn select_note(&mut self, id: &str) -> bool {
        if !self.notes.contains_key(id) {
            log::warn!("cannot select unknown note {id}");
            return false;
        }

        if self.selected.insert(id.to_string()) {
            self.drafts = None;
        }
        true
    }

    /// Select every visible note, or clear the selection if they are all selected already.
    pub fn toggle_all_visible(&mut self) {
        let visible: Vec<String> = self.visible().iter().map(|note| note.id.clone()).collect();
        let all_selected =
            !visible.is_empty() && visible.iter().all(|id| self.selected.contains(id));

        self.drafts = None;
        if all_selected {
            self.selected.clear();
        } else {
            self.selected = visible.into_iter().collect();
        }
    }

    #[must_use]
    /// Whether note `id` is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    #[must_use]
    /// Number of selected notes.
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Build fresh drafts from the selected notes that are currently visible.
    ///
    /// Drafts follow visible (document) order, not selection order, and replace any drafts from
    /// an earlier configure.
    pub fn configure(&mut self) -> &mut DraftStore {
        let chosen: Vec<&NoteRecord> = self
            .visible()
            .into_iter()
            .filter(|note| self.selected.contains(&note.id))
            .collect();
        log::debug!("configuring {} draft(s)", chosen.len());

        let store = DraftStore::from_notes(chosen, self.debounce);
        self.drafts.insert(store)
    }

    #[must_use]
    /// Drafts from the last configure, if the selection has not changed since.
    pub fn drafts(&self) -> Option<&DraftStore> {
        self.drafts.as_ref()
    }

    /// Mutable access to the current drafts.
    pub fn drafts_mut(&mut self) -> Option<&mut DraftStore> {
        self.drafts.as_mut()
    }
}

#[cfg(test)]
#[path = "tests/session.rs"]
mod tests;

//! Issue drafts derived from note text, and the store that edits them.
//!
//! The first line of a note becomes the issue title and everything after it the description.
//! Drafts stay editable until the tracker collaborator consumes them; edits go through
//! [`DraftStore`], which changes one field of one draft in place and tells its [`DraftSink`]
//! about the new state of the whole list once the edit burst for that draft has gone quiet.

use crate::debounce::KeyedDebouncer;
use crate::error::BridgeError;
use crate::note::NoteRecord;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

/// Title used when the first line of a note is blank.
pub const UNTITLED: &str = "Untitled Issue";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Editable issue fields for one selected note.
pub struct IssueDraft {
    /// Id of the source note.
    pub id: String,
    /// Issue title.
    pub title: String,
    /// Issue body.
    pub description: String,
    original_text: String,
    /// Tracker label ids, supplied by the caller.
    pub label_ids: Vec<String>,
}

impl IssueDraft {
    #[must_use]
    /// Split a note's text into title and description.
    pub fn from_note(note: &NoteRecord) -> Self {
        let (title, description) = split_text(&note.raw_text);
        Self {
            id: note.id.clone(),
            title: title.to_string(),
            description: description.to_string(),
            original_text: note.raw_text.clone(),
            label_ids: Vec::new(),
        }
    }

    #[must_use]
    /// The note text the draft was created from, never edited.
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    #[must_use]
    /// Current value of an editable field.
    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Title => &self.title,
            DraftField::Description => &self.description,
        }
    }

    fn set(&mut self, field: DraftField, value: String) {
        match field {
            DraftField::Title => self.title = value,
            DraftField::Description => self.description = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// The draft fields a user may edit.
pub enum DraftField {
    /// [`IssueDraft::title`].
    Title,
    /// [`IssueDraft::description`].
    Description,
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Title => "title",
            Self::Description => "description",
        })
    }
}

impl FromStr for DraftField {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "description" => Ok(Self::Description),
            other => Err(BridgeError::UnknownField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single field edit written as `ID.FIELD=VALUE`.
pub struct FieldEdit {
    /// Draft (note) id.
    pub id: String,
    /// Field to replace.
    pub field: DraftField,
    /// New value; may contain `=` and be empty.
    pub value: String,
}

impl FromStr for FieldEdit {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || BridgeError::MalformedEdit(s.to_string());
        let (target, value) = s.split_once('=').ok_or_else(malformed)?;
        let (id, field) = target.rsplit_once('.').ok_or_else(malformed)?;
        if id.is_empty() {
            return Err(malformed());
        }

        Ok(Self {
            id: id.to_string(),
            field: field.parse()?,
            value: value.to_string(),
        })
    }
}

/// Title and description of a note text: split at the first newline only.
fn split_text(raw: &str) -> (&str, &str) {
    let (head, tail) = raw.split_once('\n').unwrap_or((raw, ""));
    let title = if head.trim().is_empty() { UNTITLED } else { head };
    (title, tail)
}

#[must_use]
/// One draft per note, in the order given.
pub fn build_initial<'a, I>(notes: I) -> Vec<IssueDraft>
where
    I: IntoIterator<Item = &'a NoteRecord>,
{
    notes.into_iter().map(IssueDraft::from_note).collect()
}

#[must_use]
/// A copy of `drafts` with one field of the draft `id` replaced.
///
/// All other drafts and fields are carried over unchanged. An unknown `id` returns an unchanged
/// copy.
pub fn update_field(
    drafts: &[IssueDraft],
    id: &str,
    field: DraftField,
    value: &str,
) -> Vec<IssueDraft> {
    let mut updated = drafts.to_vec();
    set_field(&mut updated, id, field, value);
    updated
}

/// Replace one field of the draft `id` in place, reporting whether such a draft exists.
pub fn set_field(drafts: &mut [IssueDraft], id: &str, field: DraftField, value: &str) -> bool {
    match drafts.iter_mut().find(|draft| draft.id == id) {
        Some(draft) => {
            draft.set(field, value.to_string());
            true
        }
        None => false,
    }
}

/// Receives the complete draft list after coalesced edits.
pub trait DraftSink {
    /// Called with every draft, not just the edited one.
    fn drafts_changed(&mut self, drafts: &[IssueDraft]);
}

impl<F: FnMut(&[IssueDraft])> DraftSink for F {
    fn drafts_changed(&mut self, drafts: &[IssueDraft]) {
        self(drafts);
    }
}

#[derive(Debug)]
/// Owned, editable draft list with debounced change notification.
///
/// Each draft has its own debounce channel, so a burst of keystrokes in one draft produces one
/// notification and never delays or swallows the notification for another draft.
pub struct DraftStore {
    drafts: Vec<IssueDraft>,
    notifier: KeyedDebouncer<String, DraftField>,
}

impl DraftStore {
    #[must_use]
    /// A store over `drafts` notifying after `delay` of quiet per draft.
    pub fn new(drafts: Vec<IssueDraft>, delay: Duration) -> Self {
        Self {
            drafts,
            notifier: KeyedDebouncer::new(delay),
        }
    }

    #[must_use]
    /// A store with fresh drafts for `notes`.
    pub fn from_notes<'a, I>(notes: I, delay: Duration) -> Self
    where
        I: IntoIterator<Item = &'a NoteRecord>,
    {
        Self::new(build_initial(notes), delay)
    }

    #[must_use]
    /// Current drafts.
    pub fn drafts(&self) -> &[IssueDraft] {
        &self.drafts
    }

    #[must_use]
    /// The draft for note `id`.
    pub fn get(&self, id: &str) -> Option<&IssueDraft> {
        self.drafts.iter().find(|draft| draft.id == id)
    }

    /// Edit one field of one draft and schedule a notification for it.
    ///
    /// Returns `false`, changing nothing, if no draft has this `id`.
    pub fn update_field(&mut self, id: &str, field: DraftField, value: &str, now: Instant) -> bool {
        if !set_field(&mut self.drafts, id, field, value) {
            log::warn!("ignoring edit to {field} of unknown draft {id}");
            return false;
        }
        self.notifier.push(id.to_string(), field, now);
        true
    }

    /// Apply the same tracker labels to every draft.
    pub fn set_label_ids(&mut self, label_ids: &[String]) {
        for draft in &mut self.drafts {
            draft.label_ids = label_ids.to_vec();
        }
    }

    /// Deliver notifications whose quiet period has elapsed by `now`.
    ///
    /// Returns how many notifications were sent.
    pub fn poll(&mut self, now: Instant, sink: &mut impl DraftSink) -> usize {
        let ready = self.notifier.poll(now);
        self.deliver(ready.len(), sink)
    }

    /// Deliver every pending notification immediately.
    pub fn flush(&mut self, sink: &mut impl DraftSink) -> usize {
        let ready = self.notifier.flush_all();
        self.deliver(ready.len(), sink)
    }

    #[must_use]
    /// When the next pending notification falls due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.notifier.next_deadline()
    }

    #[must_use]
    /// Consume the store, dropping pending notifications.
    pub fn into_drafts(self) -> Vec<IssueDraft> {
        self.drafts
    }

    fn deliver(&self, count: usize, sink: &mut impl DraftSink) -> usize {
        for _ in 0..count {
            sink.drafts_changed(&self.drafts);
        }
        if count > 0 {
            log::debug!("notified {count} coalesced draft change(s)");
        }
        count
    }
}

#[cfg(test)]
#[path = "tests/draft.rs"]
mod tests;

//! Request bodies for the issue tracker collaborator.
//!
//! The drafts say what the user wants filed; this module shapes them into the payload the
//! tracker endpoint accepts and, when the board is known, appends a link back to the source
//! note. Sending the request is the caller's business.

use crate::draft::IssueDraft;
use crate::error::{BridgeError, Result};
use serde::Serialize;

/// Characters of the original note text quoted in the back-link.
pub const EXCERPT_CHARS: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Body of one create-issue request.
pub struct IssueRequest {
    /// Issue title.
    pub title: String,
    /// Issue body, including the back-link when one was requested.
    pub description: String,
    /// Tracker label ids.
    pub label_ids: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
/// Where the source notes live, for linking issues back to them.
pub struct BackLink<'a> {
    /// Origin of the whiteboard app, e.g. `https://www.figma.com`.
    pub base_url: &'a str,
    /// Board file key.
    pub file_key: &'a str,
}

impl BackLink<'_> {
    #[must_use]
    /// Markdown footer pointing at the note a draft came from.
    pub fn footer(&self, draft: &IssueDraft) -> String {
        let excerpt: String = draft.original_text().chars().take(EXCERPT_CHARS).collect();
        format!(
            "\n\n---\n_Imported from FigJam: [{excerpt}...]({}/file/{}?node-id={})_",
            self.base_url.trim_end_matches('/'),
            self.file_key,
            draft.id,
        )
    }
}

/// Shape one draft into a create-issue request.
///
/// # Errors
///
/// Returns [`BridgeError::EmptyTitle`] if the title is empty, which the tracker rejects.
pub fn issue_request(draft: &IssueDraft, link: Option<BackLink<'_>>) -> Result<IssueRequest> {
    if draft.title.is_empty() {
        return Err(BridgeError::EmptyTitle(draft.id.clone()));
    }

    let mut description = draft.description.clone();
    if let Some(link) = link {
        description.push_str(&link.footer(draft));
    }

    Ok(IssueRequest {
        title: draft.title.clone(),
        description,
        label_ids: draft.label_ids.clone(),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Requests for the drafts the tracker will accept, and the ids of those it would not.
pub struct RequestBatch {
    /// Requests in draft order.
    pub ready: Vec<IssueRequest>,
    /// Ids of drafts left out, in draft order.
    pub rejected: Vec<String>,
}

#[must_use]
/// Shape every draft on its own; a rejected draft does not hold back the rest.
pub fn issue_requests(drafts: &[IssueDraft], link: Option<BackLink<'_>>) -> RequestBatch {
    let mut batch = RequestBatch::default();
    for draft in drafts {
        match issue_request(draft, link) {
            Ok(request) => batch.ready.push(request),
            Err(err) => {
                log::warn!("skipping draft: {err}");
                batch.rejected.push(draft.id.clone());
            }
        }
    }
    batch
}

#[cfg(test)]
#[path = "tests/tracker.rs"]
mod tests;

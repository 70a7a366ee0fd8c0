//! Error types for ingestion, extraction and request building.

/// Result type alias using [`BridgeError`].
pub type Result<T> = std::result::Result<T, BridgeError>;

#[derive(Debug, thiserror::Error)]
/// Failures that stop a pass over a whiteboard export.
pub enum BridgeError {
    /// The export is not valid JSON or does not have the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The export parsed but carries neither a `document` root nor a `nodes` map.
    #[error("export has no document root or nodes map")]
    MissingDocument,

    /// The tree nests deeper than the configured bound.
    #[error("document tree exceeds maximum depth of {max_depth} at node {node_id}")]
    DepthExceeded {
        /// Configured nesting bound.
        max_depth: usize,
        /// Node at which the bound was crossed.
        node_id: String,
    },

    /// A draft field name did not name an editable field.
    #[error("unknown draft field {0:?} (expected \"title\" or \"description\")")]
    UnknownField(String),

    /// A `--set` edit was not of the form `ID.FIELD=VALUE`.
    #[error("malformed edit {0:?} (expected ID.FIELD=VALUE)")]
    MalformedEdit(String),

    /// The tracker refuses issues without a title.
    #[error("draft {0} has an empty title")]
    EmptyTitle(String),

    /// I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

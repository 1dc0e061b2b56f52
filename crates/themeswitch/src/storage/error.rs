//! Storage errors.

use std::path::PathBuf;

/// Error returned by a [`PreferenceStore`](super::PreferenceStore).
///
/// None of these are fatal to the controller: it logs them and carries on
/// with in-memory state.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backing store cannot be reached at all (no window, no config dir).
    #[error("preference storage unavailable: {0}")]
    Unavailable(String),

    /// The store refused the write (quota exceeded, privacy mode, read-only).
    #[error("write of key '{key}' rejected: {reason}")]
    WriteRejected { key: String, reason: String },

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store file exists but is not a JSON object of strings.
    #[error("malformed store file {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

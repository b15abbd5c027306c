//! Error types shared by the coordinators and their collaborators.

use std::path::PathBuf;

/// Raised when a theme mode name is not one of `light`, `dark` or `system`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid theme mode '{0}' (expected light, dark or system)")]
pub struct InvalidModeError(pub String);

/// Failures reported by a [`PreferenceStore`](crate::PreferenceStore).
///
/// The coordinators never propagate these; they log and carry on with
/// in-memory state.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("preference storage is unavailable")]
    Unavailable,

    #[error("failed to access preference file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed preference file {path}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

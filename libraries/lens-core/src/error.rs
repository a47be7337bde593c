/// Core error types for Playlist Lens
use thiserror::Error;

use crate::types::PlaylistUuid;

/// Result type alias using `LensError`
pub type Result<T> = std::result::Result<T, LensError>;

/// Core error type for Playlist Lens.
///
/// All variants are `Clone` so results can be fanned out through shared
/// lookup futures to every concurrent caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LensError {
    /// A call into the host application failed
    #[error("Host call failed: {0}")]
    Host(String),

    /// No target playlists were selected for an add operation
    #[error("No playlists selected")]
    EmptySelection,

    /// Playlist not found
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(PlaylistUuid),

    /// Other internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LensError {
    /// Create a host-call error
    pub fn host(msg: impl Into<String>) -> Self {
        Self::Host(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

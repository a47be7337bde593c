/// Host capability traits for Playlist Lens
///
/// The host application owns state, networking, and UI. Each capability the
/// plugin consumes is a narrow trait so the data logic can be tested against
/// in-memory fakes.
use crate::error::Result;
use crate::types::{PlaylistEntry, PlaylistSummary, PlaylistUuid, TrackDetails, TrackId, UserId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Read-side host capability: state snapshot and per-playlist item fetches.
#[async_trait]
pub trait PlaylistSource: Send + Sync {
    /// Identity of the currently signed-in user, if the host knows one.
    ///
    /// `Ok(None)` is a normal outcome; callers must fail safe to "no
    /// membership" rather than surface another user's data.
    async fn current_user(&self) -> Result<Option<UserId>>;

    /// Snapshot of the full playlist collection visible to the host
    async fn playlists(&self) -> Result<Vec<PlaylistSummary>>;

    /// Fetch the ordered item list of one playlist
    async fn playlist_items(&self, playlist: &PlaylistUuid) -> Result<Vec<PlaylistEntry>>;

    /// Resolve a track to a rich object, best-effort.
    ///
    /// Used only for secondary enrichment (metadata fallback, notification
    /// text); callers swallow failures.
    async fn track_details(&self, track: &TrackId) -> Result<Option<TrackDetails>>;
}

/// Where to insert added items in the target playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddPosition {
    /// Append at the end of the playlist
    End,
    /// Insert at the start of the playlist
    Start,
}

/// How the host should treat items already present in the target playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Skip items already in the playlist
    Skip,
    /// Add regardless, producing duplicates
    Add,
}

/// Options accompanying an add-to-playlist write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOptions {
    /// Insertion position
    pub position: AddPosition,

    /// Duplicate handling policy
    pub on_duplicate: DuplicatePolicy,

    /// Suppress the host's own per-add notification toast
    pub suppress_notification: bool,
}

impl Default for AddOptions {
    fn default() -> Self {
        Self {
            position: AddPosition::End,
            on_duplicate: DuplicatePolicy::Skip,
            suppress_notification: true,
        }
    }
}

/// Write-side host capability: add media items to a playlist.
#[async_trait]
pub trait PlaylistWriter: Send + Sync {
    /// Add the given tracks to one playlist
    async fn add_to_playlist(
        &self,
        playlist: &PlaylistUuid,
        tracks: &[TrackId],
        options: &AddOptions,
    ) -> Result<()>;
}

/// Host context-menu surface consumed by the plugin.
pub trait ContextMenuHost: Send + Sync {
    /// Close the currently open context menu, if any
    fn close_menu(&self);
}

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Soft success notice
    Info,
    /// Something went partially or fully wrong
    Warning,
}

/// Host notification surface (toasts). Rendering is host glue; the plugin
/// only hands over level and message.
pub trait Notifier: Send + Sync {
    /// Show a notice to the user
    fn notify(&self, level: NoticeLevel, message: &str);
}

/// Host-driven playlist selection (the "add to which playlists?" modal).
///
/// Returns the chosen target uuids; an empty selection is representable and
/// the orchestrator rejects it before any write.
#[async_trait]
pub trait PlaylistPicker: Send + Sync {
    /// Let the user pick target playlists out of their own collection
    async fn pick(&self, playlists: &[PlaylistSummary]) -> Result<Vec<PlaylistUuid>>;
}

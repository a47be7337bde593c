/// Membership result types
use crate::types::PlaylistRef;
use serde::{Deserialize, Serialize};

/// Which of the current user's playlists contain a given track.
///
/// Immutable once constructed; the resolver caches one per track id until
/// explicitly invalidated. Playlist order follows enumeration order of the
/// host snapshot and is not otherwise deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    /// Whether the track appears in at least one owned playlist
    pub in_playlists: bool,

    /// The owned playlists containing the track
    pub playlists: Vec<PlaylistRef>,
}

impl Membership {
    /// Build a membership result from the containing playlists
    pub fn from_playlists(playlists: Vec<PlaylistRef>) -> Self {
        Self {
            in_playlists: !playlists.is_empty(),
            playlists,
        }
    }

    /// Membership in no playlist (also the identity-undetermined fail-safe)
    pub fn none() -> Self {
        Self {
            in_playlists: false,
            playlists: Vec::new(),
        }
    }

    /// Human-readable summary for row tooltips
    pub fn summary(&self) -> String {
        if self.playlists.is_empty() {
            "Not in any of your playlists".to_string()
        } else {
            let titles: Vec<&str> = self.playlists.iter().map(|p| p.title.as_str()).collect();
            format!("In {} playlist(s): {}", titles.len(), titles.join(", "))
        }
    }
}

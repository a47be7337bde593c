/// Playlist domain types
use crate::types::{PlaylistUuid, TrackId, UserId};
use serde::{Deserialize, Serialize};

/// Lightweight reference to a playlist, as carried in membership results.
///
/// `uuid` is the stable key; `title` is display-only and may be stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistRef {
    /// Stable playlist identifier
    pub uuid: PlaylistUuid,

    /// Display title at the time the reference was taken
    pub title: String,
}

impl PlaylistRef {
    /// Create a new playlist reference
    pub fn new(uuid: PlaylistUuid, title: impl Into<String>) -> Self {
        Self {
            uuid,
            title: title.into(),
        }
    }
}

/// One playlist row from the host's state snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    /// Stable playlist identifier
    pub uuid: PlaylistUuid,

    /// Display title
    pub title: String,

    /// Creator of the playlist, when the host reports one
    pub creator: Option<UserId>,

    /// Number of items the host believes the playlist holds
    pub item_count: Option<u32>,
}

impl PlaylistSummary {
    /// Whether this playlist is owned by the given user.
    ///
    /// Playlists with no reported creator are never treated as owned;
    /// membership must not leak another user's playlists.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        self.creator.as_ref() == Some(user)
    }

    /// Reduce to a display reference
    pub fn to_ref(&self) -> PlaylistRef {
        PlaylistRef::new(self.uuid.clone(), self.title.clone())
    }
}

/// One item from a playlist's fetched item list.
///
/// Hosts are inconsistent about which field carries the track reference, so
/// every plausible identifier field is kept and matched in a fixed order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    /// Primary id of the entry
    pub id: Option<String>,

    /// Media-item id, when the entry wraps a media item
    pub media_item_id: Option<String>,

    /// Track id, when carried separately from the primary id
    pub track_id: Option<String>,

    /// Item id, some hosts use this for the wrapped payload
    pub item_id: Option<String>,

    /// Product id (catalog/regional variants)
    pub product_id: Option<String>,

    /// Entry title, used only by the metadata fallback
    pub title: Option<String>,

    /// Primary artist name, used only by the metadata fallback
    pub artist: Option<String>,
}

impl PlaylistEntry {
    /// Candidate identifier fields in match priority order
    pub fn candidate_ids(&self) -> impl Iterator<Item = &str> {
        [
            self.id.as_deref(),
            self.media_item_id.as_deref(),
            self.track_id.as_deref(),
            self.item_id.as_deref(),
            self.product_id.as_deref(),
        ]
        .into_iter()
        .flatten()
    }

    /// Whether any candidate field matches the target track id
    pub fn matches_track(&self, track: &TrackId) -> bool {
        self.candidate_ids().any(|id| id == track.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ownership_requires_matching_creator() {
        let me = UserId::new("me");
        let other = UserId::new("other");

        let mine = PlaylistSummary {
            uuid: PlaylistUuid::new("a"),
            title: "Mine".to_string(),
            creator: Some(me.clone()),
            item_count: Some(3),
        };
        let theirs = PlaylistSummary {
            uuid: PlaylistUuid::new("b"),
            title: "Theirs".to_string(),
            creator: Some(other),
            item_count: None,
        };
        let anonymous = PlaylistSummary {
            uuid: PlaylistUuid::new("c"),
            title: "No creator".to_string(),
            creator: None,
            item_count: None,
        };

        assert!(mine.is_owned_by(&me));
        assert!(!theirs.is_owned_by(&me));
        assert!(!anonymous.is_owned_by(&me));
    }

    #[test]
    fn entry_matches_any_candidate_field() {
        let track = TrackId::new("123");

        let by_media_item = PlaylistEntry {
            media_item_id: Some("123".to_string()),
            ..PlaylistEntry::default()
        };
        let by_product = PlaylistEntry {
            id: Some("999".to_string()),
            product_id: Some("123".to_string()),
            ..PlaylistEntry::default()
        };
        let no_match = PlaylistEntry {
            id: Some("456".to_string()),
            ..PlaylistEntry::default()
        };

        assert!(by_media_item.matches_track(&track));
        assert!(by_product.matches_track(&track));
        assert!(!no_match.matches_track(&track));
    }
}

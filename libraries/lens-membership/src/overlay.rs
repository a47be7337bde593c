//! Recent-add override overlay.
//!
//! The host's backing data can lag behind a just-performed add. Each
//! successful add records a `(track, playlist)` entry here; until the entry
//! expires, display code unions it into the resolver's view so the change is
//! visible immediately. Optimistic and never authoritative.

use lens_core::clock::Clock;
use lens_core::types::{Membership, PlaylistRef, PlaylistUuid, TrackId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::debug;

struct OverrideEntry {
    playlist: PlaylistRef,
    expires_at: Instant,
}

/// Self-expiring `(track, playlist)` override set.
///
/// Each entry expires `ttl` after being recorded, independently of other
/// entries for the same track; a track's set is dropped once empty.
pub struct RecentOverrides {
    clock: Arc<dyn Clock>,
    ttl: Duration,
    entries: Mutex<HashMap<TrackId, HashMap<PlaylistUuid, OverrideEntry>>>,
}

impl RecentOverrides {
    /// Create an overlay with the given clock and per-entry time-to-live
    pub fn new(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            clock,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Record a just-performed add. Re-recording an existing pair restarts
    /// its expiry window.
    pub fn record(&self, track: &TrackId, playlist: PlaylistRef) {
        let expires_at = self.clock.now() + self.ttl;
        debug!(track = %track, playlist = %playlist.uuid, "Recording recent-add override");

        let mut entries = self.entries.lock().unwrap();
        entries.entry(track.clone()).or_default().insert(
            playlist.uuid.clone(),
            OverrideEntry {
                playlist,
                expires_at,
            },
        );
    }

    /// Unexpired override refs for one track, purging what has lapsed.
    pub fn active(&self, track: &TrackId) -> Vec<PlaylistRef> {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap();

        let Some(for_track) = entries.get_mut(track) else {
            return Vec::new();
        };
        for_track.retain(|_, entry| entry.expires_at > now);

        let active: Vec<PlaylistRef> = for_track
            .values()
            .map(|entry| entry.playlist.clone())
            .collect();
        if for_track.is_empty() {
            entries.remove(track);
        }
        active
    }

    /// Union the overlay for `track` into a resolved membership view.
    ///
    /// Resolver order is preserved; overlay refs not already present are
    /// appended.
    pub fn apply(&self, track: &TrackId, membership: Membership) -> Membership {
        let overlay = self.active(track);
        if overlay.is_empty() {
            return membership;
        }

        let mut playlists = membership.playlists;
        for playlist in overlay {
            if !playlists.iter().any(|p| p.uuid == playlist.uuid) {
                playlists.push(playlist);
            }
        }
        Membership::from_playlists(playlists)
    }

    /// Sweep every track's expired entries
    pub fn purge_expired(&self) {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap();
        entries.retain(|_, for_track| {
            for_track.retain(|_, entry| entry.expires_at > now);
            !for_track.is_empty()
        });
    }

    /// Whether any override is recorded (expired or not yet purged included)
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

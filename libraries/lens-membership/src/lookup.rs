//! Underlying membership computation.
//!
//! One full pass over the current user's own playlists, isolated per-playlist
//! failure handling, and the metadata fallback for tracks whose id differs
//! across catalog contexts.

use lens_core::traits::PlaylistSource;
use lens_core::types::{Membership, PlaylistEntry, PlaylistRef, TrackId};
use lens_core::Result;
use tracing::{debug, warn};

/// Compute which of the current user's playlists contain `track`.
///
/// Fail-safe rules:
/// - undetermined user (absent or errored) yields empty membership, never
///   another user's playlists;
/// - a single playlist's item fetch failing excludes that playlist only.
pub(crate) async fn resolve_membership<S>(source: &S, track: &TrackId) -> Result<Membership>
where
    S: PlaylistSource + ?Sized,
{
    let user = match source.current_user().await {
        Ok(Some(user)) => user,
        Ok(None) => {
            debug!(track = %track, "No current user, treating as no membership");
            return Ok(Membership::none());
        }
        Err(e) => {
            warn!(track = %track, error = %e, "Current user lookup failed, treating as no membership");
            return Ok(Membership::none());
        }
    };

    let playlists = source.playlists().await?;
    let mut containing: Vec<PlaylistRef> = Vec::new();
    let mut fetched: Vec<(PlaylistRef, Vec<PlaylistEntry>)> = Vec::new();

    for playlist in playlists.iter().filter(|p| p.is_owned_by(&user)) {
        match source.playlist_items(&playlist.uuid).await {
            Ok(items) => {
                if items.iter().any(|entry| entry.matches_track(track)) {
                    containing.push(playlist.to_ref());
                } else {
                    fetched.push((playlist.to_ref(), items));
                }
            }
            Err(e) => {
                warn!(
                    playlist = %playlist.uuid,
                    error = %e,
                    "Playlist item fetch failed, excluding from membership"
                );
            }
        }
    }

    // Id matching found nothing: fall back to normalized metadata, which
    // catches regional catalog variants at the cost of title collisions.
    if containing.is_empty() {
        if let Some(details) = source.track_details(track).await.ok().flatten() {
            if let Some(title) = details.title.as_deref() {
                containing = metadata_fallback(&fetched, title, details.artist.as_deref());
                if !containing.is_empty() {
                    debug!(track = %track, hits = containing.len(), "Metadata fallback matched");
                }
            }
        }
    }

    Ok(Membership::from_playlists(containing))
}

/// Match by normalized title, additionally requiring a normalized artist
/// match when both sides carry an artist.
fn metadata_fallback(
    fetched: &[(PlaylistRef, Vec<PlaylistEntry>)],
    title: &str,
    artist: Option<&str>,
) -> Vec<PlaylistRef> {
    let want_title = normalize_metadata(title);
    if want_title.is_empty() {
        return Vec::new();
    }
    let want_artist = artist.map(normalize_metadata);

    fetched
        .iter()
        .filter(|(_, items)| {
            items.iter().any(|entry| {
                let title_hit = entry
                    .title
                    .as_deref()
                    .map(normalize_metadata)
                    .is_some_and(|t| t == want_title);
                if !title_hit {
                    return false;
                }
                match (&want_artist, entry.artist.as_deref().map(normalize_metadata)) {
                    (Some(want), Some(have)) => *want == have,
                    // Either side missing an artist: title alone decides.
                    _ => true,
                }
            })
        })
        .map(|(playlist, _)| playlist.clone())
        .collect()
}

/// Lowercase, strip punctuation, collapse whitespace.
pub(crate) fn normalize_metadata(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;
    for c in s.chars() {
        if c.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.extend(c.to_lowercase());
        } else if c.is_whitespace() {
            pending_space = true;
        }
        // Punctuation is dropped without acting as a separator.
    }
    out
}

//! Domain types shared across the Playlist Lens crates

mod ids;
mod membership;
mod playlist;
mod track;

pub use ids::{PlaylistUuid, TrackId, UserId};
pub use membership::Membership;
pub use playlist::{PlaylistEntry, PlaylistRef, PlaylistSummary};
pub use track::TrackDetails;

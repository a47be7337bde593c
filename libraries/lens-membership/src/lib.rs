//! Playlist Lens Membership
//!
//! The data-logic core of Playlist Lens: resolving "which of my playlists
//! already contain this track", masking host-side staleness after an add,
//! and orchestrating multi-playlist adds.
//!
//! - [`MembershipResolver`] — cached lookups with in-flight fan-in and a
//!   FIFO admission gate bounding concurrent host calls.
//! - [`RecentOverrides`] — self-expiring `(track, playlist)` overlay unioned
//!   into displayed membership right after an add.
//! - [`PlaylistAdder`] — one write per target playlist with isolated
//!   failures, overlay recording, and cache invalidation.
//!
//! Everything here is host-call-mediated through the `lens-core` capability
//! traits and fully testable without a rendered document.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod lookup;
mod orchestrator;
mod overlay;
mod resolver;

pub use orchestrator::{AddOutcome, AddReport, PlaylistAdder};
pub use overlay::RecentOverrides;
pub use resolver::MembershipResolver;

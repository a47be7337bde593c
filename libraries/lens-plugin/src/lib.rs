//! Playlist Lens Plugin
//!
//! Assembles the membership resolver, recent-add overlay, playlist-add
//! orchestrator, and row annotation pipeline against a host environment,
//! and exposes the two host-facing entry points:
//!
//! - [`Plugin::handle_add_to_playlists`] — the context-menu click handler
//! - [`Plugin::scope`] — the lifecycle scope the host disposes on unload
//!
//! All state is in-memory and rebuilt from host state and document scans on
//! each load; nothing persists across restarts.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod plugin;

pub use plugin::{HostEnv, Plugin};

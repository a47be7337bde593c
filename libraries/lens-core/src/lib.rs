//! Playlist Lens Core
//!
//! Domain types, host capability traits, and error handling shared by the
//! Playlist Lens crates.
//!
//! The host music application owns state, networking, and the rendered
//! document. This crate defines:
//! - **Domain Types**: `TrackId`, `PlaylistRef`, `Membership`, etc.
//! - **Capability Traits**: `PlaylistSource`, `PlaylistWriter`, `Notifier`,
//!   `PlaylistPicker`, `ContextMenuHost`, `Clock`
//! - **Error Handling**: unified `LensError` and `Result` types
//! - **Lifecycle**: the teardown scope the host disposes on plugin unload

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod clock;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod traits;
pub mod types;

// Re-export commonly used items
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::LensConfig;
pub use error::{LensError, Result};
pub use lifecycle::LifecycleScope;
pub use traits::{
    AddOptions, AddPosition, ContextMenuHost, DuplicatePolicy, NoticeLevel, Notifier,
    PlaylistPicker, PlaylistSource, PlaylistWriter,
};
pub use types::{
    Membership, PlaylistEntry, PlaylistRef, PlaylistSummary, PlaylistUuid, TrackDetails, TrackId,
    UserId,
};

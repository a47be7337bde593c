//! Playlist Lens Annotate
//!
//! DOM-side glue for Playlist Lens: a generic "watch for matching elements,
//! deliver each exactly once" observation utility over an abstract host
//! document, track-id extraction from heterogeneous row markup, and the row
//! annotation pipeline that turns resolver output into row attributes and
//! tooltips.
//!
//! Connected to the data logic only through the `MembershipResolver`
//! contract, so both layers test independently.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod dom;
pub mod extract;
pub mod observe;
pub mod pipeline;

pub use dom::{HostDocument, HostElement, InsertionCallback, WatchGuard};
pub use extract::{extract_track_id, ExtractionRules};
pub use observe::observe;
pub use pipeline::{
    AnnotationPipeline, RowAnnotator, COUNT_ATTR, IN_PLAYLISTS_ATTR, PROCESSED_ATTR, TOOLTIP_ATTR,
};

/// Track domain types
use crate::types::TrackId;
use serde::{Deserialize, Serialize};

/// Rich track details resolved from the host, best-effort.
///
/// Only consulted by the metadata fallback and for nicer log/notification
/// text; every field besides the id may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackDetails {
    /// The track id the details were resolved for
    pub id: TrackId,

    /// Track title
    pub title: Option<String>,

    /// Primary artist name
    pub artist: Option<String>,
}

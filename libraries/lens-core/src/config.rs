/// Plugin configuration
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for the membership and annotation pipelines.
///
/// Deserializable so a host settings panel can hand one over; `Default`
/// matches shipped behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LensConfig {
    /// Maximum concurrent membership lookups against the host
    pub concurrency_limit: usize,

    /// Seconds a recent-add override stays active
    pub override_ttl_secs: u64,

    /// Seconds between periodic row rescans
    pub rescan_interval_secs: u64,

    /// Selector matching annotatable track rows in the host document
    pub row_selector: String,

    /// Selector of the title cell searched first for a track id
    pub title_cell_selector: String,

    /// Id-bearing attribute on the title cell
    pub title_cell_attr: String,

    /// Id-bearing attributes checked on a row and then its descendants, in
    /// priority order
    pub id_attributes: Vec<String>,

    /// Path marker of a track detail link, followed by the numeric id
    pub track_link_marker: String,
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: 5,
            override_ttl_secs: 120,
            rescan_interval_secs: 10,
            row_selector: "[data-type=\"mediaItem\"]".to_string(),
            title_cell_selector: "[data-test=\"table-cell-title\"]".to_string(),
            title_cell_attr: "data-track-id".to_string(),
            id_attributes: vec![
                "data-track-id".to_string(),
                "data-media-item-id".to_string(),
                "data-item-id".to_string(),
                "data-product-id".to_string(),
            ],
            track_link_marker: "/track/".to_string(),
        }
    }
}

impl LensConfig {
    /// Override time-to-live as a duration
    pub fn override_ttl(&self) -> Duration {
        Duration::from_secs(self.override_ttl_secs)
    }

    /// Rescan interval as a duration
    pub fn rescan_interval(&self) -> Duration {
        Duration::from_secs(self.rescan_interval_secs)
    }
}

//! Track identifier extraction from heterogeneous row markup.
//!
//! Hosts render track rows inconsistently across views, so extraction tries
//! a prioritized list of strategies and treats total failure as a terminal,
//! non-error outcome for that row.

use crate::dom::HostElement;
use lens_core::types::TrackId;
use lens_core::LensConfig;

/// Where to look for a track id in a row, in priority order.
#[derive(Debug, Clone)]
pub struct ExtractionRules {
    /// Selector of the title cell inside a row
    pub title_cell_selector: String,

    /// Id-bearing attribute on the title cell
    pub title_cell_attr: String,

    /// Id-bearing attributes checked on the row and then its descendants
    pub id_attributes: Vec<String>,

    /// Path marker of a track detail link, followed by the numeric id
    pub track_link_marker: String,
}

impl ExtractionRules {
    /// Take the configured attribute names and selectors
    pub fn from_config(config: &LensConfig) -> Self {
        Self {
            title_cell_selector: config.title_cell_selector.clone(),
            title_cell_attr: config.title_cell_attr.clone(),
            id_attributes: config.id_attributes.clone(),
            track_link_marker: config.track_link_marker.clone(),
        }
    }
}

impl Default for ExtractionRules {
    fn default() -> Self {
        Self::from_config(&LensConfig::default())
    }
}

/// Try each strategy in order; `None` means this row carries no usable id.
pub fn extract_track_id<E: HostElement>(row: &E, rules: &ExtractionRules) -> Option<TrackId> {
    // (a) known title-cell attribute
    for cell in row.query_all(&rules.title_cell_selector) {
        if let Some(id) = non_empty(cell.attribute(&rules.title_cell_attr)) {
            return Some(TrackId::new(id));
        }
    }

    // (b) prioritized id attributes, row first, then descendants
    for attr in &rules.id_attributes {
        if let Some(id) = non_empty(row.attribute(attr)) {
            return Some(TrackId::new(id));
        }
    }
    for attr in &rules.id_attributes {
        for element in row.query_all(&format!("[{attr}]")) {
            if let Some(id) = non_empty(element.attribute(attr)) {
                return Some(TrackId::new(id));
            }
        }
    }

    // (c) track detail link with a trailing numeric id
    for href in row.link_targets() {
        if let Some(id) = trailing_track_id(&href, &rules.track_link_marker) {
            return Some(id);
        }
    }

    None
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Parse the numeric id following the track path marker, e.g.
/// `/track/123456?context=album` yields `123456`.
fn trailing_track_id(href: &str, marker: &str) -> Option<TrackId> {
    let (_, rest) = href.split_once(marker)?;
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        None
    } else {
        Some(TrackId::new(digits))
    }
}

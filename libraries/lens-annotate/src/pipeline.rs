//! Row annotation pipeline.
//!
//! Consumes the observation utility and the membership resolver: locate a
//! track id in each row, resolve membership (overlay applied), and write
//! machine-readable attributes plus a tooltip. Every side effect is gated on
//! the processing mark so the mutation watcher and the periodic rescan can
//! both feed the same rows.

use crate::dom::{HostDocument, HostElement};
use crate::extract::{extract_track_id, ExtractionRules};
use crate::observe::observe;
use lens_core::traits::PlaylistSource;
use lens_core::types::Membership;
use lens_core::LifecycleScope;
use lens_membership::{MembershipResolver, RecentOverrides};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Marks a row as handled; a marked row is never reprocessed while the node
/// survives.
pub const PROCESSED_ATTR: &str = "data-lens-processed";

/// Machine-readable membership flag written to annotated rows
pub const IN_PLAYLISTS_ATTR: &str = "data-lens-in-playlists";

/// Machine-readable containing-playlist count written to annotated rows
pub const COUNT_ATTR: &str = "data-lens-playlist-count";

/// Human-readable summary attribute (the row tooltip)
pub const TOOLTIP_ATTR: &str = "title";

/// Annotates one row at a time against the resolver and overlay.
pub struct RowAnnotator<S> {
    resolver: Arc<MembershipResolver<S>>,
    overrides: Arc<RecentOverrides>,
    rules: ExtractionRules,
}

impl<S: PlaylistSource + 'static> RowAnnotator<S> {
    /// Create an annotator with the given extraction rules
    pub fn new(
        resolver: Arc<MembershipResolver<S>>,
        overrides: Arc<RecentOverrides>,
        rules: ExtractionRules,
    ) -> Self {
        Self {
            resolver,
            overrides,
            rules,
        }
    }

    /// The resolver this annotator consults
    pub fn resolver(&self) -> &Arc<MembershipResolver<S>> {
        &self.resolver
    }

    /// Process one row candidate.
    ///
    /// Marked rows are skipped. An extraction miss marks the row and stops;
    /// a hit marks the row, resolves membership, and annotates on success.
    /// A resolver failure is logged and the row stays unannotated, without
    /// retry.
    pub async fn process<E: HostElement>(&self, row: &E) {
        if row.attribute(PROCESSED_ATTR).is_some() {
            return;
        }

        let Some(track) = extract_track_id(row, &self.rules) else {
            // Terminal: no id derivable from this row, don't keep trying.
            row.set_attribute(PROCESSED_ATTR, "1");
            return;
        };
        row.set_attribute(PROCESSED_ATTR, "1");

        match self.resolver.membership(&track).await {
            Ok(membership) => {
                let displayed = self.overrides.apply(&track, membership);
                Self::annotate(row, &displayed);
            }
            Err(e) => {
                warn!(track = %track, error = %e, "Membership lookup failed, row left unannotated");
            }
        }
    }

    fn annotate<E: HostElement>(row: &E, membership: &Membership) {
        row.set_attribute(
            IN_PLAYLISTS_ATTR,
            if membership.in_playlists { "true" } else { "false" },
        );
        row.set_attribute(COUNT_ATTR, &membership.playlists.len().to_string());
        row.set_attribute(TOOLTIP_ATTR, &membership.summary());
    }
}

/// Wires the annotator to a document: insertion watcher plus periodic
/// rescan, both torn down through the lifecycle scope.
pub struct AnnotationPipeline<D, S> {
    document: Arc<D>,
    annotator: Arc<RowAnnotator<S>>,
    row_selector: String,
    rescan_interval: Duration,
}

impl<D, S> AnnotationPipeline<D, S>
where
    D: HostDocument,
    S: PlaylistSource + 'static,
{
    /// Create a pipeline over one document
    pub fn new(
        document: Arc<D>,
        annotator: Arc<RowAnnotator<S>>,
        row_selector: impl Into<String>,
        rescan_interval: Duration,
    ) -> Self {
        Self {
            document,
            annotator,
            row_selector: row_selector.into(),
            rescan_interval,
        }
    }

    /// Start observing and rescanning. Teardown (watcher stop, rescan abort)
    /// is deferred into `scope`; in-flight row processing is not cancelled.
    pub fn start(&self, scope: &Arc<LifecycleScope>) {
        let annotator = Arc::clone(&self.annotator);
        observe(scope, &self.document, &self.row_selector, move |row| {
            let annotator = Arc::clone(&annotator);
            tokio::spawn(async move {
                annotator.process(&row).await;
            });
        });

        // Safety net for rows that appear without an observable insertion,
        // e.g. a virtualized list recycling a node's attributes in place.
        let document = Arc::clone(&self.document);
        let annotator = Arc::clone(&self.annotator);
        let selector = self.row_selector.clone();
        let interval = self.rescan_interval;
        let rescan = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await; // the immediate first tick
            loop {
                ticker.tick().await;
                // Overlay entries for tracks never queried again would
                // otherwise linger for the page lifetime.
                annotator.overrides.purge_expired();
                let rows = document.query_all(&selector);
                debug!(rows = rows.len(), "Periodic row rescan");
                for row in rows {
                    annotator.process(&row).await;
                }
            }
        });
        scope.defer(move || rescan.abort());
    }
}

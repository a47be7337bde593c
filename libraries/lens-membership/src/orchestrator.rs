//! Add-to-playlists orchestration.
//!
//! One write per target playlist, failures isolated and counted, successful
//! targets recorded in the overlay immediately, and the resolver cache for
//! the track invalidated once all attempts settle.

use crate::overlay::RecentOverrides;
use crate::resolver::MembershipResolver;
use lens_core::traits::{AddOptions, PlaylistSource, PlaylistWriter};
use lens_core::types::{PlaylistRef, PlaylistUuid, TrackId};
use lens_core::{LensError, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// Aggregate outcome classification of one add operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Every target succeeded
    Full,
    /// Some targets succeeded, some failed
    Partial,
    /// No target succeeded
    TotalFailure,
}

/// Per-target results of one add operation
#[derive(Debug, Clone)]
pub struct AddReport {
    /// Playlists the track was added to
    pub added: Vec<PlaylistRef>,
    /// Playlists the add failed on
    pub failed: Vec<PlaylistUuid>,
}

impl AddReport {
    /// Classify the aggregate outcome
    pub fn outcome(&self) -> AddOutcome {
        match (self.added.is_empty(), self.failed.is_empty()) {
            (false, true) => AddOutcome::Full,
            (false, false) => AddOutcome::Partial,
            (true, _) => AddOutcome::TotalFailure,
        }
    }

    /// User-facing summary of the outcome
    pub fn message(&self) -> String {
        match self.outcome() {
            AddOutcome::Full => format!("Added to {} playlist(s)", self.added.len()),
            AddOutcome::Partial => format!(
                "Added to {} playlist(s), {} failed",
                self.added.len(),
                self.failed.len()
            ),
            AddOutcome::TotalFailure => {
                format!("Could not add to any playlist ({} failed)", self.failed.len())
            }
        }
    }
}

/// Orchestrates adding one track to a set of target playlists.
pub struct PlaylistAdder<S, W> {
    writer: Arc<W>,
    resolver: Arc<MembershipResolver<S>>,
    overrides: Arc<RecentOverrides>,
    options: AddOptions,
}

impl<S, W> PlaylistAdder<S, W>
where
    S: PlaylistSource + 'static,
    W: PlaylistWriter,
{
    /// Create an orchestrator with default add options (append, skip
    /// duplicates, host notifications suppressed)
    pub fn new(
        writer: Arc<W>,
        resolver: Arc<MembershipResolver<S>>,
        overrides: Arc<RecentOverrides>,
    ) -> Self {
        Self {
            writer,
            resolver,
            overrides,
            options: AddOptions::default(),
        }
    }

    /// Add `track` to every target playlist.
    ///
    /// Rejects an empty selection before any host call. Each target is
    /// attempted independently; one failure never blocks the rest. Every
    /// individual success records an overlay entry immediately, and the
    /// resolver's cache for the track is invalidated after all attempts so
    /// the next membership query recomputes.
    pub async fn add_to_playlists(
        &self,
        track: &TrackId,
        targets: &[PlaylistRef],
    ) -> Result<AddReport> {
        if targets.is_empty() {
            return Err(LensError::EmptySelection);
        }

        let mut report = AddReport {
            added: Vec::new(),
            failed: Vec::new(),
        };

        for target in targets {
            let result = self
                .writer
                .add_to_playlist(&target.uuid, std::slice::from_ref(track), &self.options)
                .await;

            match result {
                Ok(()) => {
                    self.overrides.record(track, target.clone());
                    report.added.push(target.clone());
                }
                Err(e) => {
                    warn!(
                        track = %track,
                        playlist = %target.uuid,
                        error = %e,
                        "Add to playlist failed"
                    );
                    report.failed.push(target.uuid.clone());
                }
            }
        }

        self.resolver.invalidate(track);

        info!(
            track = %track,
            added = report.added.len(),
            failed = report.failed.len(),
            "Add to playlists finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(added: usize, failed: usize) -> AddReport {
        AddReport {
            added: (0..added)
                .map(|i| PlaylistRef::new(PlaylistUuid::new(format!("p{i}")), format!("P{i}")))
                .collect(),
            failed: (0..failed)
                .map(|i| PlaylistUuid::new(format!("f{i}")))
                .collect(),
        }
    }

    #[test]
    fn outcome_classification() {
        assert_eq!(report(2, 0).outcome(), AddOutcome::Full);
        assert_eq!(report(1, 1).outcome(), AddOutcome::Partial);
        assert_eq!(report(0, 2).outcome(), AddOutcome::TotalFailure);
        assert_eq!(report(0, 0).outcome(), AddOutcome::TotalFailure);
    }

    #[test]
    fn messages_carry_counts() {
        assert_eq!(report(2, 0).message(), "Added to 2 playlist(s)");
        assert_eq!(report(1, 1).message(), "Added to 1 playlist(s), 1 failed");
        assert!(report(0, 3).message().contains("3 failed"));
    }
}

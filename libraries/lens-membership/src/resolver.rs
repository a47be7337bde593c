//! The membership resolver: cached, deduplicating, admission-controlled
//! lookups of "which of my playlists contain this track".

use crate::lookup;
use futures_util::future::{BoxFuture, Shared};
use futures_util::FutureExt;
use lens_core::traits::PlaylistSource;
use lens_core::types::{Membership, TrackId};
use lens_core::{LensError, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;
use tracing::debug;

/// A lookup shared by every concurrent requester of the same track id.
/// `LensError` is `Clone` so the settled result fans out as-is.
type SharedLookup = Shared<BoxFuture<'static, Result<Membership>>>;

#[derive(Default)]
struct ResolverState {
    cache: HashMap<TrackId, Membership>,
    in_flight: HashMap<TrackId, SharedLookup>,
}

/// Bounded-concurrency membership resolver.
///
/// Owns its cache, in-flight map, and admission gate as private state, with
/// explicit `invalidate`/`reset` operations. Guarantees:
/// - a cached result is returned without any host call;
/// - concurrent requests for one id share a single underlying lookup;
/// - at most `concurrency_limit` lookups run against the host at once,
///   excess admitted FIFO as slots free up (the gate's queue is fair);
/// - failed lookups are not cached and may be retried by a later call.
pub struct MembershipResolver<S> {
    source: Arc<S>,
    gate: Arc<Semaphore>,
    state: Arc<Mutex<ResolverState>>,
}

impl<S: PlaylistSource + 'static> MembershipResolver<S> {
    /// Create a resolver over the given host source
    pub fn new(source: Arc<S>, concurrency_limit: usize) -> Self {
        Self {
            source,
            gate: Arc::new(Semaphore::new(concurrency_limit.max(1))),
            state: Arc::new(Mutex::new(ResolverState::default())),
        }
    }

    /// Resolve membership for one track.
    ///
    /// Cache hit returns immediately; otherwise joins the in-flight lookup
    /// for this id or starts one through the admission gate.
    pub async fn membership(&self, track: &TrackId) -> Result<Membership> {
        let lookup = {
            let mut state = self.state.lock().unwrap();

            if let Some(cached) = state.cache.get(track) {
                return Ok(cached.clone());
            }

            if let Some(pending) = state.in_flight.get(track) {
                debug!(track = %track, "Joining in-flight membership lookup");
                pending.clone()
            } else {
                let pending = self.start_lookup(track.clone());
                state.in_flight.insert(track.clone(), pending.clone());
                pending
            }
        };

        lookup.await
    }

    /// Build the shared lookup future for one track id.
    ///
    /// The gate permit is acquired inside the future so queueing order is
    /// the order callers first poll it; settlement removes the in-flight
    /// entry and fills the cache exactly once, inside the single shared
    /// computation.
    fn start_lookup(&self, track: TrackId) -> SharedLookup {
        let source = Arc::clone(&self.source);
        let gate = Arc::clone(&self.gate);
        let state = Arc::clone(&self.state);

        async move {
            let _permit = gate
                .acquire_owned()
                .await
                .map_err(|_| LensError::internal("membership admission gate closed"))?;

            let outcome = lookup::resolve_membership(source.as_ref(), &track).await;

            let mut state = state.lock().unwrap();
            state.in_flight.remove(&track);
            if let Ok(membership) = &outcome {
                state.cache.insert(track.clone(), membership.clone());
            }
            outcome
        }
        .boxed()
        .shared()
    }

    /// Drop the cached result for one track, forcing the next call to
    /// recompute. In-flight lookups are left to settle on their own.
    pub fn invalidate(&self, track: &TrackId) {
        let removed = self.state.lock().unwrap().cache.remove(track).is_some();
        if removed {
            debug!(track = %track, "Invalidated cached membership");
        }
    }

    /// Drop all cached results and forget in-flight entries.
    pub fn reset(&self) {
        let mut state = self.state.lock().unwrap();
        state.cache.clear();
        state.in_flight.clear();
    }

    /// The host source this resolver reads from
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Peek at the cache without triggering a lookup
    pub fn cached(&self, track: &TrackId) -> Option<Membership> {
        self.state.lock().unwrap().cache.get(track).cloned()
    }

    /// Number of lookups currently in flight or queued
    pub fn in_flight_len(&self) -> usize {
        self.state.lock().unwrap().in_flight.len()
    }
}

//! Integration tests for the membership resolver
//!
//! Covers the resolver's contract:
//! - cache coherence (one underlying lookup per id until invalidated)
//! - fan-in of concurrent requesters to a single lookup
//! - the FIFO admission gate bounding concurrent host reads
//! - fail-safe behavior for undetermined identity and partial host failures


use lens_core::types::{PlaylistEntry, TrackDetails, TrackId};
use lens_membership::MembershipResolver;
use std::sync::Arc;
use std::time::Duration;
use test_helpers::FakeSource;

fn resolver_with(source: FakeSource, limit: usize) -> Arc<MembershipResolver<FakeSource>> {
    Arc::new(MembershipResolver::new(Arc::new(source), limit))
}

#[tokio::test]
async fn resolves_containing_playlists_for_owned_collection() {
    let source = FakeSource::new();
    source.set_user(Some("me"));
    source.add_playlist("a", "Road Trip", Some("me"), &["123", "456"]);
    source.add_playlist("b", "Empty", Some("me"), &[]);

    let resolver = resolver_with(source, 5);
    let membership = resolver.membership(&TrackId::new("123")).await.unwrap();

    assert!(membership.in_playlists);
    assert_eq!(membership.playlists.len(), 1);
    assert_eq!(membership.playlists[0].uuid.as_str(), "a");
    assert_eq!(membership.playlists[0].title, "Road Trip");
}

#[tokio::test]
async fn second_call_is_served_from_cache() {
    let source = FakeSource::new();
    source.set_user(Some("me"));
    source.add_playlist("a", "A", Some("me"), &["123"]);

    let resolver = resolver_with(source, 5);
    let track = TrackId::new("123");

    let first = resolver.membership(&track).await.unwrap();
    let second = resolver.membership(&track).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(resolver.cached(&track), Some(first));
    // One underlying lookup, not two
    assert_eq!(resolver_source(&resolver).snapshot_count(), 1);
    assert_eq!(resolver.in_flight_len(), 0);
}

#[tokio::test(start_paused = true)]
async fn concurrent_requesters_share_one_lookup() {
    let source = FakeSource::new();
    source.set_user(Some("me"));
    source.add_playlist("a", "A", Some("me"), &["123"]);
    source.set_snapshot_delay(Duration::from_millis(50));

    let resolver = resolver_with(source, 5);
    let track = TrackId::new("123");

    let mut handles = Vec::new();
    for _ in 0..4 {
        let resolver = Arc::clone(&resolver);
        let track = track.clone();
        handles.push(tokio::spawn(
            async move { resolver.membership(&track).await },
        ));
    }

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap().unwrap());
    }

    assert!(results.windows(2).all(|w| w[0] == w[1]));
    assert!(results[0].in_playlists);
    assert_eq!(
        resolver_source(&resolver).snapshot_count(),
        1,
        "four requesters, one underlying lookup"
    );
}

#[tokio::test(start_paused = true)]
async fn admission_gate_bounds_concurrent_lookups() {
    let source = FakeSource::new();
    source.set_user(Some("me"));
    source.add_playlist("a", "A", Some("me"), &["3"]);
    source.set_snapshot_delay(Duration::from_millis(50));

    let resolver = resolver_with(source, 5);

    let mut handles = Vec::new();
    for i in 0..12 {
        let resolver = Arc::clone(&resolver);
        handles.push(tokio::spawn(async move {
            resolver.membership(&TrackId::new(i.to_string())).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let source = resolver_source(&resolver);
    assert_eq!(source.snapshot_count(), 12, "one lookup per distinct id");
    assert!(
        source.max_active() <= 5,
        "at most 5 lookups in flight, saw {}",
        source.max_active()
    );
}

#[tokio::test(start_paused = true)]
async fn queued_lookups_complete_in_submission_order() {
    let source = FakeSource::new();
    source.set_user(Some("me"));
    source.set_snapshot_delay(Duration::from_millis(10));

    let resolver = resolver_with(source, 1);
    let order = Arc::new(std::sync::Mutex::new(Vec::new()));

    let mut handles = Vec::new();
    for i in 0..4 {
        let resolver = Arc::clone(&resolver);
        let order = Arc::clone(&order);
        handles.push(tokio::spawn(async move {
            resolver
                .membership(&TrackId::new(i.to_string()))
                .await
                .unwrap();
            order.lock().unwrap().push(i);
        }));
        // Let the task reach the gate before the next one is submitted
        tokio::task::yield_now().await;
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn failed_lookup_is_not_cached_and_can_be_retried() {
    let source = FakeSource::new();
    source.set_user(Some("me"));
    source.add_playlist("a", "A", Some("me"), &["123"]);
    source.set_fail_snapshot(true);

    let resolver = resolver_with(source, 5);
    let track = TrackId::new("123");

    assert!(resolver.membership(&track).await.is_err());
    assert_eq!(resolver.cached(&track), None);

    resolver_source(&resolver).set_fail_snapshot(false);
    let membership = resolver.membership(&track).await.unwrap();
    assert!(membership.in_playlists);
    assert_eq!(resolver_source(&resolver).snapshot_count(), 2);
}

#[tokio::test]
async fn undetermined_user_yields_empty_membership() {
    let source = FakeSource::new();
    source.set_user(None);
    source.add_playlist("a", "A", Some("somebody"), &["123"]);

    let resolver = resolver_with(source, 5);
    let membership = resolver.membership(&TrackId::new("123")).await.unwrap();

    assert!(!membership.in_playlists);
    assert!(membership.playlists.is_empty());
    // The snapshot was never read: no exposure path without an identity
    assert_eq!(resolver_source(&resolver).snapshot_count(), 0);
}

#[tokio::test]
async fn other_users_playlists_are_never_considered() {
    let source = FakeSource::new();
    source.set_user(Some("me"));
    source.add_playlist("mine", "Mine", Some("me"), &["999"]);
    source.add_playlist("theirs", "Theirs", Some("other"), &["123"]);
    source.add_playlist("orphan", "No creator", None, &["123"]);

    let resolver = resolver_with(source, 5);
    let membership = resolver.membership(&TrackId::new("123")).await.unwrap();

    assert!(!membership.in_playlists);
}

#[tokio::test]
async fn one_failing_playlist_does_not_abort_the_rest() {
    let source = FakeSource::new();
    source.set_user(Some("me"));
    source.add_playlist("broken", "Broken", Some("me"), &[]);
    source.fail_playlist_items("broken");
    source.add_playlist("good", "Good", Some("me"), &["123"]);

    let resolver = resolver_with(source, 5);
    let membership = resolver.membership(&TrackId::new("123")).await.unwrap();

    assert!(membership.in_playlists);
    assert_eq!(membership.playlists.len(), 1);
    assert_eq!(membership.playlists[0].uuid.as_str(), "good");
}

#[tokio::test]
async fn metadata_fallback_matches_regional_variant() {
    let source = FakeSource::new();
    source.set_user(Some("me"));
    // The playlist holds the track under a different catalog id
    source.add_playlist("a", "Classics", Some("me"), &[]);
    source.set_items(
        "a",
        vec![PlaylistEntry {
            id: Some("777".to_string()),
            title: Some("Don't Stop Me Now".to_string()),
            artist: Some("Queen".to_string()),
            ..PlaylistEntry::default()
        }],
    );
    source.set_details(TrackDetails {
        id: TrackId::new("123"),
        title: Some("Dont Stop Me Now!".to_string()),
        artist: Some("queen".to_string()),
    });

    let resolver = resolver_with(source, 5);
    let membership = resolver.membership(&TrackId::new("123")).await.unwrap();

    assert!(membership.in_playlists);
    assert_eq!(membership.playlists[0].uuid.as_str(), "a");
}

#[tokio::test]
async fn invalidate_forces_recompute() {
    let source = FakeSource::new();
    source.set_user(Some("me"));
    source.add_playlist("a", "A", Some("me"), &["123"]);

    let resolver = resolver_with(source, 5);
    let track = TrackId::new("123");

    resolver.membership(&track).await.unwrap();
    resolver.invalidate(&track);
    assert_eq!(resolver.cached(&track), None);

    resolver.membership(&track).await.unwrap();
    assert_eq!(resolver_source(&resolver).snapshot_count(), 2);
}

#[tokio::test]
async fn reset_clears_all_cached_state() {
    let source = FakeSource::new();
    source.set_user(Some("me"));
    source.add_playlist("a", "A", Some("me"), &["1"]);

    let resolver = resolver_with(source, 5);
    resolver.membership(&TrackId::new("1")).await.unwrap();
    resolver.membership(&TrackId::new("2")).await.unwrap();

    resolver.reset();
    assert_eq!(resolver.cached(&TrackId::new("1")), None);
    assert_eq!(resolver.cached(&TrackId::new("2")), None);
}

/// The resolver owns its source; tests reach it through a helper to keep
/// call-count assertions readable.
fn resolver_source(resolver: &Arc<MembershipResolver<FakeSource>>) -> &FakeSource {
    resolver.source()
}

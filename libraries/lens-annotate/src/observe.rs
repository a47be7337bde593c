//! Watch for elements matching a selector, deliver each exactly once.
//!
//! Synchronous sweep over current matches, then a document-wide insertion
//! watcher for future ones. Delivery is deduped by node key against a
//! per-call seen set, so separate `observe` calls do not inherit each
//! other's state. If the body is not available yet, installation defers
//! one-shot until it is.

use crate::dom::{HostDocument, HostElement};
use lens_core::LifecycleScope;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Observe `selector` matches in `document`, invoking `on_match` once per
/// element for the lifetime of the call. Watcher teardown is deferred into
/// `scope`.
pub fn observe<D: HostDocument>(
    scope: &Arc<LifecycleScope>,
    document: &Arc<D>,
    selector: &str,
    on_match: impl Fn(D::Element) + Send + Sync + 'static,
) {
    let selector = selector.to_string();
    let on_match: Arc<dyn Fn(D::Element) + Send + Sync> = Arc::new(on_match);

    if document.body_ready() {
        install(scope, document, selector, &on_match);
    } else {
        debug!(selector = %selector, "Body not ready, deferring observation");
        let scope = Arc::clone(scope);
        let document = Arc::clone(document);
        let deferred_doc = Arc::clone(&document);
        document.when_body_ready(Box::new(move || {
            // The scope may have been disposed while waiting for the body.
            if scope.is_disposed() {
                debug!(selector = %selector, "Scope disposed before body became ready, skipping observation");
                return;
            }
            install(&scope, &deferred_doc, selector, &on_match);
        }));
    }
}

fn install<D: HostDocument>(
    scope: &Arc<LifecycleScope>,
    document: &Arc<D>,
    selector: String,
    on_match: &Arc<dyn Fn(D::Element) + Send + Sync>,
) {
    // Per-call dedup state shared by the sweep and the watcher.
    let seen: Arc<Mutex<HashSet<u64>>> = Arc::new(Mutex::new(HashSet::new()));

    let deliver = {
        let on_match = Arc::clone(on_match);
        move |element: D::Element| {
            if seen.lock().unwrap().insert(element.node_key()) {
                on_match(element);
            }
        }
    };
    let deliver = Arc::new(deliver);

    for element in document.query_all(&selector) {
        deliver(element);
    }

    let guard = {
        let deliver = Arc::clone(&deliver);
        document.watch_insertions(Box::new(move |inserted| {
            // The inserted node itself, then any matching descendants.
            if inserted.matches(&selector) {
                deliver(inserted.clone());
            }
            for element in inserted.query_all(&selector) {
                deliver(element);
            }
        }))
    };

    scope.defer(move || drop(guard));
}

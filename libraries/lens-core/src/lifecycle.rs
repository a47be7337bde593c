/// Plugin lifecycle scope
///
/// The host drives plugin unload by disposing this scope. Components defer
/// their teardown here (mutation watcher stop, rescan task abort); in-flight
/// lookups are deliberately not cancelled and run to completion.
use std::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

type Teardown = Box<dyn FnOnce() + Send>;

struct ScopeState {
    disposed: bool,
    teardowns: Vec<Teardown>,
}

/// Ordered registry of teardown callbacks, run once in reverse order.
pub struct LifecycleScope {
    id: String,
    state: Mutex<ScopeState>,
}

impl LifecycleScope {
    /// Create a fresh scope
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            state: Mutex::new(ScopeState {
                disposed: false,
                teardowns: Vec::new(),
            }),
        }
    }

    /// Opaque scope id, for log correlation
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Register a teardown callback.
    ///
    /// On an already-disposed scope the teardown runs immediately, so
    /// components installed asynchronously (deferred on body readiness)
    /// cannot outlive the scope they registered with.
    pub fn defer(&self, teardown: impl FnOnce() + Send + 'static) {
        {
            let mut state = self.state.lock().unwrap();
            if !state.disposed {
                state.teardowns.push(Box::new(teardown));
                return;
            }
        }
        debug!(scope = %self.id, "Scope already disposed, running teardown now");
        teardown();
    }

    /// Whether `dispose` has been called
    pub fn is_disposed(&self) -> bool {
        self.state.lock().unwrap().disposed
    }

    /// Number of registered teardowns not yet run
    pub fn pending(&self) -> usize {
        self.state.lock().unwrap().teardowns.len()
    }

    /// Run all teardowns in reverse registration order.
    ///
    /// Idempotent: a second call finds an empty registry and does nothing.
    pub fn dispose(&self) {
        let drained: Vec<Teardown> = {
            let mut state = self.state.lock().unwrap();
            state.disposed = true;
            state.teardowns.drain(..).collect()
        };

        debug!(scope = %self.id, count = drained.len(), "Disposing lifecycle scope");
        for teardown in drained.into_iter().rev() {
            teardown();
        }
    }
}

impl Default for LifecycleScope {
    fn default() -> Self {
        Self::new()
    }
}

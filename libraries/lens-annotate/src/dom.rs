//! Abstract view of the host's rendered document.
//!
//! The plugin runs inside an application it does not own; the real bindings
//! wrap the host's live DOM. These traits are the narrow surface the
//! annotation pipeline needs, so the pipeline itself stays testable against
//! an in-memory document.

/// One element handle in the host document.
///
/// Handles are cheap clones referring to the same underlying node;
/// `node_key` is stable for the node's lifetime and is what the observation
/// utility dedups on. A replaced node gets a new key (and no processing
/// mark), which is exactly when reprocessing is wanted.
pub trait HostElement: Clone + Send + Sync + 'static {
    /// Stable identity of the underlying node
    fn node_key(&self) -> u64;

    /// Whether this element matches the selector
    fn matches(&self, selector: &str) -> bool;

    /// Read an attribute
    fn attribute(&self, name: &str) -> Option<String>;

    /// Write an attribute
    fn set_attribute(&self, name: &str, value: &str);

    /// Descendant elements matching the selector
    fn query_all(&self, selector: &str) -> Vec<Self>;

    /// `href` targets of anchor descendants (and of the element itself)
    fn link_targets(&self) -> Vec<String>;
}

/// Callback invoked with each element inserted into the document subtree
pub type InsertionCallback<E> = Box<dyn Fn(E) + Send + Sync>;

/// The host document surface.
pub trait HostDocument: Send + Sync + 'static {
    /// Element handle type
    type Element: HostElement;

    /// Whether the document body exists yet
    fn body_ready(&self) -> bool;

    /// Run `callback` once the body becomes available (immediately if it
    /// already is). One-shot.
    fn when_body_ready(&self, callback: Box<dyn FnOnce() + Send>);

    /// All elements currently in the document matching the selector
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;

    /// Watch document-wide subtree insertions. The callback receives every
    /// newly inserted element (not its descendants; callers walk those).
    /// Dropping or stopping the guard stops the watcher.
    fn watch_insertions(&self, callback: InsertionCallback<Self::Element>) -> WatchGuard;
}

/// Handle that stops a mutation watcher when dropped or stopped.
pub struct WatchGuard {
    stop: Option<Box<dyn FnOnce() + Send>>,
}

impl WatchGuard {
    /// Wrap a stop action
    pub fn new(stop: impl FnOnce() + Send + 'static) -> Self {
        Self {
            stop: Some(Box::new(stop)),
        }
    }

    /// Stop the watcher explicitly
    pub fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            stop();
        }
    }
}

impl Drop for WatchGuard {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            stop();
        }
    }
}

use std::any::Any;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::store::StateStore;
use crate::topic::Topics;

/// A boxed, `Send`-able future returned by request handlers.
pub type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Type-erased request payload.
pub type Payload = Arc<dyn Any + Send + Sync>;

type ErasedHandler = Arc<dyn Fn(String, Payload, Arc<StateStore>) -> BoxFuture + Send + Sync>;

/// Maps request path patterns to async handlers.
///
/// Every handler whose pattern matches runs, one after another, in
/// registration order. An unmatched request is a no-op.
pub struct Router {
    handlers: Topics<ErasedHandler>,
}

impl Router {
    pub fn new() -> Self {
        Self { handlers: Topics::new() }
    }

    pub fn on<F, Fut>(&self, pattern: &str, handler: F)
    where
        F: Fn(String, Payload, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handler: ErasedHandler = Arc::new(
            move |path: String, payload: Payload, store: Arc<StateStore>| -> BoxFuture {
                Box::pin(handler(path, payload, store))
            },
        );
        self.handlers.insert(pattern, handler);
    }

    pub async fn dispatch(&self, path: &str, payload: Payload, store: Arc<StateStore>) {
        let handlers = self.handlers.matching(path);
        if handlers.is_empty() {
            tracing::debug!(path, "no handler for request");
        }
        for handler in handlers {
            handler(path.to_string(), Arc::clone(&payload), Arc::clone(&store)).await;
        }
    }

    pub fn has_handler(&self, pattern: &str) -> bool {
        self.handlers.contains_pattern(pattern)
    }

    /// True if a request at `path` would reach at least one handler.
    pub fn matches(&self, path: &str) -> bool {
        !self.handlers.matching(path).is_empty()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

use std::any::Any;
use std::future::Future;
use std::sync::Arc;

use crate::router::{Payload, Router};
use crate::store::StateStore;
use crate::value::{StateValue, SubscriptionId};

/// The state engine: a [`StateStore`] plus a request [`Router`].
///
/// ```ignore
/// let flux = Flux::new();
/// flux.on_request("auth/login", |req: LoginReq, store| async move {
///     store.set("auth/state", AuthState::authenticated(..));
/// });
/// flux.subscribe("auth/#", |path, _| println!("{} changed", path));
/// flux.emit("auth/login", LoginReq { .. }).await;
/// ```
pub struct Flux {
    store: Arc<StateStore>,
    router: Router,
}

impl Flux {
    pub fn new() -> Self {
        Self { store: Arc::new(StateStore::new()), router: Router::new() }
    }

    // ── State ───────────────────────────────────────────────────────

    pub fn get(&self, path: &str) -> Option<StateValue> {
        self.store.get(path)
    }

    pub fn get_as<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.store.get_as(path)
    }

    pub fn scan(&self, prefix: &str) -> Vec<(String, StateValue)> {
        self.store.scan(prefix)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.store.contains(path)
    }

    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }

    // ── Requests ────────────────────────────────────────────────────

    /// Emit a request and wait until every matching handler has run.
    pub async fn emit<T: Any + Send + Sync>(&self, path: &str, payload: T) {
        self.emit_arc(path, Arc::new(payload)).await;
    }

    pub async fn emit_arc(&self, path: &str, payload: Payload) {
        tracing::debug!(path, "emit");
        self.router.dispatch(path, payload, Arc::clone(&self.store)).await;
    }

    /// Register a raw handler that receives the type-erased payload.
    pub fn on<F, Fut>(&self, pattern: &str, handler: F)
    where
        F: Fn(String, Payload, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.router.on(pattern, handler);
    }

    /// Register a handler for payloads of type `R`.
    ///
    /// The payload is cloned out of the request. A payload of any other
    /// type is logged and dropped.
    pub fn on_request<R, F, Fut>(&self, path: &str, handler: F)
    where
        R: Any + Clone + Send + Sync,
        F: Fn(R, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handler = Arc::new(handler);
        self.router.on(path, move |path, payload, store| {
            let handler = Arc::clone(&handler);
            let req = payload.downcast_ref::<R>().cloned();
            async move {
                match req {
                    Some(req) => handler(req, store).await,
                    None => tracing::warn!(path = %path, "request payload has unexpected type"),
                }
            }
        });
    }

    pub fn has_handler(&self, path: &str) -> bool {
        self.router.matches(path)
    }

    // ── Subscriptions ───────────────────────────────────────────────

    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        self.store.subscribe(pattern, handler)
    }

    pub fn unsubscribe(&self, pattern: &str, id: SubscriptionId) -> bool {
        self.store.unsubscribe(pattern, id)
    }
}

impl Default for Flux {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Clone)]
    struct Login {
        username: String,
    }

    #[tokio::test]
    async fn typed_handler_receives_payload() {
        let flux = Flux::new();
        flux.on_request("auth/login", |req: Login, store| async move {
            store.set("auth/user", req.username);
        });

        flux.emit("auth/login", Login { username: "ana".into() }).await;
        assert_eq!(flux.get_as::<String>("auth/user"), Some("ana".into()));
    }

    #[tokio::test]
    async fn typed_handler_ignores_wrong_payload() {
        let flux = Flux::new();
        flux.on_request("auth/login", |req: Login, store| async move {
            store.set("auth/user", req.username);
        });

        flux.emit("auth/login", 42u32).await;
        assert!(!flux.contains("auth/user"));
    }

    #[tokio::test]
    async fn subscribers_see_handler_writes() {
        let flux = Flux::new();
        let routes = Arc::new(Mutex::new(Vec::new()));
        let r = routes.clone();
        flux.subscribe("app/route", move |_, v| {
            if let Some(route) = v.cloned::<String>() {
                r.lock().unwrap().push(route);
            }
        });
        flux.on("auth/logout", |_, _, store| async move {
            store.set("app/route", "/login".to_string());
        });

        flux.emit("auth/logout", ()).await;
        assert_eq!(*routes.lock().unwrap(), vec!["/login"]);
        assert!(flux.has_handler("auth/logout"));
    }
}

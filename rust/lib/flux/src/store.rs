use std::any::Any;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::topic::Topics;
use crate::value::{StateValue, SubscriptionId};

/// Callback type for state change notifications.
pub type ChangeHandler = Arc<dyn Fn(&str, &StateValue) + Send + Sync>;

/// Path-keyed state with pattern-matched change notifications.
///
/// Subscribers run synchronously on the thread that calls `set`, after the
/// value lock has been released, so a handler may read the store.
pub struct StateStore {
    values: RwLock<BTreeMap<String, StateValue>>,
    handlers: Topics<HandlerEntry>,
    next_id: AtomicU64,
}

#[derive(Clone)]
struct HandlerEntry {
    id: SubscriptionId,
    handler: ChangeHandler,
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(BTreeMap::new()),
            handlers: Topics::new(),
            next_id: AtomicU64::new(1),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, StateValue>> {
        self.values.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, StateValue>> {
        self.values.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Store a value at `path` and notify matching subscribers.
    pub fn set<T: Any + Send + Sync>(&self, path: &str, value: T) {
        self.set_value(path, StateValue::new(value));
    }

    pub fn set_value(&self, path: &str, value: StateValue) {
        self.write().insert(path.to_string(), value.clone());
        self.notify(path, &value);
    }

    fn notify(&self, path: &str, value: &StateValue) {
        for entry in self.handlers.matching(path) {
            (entry.handler)(path, value);
        }
    }

    pub fn get(&self, path: &str) -> Option<StateValue> {
        self.read().get(path).cloned()
    }

    /// Typed read: an owned copy of the value at `path` if it is a `T`.
    pub fn get_as<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.get(path).and_then(|v| v.cloned::<T>())
    }

    /// Read-modify-write of a typed value.
    ///
    /// Starts from `T::default()` when the path is empty or holds another
    /// type. The new value is stored and published.
    pub fn update<T, F>(&self, path: &str, f: F) -> T
    where
        T: Any + Clone + Default + Send + Sync,
        F: FnOnce(&mut T),
    {
        let value = {
            let mut values = self.write();
            let mut current = values
                .get(path)
                .and_then(|v| v.cloned::<T>())
                .unwrap_or_default();
            f(&mut current);
            values.insert(path.to_string(), StateValue::new(current.clone()));
            current
        };
        if let Some(stored) = self.get(path) {
            self.notify(path, &stored);
        }
        value
    }

    /// Remove the value at `path`. Subscribers are not notified.
    pub fn remove(&self, path: &str) -> Option<StateValue> {
        self.write().remove(path)
    }

    /// Remove `prefix` and everything under it. Returns the removed paths.
    pub fn remove_tree(&self, prefix: &str) -> Vec<String> {
        let mut values = self.write();
        let child = format!("{}/", prefix);
        let doomed: Vec<String> = values
            .keys()
            .filter(|k| k.as_str() == prefix || k.starts_with(&child))
            .cloned()
            .collect();
        for key in &doomed {
            values.remove(key);
        }
        doomed
    }

    /// Entries strictly under `{prefix}/`, ordered by path.
    pub fn scan(&self, prefix: &str) -> Vec<(String, StateValue)> {
        let child = format!("{}/", prefix);
        self.read()
            .range(child.clone()..)
            .take_while(|(k, _)| k.starts_with(&child))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.read().contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn paths(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers.insert(pattern, HandlerEntry { id, handler: Arc::new(handler) });
        id
    }

    pub fn unsubscribe(&self, pattern: &str, id: SubscriptionId) -> bool {
        self.handlers.remove(pattern, |entry| entry.id == id)
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

use std::sync::RwLock;

/// Match a `/`-separated topic against an MQTT-style pattern.
///
/// `+` matches exactly one level, `#` matches the rest (including
/// nothing) and must be the last segment.
pub fn matches(pattern: &str, topic: &str) -> bool {
    let mut pat = pattern.split('/');
    let mut top = topic.split('/');
    loop {
        match (pat.next(), top.next()) {
            (Some("#"), _) => return true,
            (Some("+"), Some(_)) => {}
            (Some(p), Some(t)) if p == t => {}
            (None, None) => return true,
            _ => return false,
        }
    }
}

/// Pattern-keyed registry of entries, in registration order.
pub struct Topics<T> {
    entries: RwLock<Vec<(String, T)>>,
}

impl<T: Clone> Topics<T> {
    pub fn new() -> Self {
        Self { entries: RwLock::new(Vec::new()) }
    }

    pub fn insert(&self, pattern: &str, value: T) {
        self.write().push((pattern.to_string(), value));
    }

    /// Entries whose pattern matches `topic`, cloned out of the lock.
    pub fn matching(&self, topic: &str) -> Vec<T> {
        self.read()
            .iter()
            .filter(|(pattern, _)| matches(pattern, topic))
            .map(|(_, value)| value.clone())
            .collect()
    }

    /// Remove entries registered under exactly `pattern` that satisfy `pred`.
    pub fn remove<F>(&self, pattern: &str, pred: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|(p, value)| !(p == pattern && pred(value)));
        entries.len() != before
    }

    pub fn contains_pattern(&self, pattern: &str) -> bool {
        self.read().iter().any(|(p, _)| p == pattern)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<(String, T)>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<(String, T)>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl<T: Clone> Default for Topics<T> {
    fn default() -> Self {
        Self::new()
    }
}

//! Process-wide cookie store.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::parser::parse_cookie_string;
use crate::domain::UpstreamSource;

/// The cookie for one source together with its update generation.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CookieSnapshot {
    /// Bumped on every `set`, starting at zero.
    pub generation: u64,
    /// Current cookie string, `None` when unset.
    pub value: Option<String>,
}

impl std::fmt::Debug for CookieSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieSnapshot")
            .field("generation", &self.generation)
            .field("value", &self.value.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Thread-safe cookie slots, one per upstream source.
///
/// Clients compare the generation against the one their session was built
/// with and rebuild the session when it moved.
#[derive(Default)]
pub struct CookieStore {
    slots: RwLock<HashMap<UpstreamSource, CookieSnapshot>>,
}

impl CookieStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with startup values.
    #[must_use]
    pub fn with_values(values: impl IntoIterator<Item = (UpstreamSource, String)>) -> Self {
        let store = Self::new();
        for (source, value) in values {
            store.set(source, &value);
        }
        store
    }

    /// Current cookie string for `source`.
    #[must_use]
    pub fn get(&self, source: UpstreamSource) -> Option<String> {
        self.slots
            .read()
            .get(&source)
            .and_then(|slot| slot.value.clone())
    }

    /// Current cookie and generation for `source`.
    #[must_use]
    pub fn snapshot(&self, source: UpstreamSource) -> CookieSnapshot {
        self.slots.read().get(&source).cloned().unwrap_or_default()
    }

    /// Replace the cookie for `source` and return the new generation.
    ///
    /// The value is not validated. Blank input clears the slot.
    pub fn set(&self, source: UpstreamSource, value: &str) -> u64 {
        let trimmed = value.trim();
        let mut slots = self.slots.write();
        let slot = slots.entry(source).or_default();
        slot.generation += 1;
        slot.value = (!trimmed.is_empty()).then(|| trimmed.to_string());

        tracing::info!(
            source = %source,
            generation = slot.generation,
            cookie_count = parse_cookie_string(trimmed).len(),
            "Cookie updated"
        );
        slot.generation
    }

    /// Number of usable name/value pairs held for `source`.
    #[must_use]
    pub fn cookie_count(&self, source: UpstreamSource) -> usize {
        self.get(source)
            .map_or(0, |value| parse_cookie_string(&value).len())
    }

    /// Check if `source` has at least one usable cookie pair.
    #[must_use]
    pub fn is_configured(&self, source: UpstreamSource) -> bool {
        self.cookie_count(source) > 0
    }
}

impl std::fmt::Debug for CookieStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slots = self.slots.read();
        let mut map = f.debug_map();
        for (source, slot) in slots.iter() {
            map.entry(&source.as_str(), slot);
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn unset_source_is_empty() {
        let store = CookieStore::new();
        assert_eq!(store.get(UpstreamSource::Xueqiu), None);
        assert_eq!(store.snapshot(UpstreamSource::Xueqiu).generation, 0);
        assert!(!store.is_configured(UpstreamSource::Xueqiu));
    }

    #[test]
    fn set_replaces_value_and_bumps_generation() {
        let store = CookieStore::new();
        assert_eq!(store.set(UpstreamSource::PumpFun, " a=1; b=2 "), 1);
        assert_eq!(store.get(UpstreamSource::PumpFun).as_deref(), Some("a=1; b=2"));
        assert_eq!(store.cookie_count(UpstreamSource::PumpFun), 2);

        assert_eq!(store.set(UpstreamSource::PumpFun, "c=3"), 2);
        assert_eq!(store.get(UpstreamSource::PumpFun).as_deref(), Some("c=3"));
    }

    #[test]
    fn blank_set_clears_slot() {
        let store = CookieStore::with_values([(UpstreamSource::Xueqiu, "xq=1".to_string())]);
        store.set(UpstreamSource::Xueqiu, "   ");
        assert_eq!(store.get(UpstreamSource::Xueqiu), None);
        assert_eq!(store.snapshot(UpstreamSource::Xueqiu).generation, 2);
    }

    #[test]
    fn malformed_value_is_kept_but_not_configured() {
        let store = CookieStore::new();
        store.set(UpstreamSource::Xueqiu, "noequalsign");
        assert_eq!(store.get(UpstreamSource::Xueqiu).as_deref(), Some("noequalsign"));
        assert!(!store.is_configured(UpstreamSource::Xueqiu));
    }

    #[test]
    fn sources_are_independent() {
        let store = CookieStore::new();
        store.set(UpstreamSource::PumpFun, "a=1");
        assert_eq!(store.get(UpstreamSource::Xueqiu), None);
        assert_eq!(store.snapshot(UpstreamSource::Xueqiu).generation, 0);
    }

    #[test]
    fn debug_output_redacts_values() {
        let store = CookieStore::new();
        store.set(UpstreamSource::PumpFun, "secret=hunter2");
        let rendered = format!("{store:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("redacted"));
    }

    #[test]
    fn concurrent_sets_never_lose_generations() {
        let store = Arc::new(CookieStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for j in 0..50 {
                        store.set(UpstreamSource::Xueqiu, &format!("k{i}={j}"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.snapshot(UpstreamSource::Xueqiu).generation, 400);
    }
}

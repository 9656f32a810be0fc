//! Per-color cache of dither plans.
//!
//! Plans are pure functions of the target color and the palette, so a racing
//! recomputation is harmless: the plan is built outside the lock and the first
//! published value wins.
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

/// Read-mostly map from 24-bit RGB keys to shared plans.
pub struct PlanCache<P> {
    entries: RwLock<HashMap<u32, Arc<P>>>,
}

impl<P> PlanCache<P> {
    /// Creates a new, empty cache.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Gets the cached plan for `key`, if any.
    pub fn get(&self, key: u32) -> Option<Arc<P>> {
        let map = self.entries.read().unwrap_or_else(|e| e.into_inner());
        map.get(&key).cloned()
    }

    /// Gets the plan for `key`, building it with `build` on a miss.
    pub fn get_or_insert_with(&self, key: u32, build: impl FnOnce() -> P) -> Arc<P> {
        if let Some(plan) = self.get(key) {
            return plan;
        }
        let plan = Arc::new(build());
        let mut map = self.entries.write().unwrap_or_else(|e| e.into_inner());
        map.entry(key).or_insert(plan).clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every plan; used when the palette changes.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

impl<P> Default for PlanCache<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Clone for PlanCache<P> {
    fn clone(&self) -> Self {
        let map = self.entries.read().unwrap_or_else(|e| e.into_inner());
        Self {
            entries: RwLock::new(map.clone()),
        }
    }
}

impl<P> fmt::Debug for PlanCache<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanCache")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use super::*;

    #[test]
    fn builds_once_per_key() {
        let cache = PlanCache::new();
        let calls = AtomicUsize::new(0);
        let build = || {
            calls.fetch_add(1, Ordering::SeqCst);
            vec![1u8, 2, 3]
        };
        let a = cache.get_or_insert_with(0x00FF_00FF, build);
        let b = cache.get_or_insert_with(0x00FF_00FF, || unreachable!());
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_removes_all_entries() {
        let cache = PlanCache::new();
        cache.get_or_insert_with(1, || 1u32);
        cache.get_or_insert_with(2, || 2u32);
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get(1).is_none());
    }

    #[test]
    fn concurrent_readers_agree_on_one_plan() {
        let cache = Arc::new(PlanCache::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.get_or_insert_with(7, move || i))
            })
            .collect();
        let plans: Vec<Arc<i32>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let first = &plans[0];
        assert!(plans.iter().all(|p| Arc::ptr_eq(p, first)));
        assert_eq!(cache.len(), 1);
    }
}

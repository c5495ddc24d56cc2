//! Cache of compiled decisions
//!
//! Entries are keyed by the model source identity, a fingerprint of the
//! source content and the requested decision id. The oldest insertion is
//! evicted once the capacity is reached.

use super::decision::Decision;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// Cache statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of entries in cache
    pub size: usize,
    /// Maximum number of entries
    pub capacity: usize,
}

impl CacheStats {
    /// Calculate cache hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct CacheKey {
    /// Path or label of the model source
    source: String,
    /// Fingerprint of the source text, or of the serialized pre-parsed model
    fingerprint: u64,
    /// Requested decision id; `None` for single-decision resolution
    decision_id: Option<String>,
}

impl CacheKey {
    pub(crate) fn new(source: String, fingerprint: u64, decision_id: Option<&str>) -> Self {
        Self {
            source,
            fingerprint,
            decision_id: decision_id.map(str::to_string),
        }
    }
}

#[derive(Debug, Default)]
struct Entries {
    map: HashMap<CacheKey, Decision>,
    order: VecDeque<CacheKey>,
}

/// Bounded cache of compiled decisions
#[derive(Debug)]
pub(crate) struct DecisionCache {
    capacity: usize,
    entries: RwLock<Entries>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl DecisionCache {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: RwLock::new(Entries::default()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub(crate) async fn get(&self, key: &CacheKey) -> Option<Decision> {
        let found = self.entries.read().await.map.get(key).cloned();
        let counter = if found.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    pub(crate) async fn insert(&self, key: CacheKey, decision: Decision) {
        let mut entries = self.entries.write().await;

        if entries.map.insert(key.clone(), decision).is_some() {
            return;
        }
        entries.order.push_back(key);

        while entries.map.len() > self.capacity {
            let Some(oldest) = entries.order.pop_front() else {
                break;
            };
            tracing::debug!("Evicting cached decision {:?}", oldest);
            entries.map.remove(&oldest);
        }
    }

    pub(crate) async fn clear(&self) {
        let mut entries = self.entries.write().await;
        entries.map.clear();
        entries.order.clear();
    }

    pub(crate) async fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            size: self.entries.read().await.map.len(),
            capacity: self.capacity,
        }
    }
}

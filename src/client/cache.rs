//! Page-lifetime query cache shared by hydration and the data layer.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered identifier for one cached resource, e.g. `["blogPost", "42"]`.
///
/// The JSON-array form is the canonical wire encoding; the key used to seed
/// the cache from initial data must byte-match the key the client's own fetch
/// uses, or hydration silently misses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(parts.into_iter().map(Into::into).collect())
    }

    /// Canonical wire form: a JSON array of strings.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_default()
    }

    /// Parse the wire form back into a key (legacy `queries` entries).
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }
}

/// How long entries stay fresh and how long they stay resident at all.
#[derive(Debug, Clone, Copy)]
pub struct CachePolicy {
    /// Entries younger than this are served without a refetch.
    pub stale_time: Duration,
    /// Entries older than this are eligible for eviction.
    pub gc_time: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            stale_time: Duration::from_secs(5 * 60),
            gc_time: Duration::from_secs(10 * 60),
        }
    }
}

#[derive(Debug)]
struct CacheEntry {
    value: Value,
    updated_at: Instant,
}

/// In-memory query cache. Lives for the page lifetime: created at bootstrap,
/// seeded from initial data, read and written during the session, dropped on
/// unload. All mutation happens on a single execution thread.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, CacheEntry>,
    policy: CachePolicy,
}

impl QueryCache {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            entries: HashMap::new(),
            policy,
        }
    }

    pub fn set(&mut self, key: QueryKey, value: Value) {
        self.entries.insert(
            key,
            CacheEntry {
                value,
                updated_at: Instant::now(),
            },
        );
    }

    pub fn get(&self, key: &QueryKey) -> Option<&Value> {
        self.entries.get(key).map(|entry| &entry.value)
    }

    /// True when the entry exists and is younger than the stale window.
    pub fn is_fresh(&self, key: &QueryKey) -> bool {
        self.entries
            .get(key)
            .map(|entry| entry.updated_at.elapsed() < self.policy.stale_time)
            .unwrap_or(false)
    }

    /// Drop entries past the gc window. Returns how many were evicted.
    pub fn evict_expired(&mut self) -> usize {
        let before = self.entries.len();
        let gc_time = self.policy.gc_time;
        self.entries
            .retain(|_, entry| entry.updated_at.elapsed() < gc_time);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

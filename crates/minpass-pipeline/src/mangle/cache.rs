use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::{Mutex, MutexGuard};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::PropertyManglePolicy;
use crate::{Error, Result};

const FIRST_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ$_";
const REST_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ$_0123456789";

/// The `n`-th short identifier: `a`..`_`, then `aa`, `ba`, ...
pub fn short_name(mut n: usize) -> String {
    let mut name = String::new();
    name.push(FIRST_CHARS[n % FIRST_CHARS.len()] as char);
    n /= FIRST_CHARS.len();
    while n > 0 {
        n -= 1;
        name.push(REST_CHARS[n % REST_CHARS.len()] as char);
        n /= REST_CHARS.len();
    }
    name
}

/// Original property name to short name, kept for the whole run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NameCache {
    props: IndexMap<String, String>,
    #[serde(default)]
    next: usize,
    #[serde(skip)]
    used: FxHashSet<String>,
}

impl NameCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a cache written by [`NameCache::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut cache: NameCache = serde_json::from_str(&content).map_err(|e| {
            Error::InvalidConfig(format!(
                "Invalid name cache '{}': {}",
                path.display(),
                e
            ))
        })?;
        cache.used = cache.props.values().cloned().collect();
        Ok(cache)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::WriteFailure(format!("Failed to serialize name cache: {}", e)))?;
        crate::writer::write_file_atomic(path, json.as_bytes())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.props.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Return the short name for `name`, assigning a fresh one if needed.
    ///
    /// A fresh name never equals a name in `avoid`, a reserved name, a name
    /// the policy would mangle, or a short name already handed out.
    pub fn assign(
        &mut self,
        name: &str,
        avoid: &FxHashSet<String>,
        policy: &PropertyManglePolicy,
    ) -> String {
        if let Some(existing) = self.props.get(name) {
            return existing.clone();
        }

        let short = loop {
            let candidate = short_name(self.next);
            self.next += 1;
            if avoid.contains(&candidate)
                || self.used.contains(&candidate)
                || policy.is_reserved(&candidate)
                || policy.should_mangle(&candidate)
            {
                continue;
            }
            break candidate;
        };

        self.used.insert(short.clone());
        self.props.insert(name.to_string(), short.clone());
        short
    }
}

/// A [`NameCache`] shared by every artifact of one run.
#[derive(Debug, Clone, Default)]
pub struct SharedNameCache(Arc<Mutex<NameCache>>);

impl SharedNameCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cache(cache: NameCache) -> Self {
        Self(Arc::new(Mutex::new(cache)))
    }

    pub fn lock(&self) -> MutexGuard<'_, NameCache> {
        self.0.lock()
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> NameCache {
        self.0.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn policy() -> PropertyManglePolicy {
        PropertyManglePolicy::new(["b".to_string()], r"^\$m_").unwrap()
    }

    #[test]
    fn test_short_names_are_unique() {
        let names: FxHashSet<String> = (0..10_000).map(short_name).collect();
        assert_eq!(names.len(), 10_000);
        assert_eq!(short_name(0), "a");
        assert_eq!(short_name(53), "_");
        assert_eq!(short_name(54), "aa");
    }

    #[test]
    fn test_assign_skips_avoided_and_reserved() {
        let mut cache = NameCache::new();
        let avoid: FxHashSet<String> = ["a".to_string()].into_iter().collect();

        assert_eq!(cache.assign("$m_One", &avoid, &policy()), "c");
        assert_eq!(cache.assign("$m_Two", &avoid, &policy()), "d");
        assert_eq!(cache.assign("$m_One", &avoid, &policy()), "c");
    }

    #[test]
    fn test_save_and_load_round_trip_keeps_used_names() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("names.json");

        let mut cache = NameCache::new();
        cache.assign("$m_One", &FxHashSet::default(), &policy());
        cache.save(&path).unwrap();

        let mut loaded = NameCache::load(&path).unwrap();
        assert_eq!(loaded.get("$m_One"), Some("a"));
        let fresh = loaded.assign("$m_Two", &FxHashSet::default(), &policy());
        assert_ne!(fresh, "a");
    }

    #[test]
    fn test_load_rejects_garbage() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("names.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(NameCache::load(&path).is_err());
    }
}

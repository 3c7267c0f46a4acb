//! Short-lived cache of loaded snapshots, keyed by user and ref.

use crate::store::Snapshot;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

struct CacheEntry {
    snapshot: Snapshot,
    expires_at: Instant,
}

pub struct RevisionCache {
    ttl: Duration,
    entries: RwLock<HashMap<(String, String), CacheEntry>>,
}

impl RevisionCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh snapshot for `user` at `git_ref`, if one is cached
    pub fn get(&self, user: &str, git_ref: &str) -> Option<Snapshot> {
        let entries = self.entries.read().ok()?;
        entries
            .get(&(user.to_string(), git_ref.to_string()))
            .filter(|entry| Instant::now() < entry.expires_at)
            .map(|entry| entry.snapshot.clone())
    }

    pub fn insert(&self, user: &str, git_ref: &str, snapshot: Snapshot) {
        if self.ttl.is_zero() {
            return;
        }
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(
                (user.to_string(), git_ref.to_string()),
                CacheEntry {
                    snapshot,
                    expires_at: Instant::now() + self.ttl,
                },
            );
        }
    }

    /// Drop every ref cached for `user`
    pub fn invalidate_user(&self, user: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.retain(|(cached_user, _), _| cached_user != user);
        }
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RevisionCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(60))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Revision;

    fn snapshot(text: &str) -> Snapshot {
        Snapshot {
            text: text.to_string(),
            revision: Revision::new(text),
        }
    }

    #[test]
    fn test_insert_and_get() {
        let cache = RevisionCache::default();
        cache.insert("alice", "main", snapshot("A"));

        assert_eq!(cache.get("alice", "main"), Some(snapshot("A")));
        assert_eq!(cache.get("alice", "draft"), None);
        assert_eq!(cache.get("bob", "main"), None);
    }

    #[test]
    fn test_invalidate_user_keeps_others() {
        let cache = RevisionCache::default();
        cache.insert("alice", "main", snapshot("A"));
        cache.insert("alice", "draft", snapshot("B"));
        cache.insert("alice|x", "main", snapshot("C"));

        cache.invalidate_user("alice");
        assert_eq!(cache.len(), 1);
        assert!(cache.get("alice|x", "main").is_some());
    }

    #[test]
    fn test_zero_ttl_disables_cache() {
        let cache = RevisionCache::new(Duration::ZERO);
        cache.insert("alice", "main", snapshot("A"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_expired_entry_not_returned() {
        let cache = RevisionCache::new(Duration::from_millis(1));
        cache.insert("alice", "main", snapshot("A"));
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(cache.get("alice", "main"), None);
    }
}

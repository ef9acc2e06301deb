//! In-memory caches keyed by composite tuples.

use crate::models::{PageImages, QuestionDetail, QuestionId};
use std::collections::HashMap;
use std::hash::Hash;

/// File-path filter a detail was fetched under. `None` is "all files".
pub type FileScope = Option<String>;

/// Detail cache key.
pub type DetailKey = (QuestionId, FileScope);

/// Page-image cache key: `(file, page, question number)`.
pub type PageImagesKey = (String, i64, Option<i64>);

/// Hit/miss/invalidation counters reported by backend perf logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub invalidations: u64,
}

/// Map-backed cache that counts lookups.
#[derive(Debug)]
pub struct KeyedCache<K, V> {
    entries: HashMap<K, V>,
    stats: CacheStats,
}

impl<K, V> Default for KeyedCache<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::default(),
        }
    }
}

impl<K: Eq + Hash, V: Clone> KeyedCache<K, V> {
    /// Cloned entry for `key`, counting a hit or miss.
    pub fn get(&mut self, key: &K) -> Option<V> {
        match self.entries.get(key) {
            Some(value) => {
                self.stats.hits = self.stats.hits.saturating_add(1);
                Some(value.clone())
            }
            None => {
                self.stats.misses = self.stats.misses.saturating_add(1);
                None
            }
        }
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.entries.insert(key, value);
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove every entry matching `predicate`; returns how many were dropped.
    pub fn evict_where(&mut self, mut predicate: impl FnMut(&K) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !predicate(key));
        let removed = before - self.entries.len();
        if removed > 0 {
            self.stats.invalidations = self.stats.invalidations.saturating_add(1);
        }
        removed
    }

    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.entries.clear();
            self.stats.invalidations = self.stats.invalidations.saturating_add(1);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

/// Question details by `(id, file scope)`.
pub type DetailCache = KeyedCache<DetailKey, QuestionDetail>;

/// Page images by `(file, page, question number)`.
pub type PageImagesCache = KeyedCache<PageImagesKey, PageImages>;

impl DetailCache {
    /// Drop the detail for `id` under every file scope.
    ///
    /// A mutation invalidates all scoped copies, not only the one it was made under.
    pub fn evict_question(&mut self, id: QuestionId) -> usize {
        self.evict_where(|(cached_id, _)| *cached_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(id: QuestionId) -> QuestionDetail {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "status": "verified",
            "choices": ["a"],
            "is_correct": ["true"],
        }))
        .expect("decode detail")
    }

    #[test]
    fn scoped_entries_are_distinct() {
        let mut cache = DetailCache::default();
        cache.insert((1, None), detail(1));
        assert!(cache.get(&(1, Some("a.pdf".to_string()))).is_none());
        assert!(cache.get(&(1, None)).is_some());
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                invalidations: 0
            }
        );
    }

    #[test]
    fn evict_question_drops_every_scope() {
        let mut cache = DetailCache::default();
        cache.insert((1, None), detail(1));
        cache.insert((1, Some("a.pdf".to_string())), detail(1));
        cache.insert((2, None), detail(2));

        assert_eq!(cache.evict_question(1), 2);
        assert!(!cache.contains(&(1, None)));
        assert!(!cache.contains(&(1, Some("a.pdf".to_string()))));
        assert!(cache.contains(&(2, None)));
        assert_eq!(cache.stats().invalidations, 1);

        assert_eq!(cache.evict_question(1), 0);
        assert_eq!(cache.stats().invalidations, 1);
    }

    #[test]
    fn page_images_keyed_by_question_number() {
        let mut cache = PageImagesCache::default();
        cache.insert(("a.pdf".to_string(), 3, Some(2)), PageImages::default());
        assert!(cache.contains(&("a.pdf".to_string(), 3, Some(2))));
        assert!(!cache.contains(&("a.pdf".to_string(), 3, None)));
        cache.clear();
        assert!(cache.is_empty());
    }
}

//! In-memory cache of the user's insight list.
//!
//! The cache reflects exactly the last successful list response. It is
//! replaced wholesale after every successful round trip and is never
//! patched incrementally, so no partial or speculative entries can
//! survive a failed mutation.

use ihub_core::insight::Insight;

/// Ordered read cache of insights, in server order.
#[derive(Debug, Default)]
pub struct InsightCache {
    entries: Vec<Insight>,
}

impl InsightCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole cache with a fresh list response.
    pub fn replace(&mut self, insights: Vec<Insight>) {
        self.entries = insights;
    }

    /// Discards all entries (logout path).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the cached entries in server order.
    pub fn entries(&self) -> &[Insight] {
        &self.entries
    }

    /// Looks up a cached insight by id.
    pub fn get(&self, id: i64) -> Option<&Insight> {
        self.entries.iter().find(|insight| insight.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insight(id: i64, title: &str) -> Insight {
        Insight {
            id,
            title: title.to_string(),
            content: String::new(),
            tags: String::new(),
            summary: None,
            sentiment: None,
            keywords: None,
        }
    }

    #[test]
    fn replace_swaps_the_whole_list() {
        let mut cache = InsightCache::new();
        cache.replace(vec![insight(1, "a"), insight(2, "b")]);
        assert_eq!(cache.len(), 2);

        cache.replace(vec![insight(3, "c")]);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(1).is_none());
        assert_eq!(cache.get(3).unwrap().title, "c");
    }

    #[test]
    fn order_follows_the_server_response() {
        let mut cache = InsightCache::new();
        cache.replace(vec![insight(9, "z"), insight(1, "a")]);
        let ids: Vec<i64> = cache.entries().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![9, 1]);
    }

    #[test]
    fn clear_empties_the_cache() {
        let mut cache = InsightCache::new();
        cache.replace(vec![insight(1, "a")]);
        cache.clear();
        assert!(cache.is_empty());
    }
}

//! Bounded store of parsed conditions
//!
//! Trees are keyed by sentence. When the store is full the oldest entry is
//! evicted, so memory stays bounded no matter how many distinct sentences
//! pass through the engine.

use ohmage_core::ConditionNode;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Cache hit/miss/eviction counters
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

#[derive(Debug)]
pub(crate) struct ConditionCache {
    capacity: usize,
    trees: HashMap<String, Arc<ConditionNode>>,
    /// Insertion order, oldest first
    order: VecDeque<String>,
    hits: AtomicU64,
    misses: u64,
    evictions: u64,
}

impl ConditionCache {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            trees: HashMap::new(),
            order: VecDeque::new(),
            hits: AtomicU64::new(0),
            misses: 0,
            evictions: 0,
        }
    }

    /// Look up a tree; counts a hit when found
    pub(crate) fn get(&self, sentence: &str) -> Option<Arc<ConditionNode>> {
        let tree = self.trees.get(sentence).map(Arc::clone);
        if tree.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        tree
    }

    /// Store a tree, returning the one kept for `sentence`
    ///
    /// If another caller stored the same sentence first, that tree wins.
    pub(crate) fn insert(
        &mut self,
        sentence: &str,
        tree: Arc<ConditionNode>,
    ) -> Arc<ConditionNode> {
        if let Some(existing) = self.get(sentence) {
            return existing;
        }

        self.misses += 1;
        if self.capacity == 0 {
            return tree;
        }

        while self.trees.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.trees.remove(&oldest);
            self.evictions += 1;
        }

        self.order.push_back(sentence.to_string());
        self.trees.insert(sentence.to_string(), Arc::clone(&tree));
        tree
    }

    pub(crate) fn len(&self) -> usize {
        self.trees.len()
    }

    pub(crate) fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses,
            evictions: self.evictions,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.trees.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ohmage_core::OperatorKind;

    fn tree(value: i64) -> Arc<ConditionNode> {
        Arc::new(ConditionNode::comparison("q", OperatorKind::Eq, value))
    }

    #[test]
    fn test_oldest_entry_evicted() {
        let mut cache = ConditionCache::new(2);
        cache.insert("a", tree(1));
        cache.insert("b", tree(2));
        cache.insert("c", tree(3));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());
        assert!(cache.get("c").is_some());
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_first_insert_wins() {
        let mut cache = ConditionCache::new(4);
        let first = cache.insert("a", tree(1));
        let second = cache.insert("a", tree(1));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                evictions: 0
            }
        );
    }

    #[test]
    fn test_zero_capacity_stores_nothing() {
        let mut cache = ConditionCache::new(0);
        cache.insert("a", tree(1));
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_clear() {
        let mut cache = ConditionCache::new(4);
        cache.insert("a", tree(1));
        cache.clear();
        assert_eq!(cache.len(), 0);

        // order is reset too, so refilling evicts nothing
        for (i, s) in ["a", "b", "c", "d"].into_iter().enumerate() {
            cache.insert(s, tree(i as i64));
        }
        assert_eq!(cache.len(), 4);
        assert_eq!(cache.stats().evictions, 0);
    }
}

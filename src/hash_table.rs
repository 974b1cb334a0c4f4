//! Separate-chaining hash table mapping each key to a set of values

use std::hash::{BuildHasher, Hash};

use ahash::RandomState;

/// Bucket count of a table built with `new()`
pub const INITIAL_BUCKETS: usize = 16;

/// Keys per bucket above which the bucket array doubles
pub const MAX_LOAD_FACTOR: f64 = 0.75;

#[derive(Debug, Clone)]
struct Chain<K, V> {
    key: K,
    values: Vec<V>,
}

/// Hash table with separate chaining
///
/// Each key owns a list of distinct values, so the same key can be stored
/// with several values and the same value under several keys.
#[derive(Debug, Clone)]
pub struct HashTable<K, V> {
    buckets: Vec<Vec<Chain<K, V>>>,
    hasher: RandomState,
    keys: usize,
    pairs: usize,
}

impl<K: Hash + Eq, V: PartialEq> HashTable<K, V> {
    pub fn new() -> Self {
        Self::with_buckets(INITIAL_BUCKETS)
    }

    pub fn with_buckets(count: usize) -> Self {
        let count = count.max(1);
        Self {
            buckets: (0..count).map(|_| Vec::new()).collect(),
            hasher: RandomState::new(),
            keys: 0,
            pairs: 0,
        }
    }

    /// Number of stored (key, value) pairs
    pub fn len(&self) -> usize {
        self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs == 0
    }

    /// Number of distinct keys
    pub fn key_count(&self) -> usize {
        self.keys
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Store `value` under `key`, returning false if that pair already exists
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let slot = self.slot(&key);

        if let Some(chain) = self.buckets[slot].iter_mut().find(|chain| chain.key == key) {
            if chain.values.contains(&value) {
                return false;
            }
            chain.values.push(value);
            self.pairs += 1;
            return true;
        }

        self.buckets[slot].push(Chain {
            key,
            values: vec![value],
        });
        self.keys += 1;
        self.pairs += 1;

        if self.keys as f64 > self.buckets.len() as f64 * MAX_LOAD_FACTOR {
            self.grow();
        }

        true
    }

    /// Remove one (key, value) pair, returning false if it was absent
    pub fn delete(&mut self, key: &K, value: &V) -> bool {
        let slot = self.slot(key);
        let bucket = &mut self.buckets[slot];

        let Some(position) = bucket.iter().position(|chain| chain.key == *key) else {
            return false;
        };
        let values = &mut bucket[position].values;
        let Some(index) = values.iter().position(|v| v == value) else {
            return false;
        };

        values.remove(index);
        self.pairs -= 1;

        if values.is_empty() {
            bucket.swap_remove(position);
            self.keys -= 1;
        }

        true
    }

    /// All values stored under `key`
    pub fn search(&self, key: &K) -> Option<&[V]> {
        self.buckets[self.slot(key)]
            .iter()
            .find(|chain| chain.key == *key)
            .map(|chain| chain.values.as_slice())
    }

    pub fn contains(&self, key: &K, value: &V) -> bool {
        self.search(key).is_some_and(|values| values.contains(value))
    }

    fn slot(&self, key: &K) -> usize {
        (self.hasher.hash_one(key) % self.buckets.len() as u64) as usize
    }

    /// Double the bucket array and rehash every chain
    fn grow(&mut self) {
        let doubled = self.buckets.len() * 2;
        let old = std::mem::replace(&mut self.buckets, (0..doubled).map(|_| Vec::new()).collect());

        for chain in old.into_iter().flatten() {
            let slot = self.slot(&chain.key);
            self.buckets[slot].push(chain);
        }
    }
}

impl<K: Hash + Eq, V: PartialEq> Default for HashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_search() {
        let mut table = HashTable::new();

        assert!(table.insert("fruit", "apple"));
        assert!(table.insert("fruit", "pear"));
        assert!(table.insert("veg", "leek"));
        assert!(!table.insert("fruit", "apple"));

        assert_eq!(table.len(), 3);
        assert_eq!(table.key_count(), 2);
        assert_eq!(table.search(&"fruit"), Some(&["apple", "pear"][..]));
        assert_eq!(table.search(&"nut"), None);
        assert!(table.contains(&"veg", &"leek"));
        assert!(!table.contains(&"veg", &"apple"));
    }

    #[test]
    fn test_delete() {
        let mut table = HashTable::new();
        table.insert(1, 'a');
        table.insert(1, 'b');

        assert!(table.delete(&1, &'a'));
        assert!(!table.delete(&1, &'a'));
        assert!(!table.delete(&2, &'a'));
        assert_eq!(table.search(&1), Some(&['b'][..]));

        // Removing the last value drops the key
        assert!(table.delete(&1, &'b'));
        assert_eq!(table.search(&1), None);
        assert_eq!(table.key_count(), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_grows_under_load() {
        let mut table = HashTable::with_buckets(4);

        for key in 0..100 {
            table.insert(key, key * 10);
        }

        assert!(table.bucket_count() >= 128);
        assert_eq!(table.key_count(), 100);
        for key in 0..100 {
            assert!(table.contains(&key, &(key * 10)), "key {}", key);
        }
    }
}

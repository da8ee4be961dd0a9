//! This module implements the insertion-ordered map.

use std::borrow::Borrow;
use std::cmp::Eq;
use std::collections::HashMap;
use std::hash::Hash;

/// A map that remembers the order in which keys were first inserted.
/// Overwriting a key keeps its original position.
#[derive(Debug, Clone)]
pub struct OrderedMap<K, V> {
    entries: Vec<(K, V)>,
    index: HashMap<K, usize>,
}

impl<K: Clone + Hash + Eq, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Hash + Eq, V> OrderedMap<K, V> {
    pub fn new() -> Self {
        OrderedMap {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts the pair and returns the previous value of \p key.
    pub fn insert(&mut self, key: K, val: V) -> Option<V> {
        if let Some(idx) = self.index.get(&key) {
            let prev = std::mem::replace(&mut self.entries[*idx].1, val);
            return Some(prev);
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, val));
        None
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.index.get(key)?;
        Some(&self.entries[*idx].1)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.index.get(key)?;
        Some(&mut self.entries[*idx].1)
    }

    /// Inserts the pair like `insert`, and returns the stored value.
    pub fn insert_and_get(&mut self, key: K, val: V) -> &mut V {
        let idx = match self.index.get(&key) {
            Some(idx) => {
                self.entries[*idx].1 = val;
                *idx
            }
            None => {
                let idx = self.entries.len();
                self.index.insert(key.clone(), idx);
                self.entries.push((key, val));
                idx
            }
        };
        &mut self.entries[idx].1
    }

    /// Returns the value of \p key, inserting the value that \p make
    /// returns if the key is missing.
    pub fn get_or_insert_with<F: FnOnce() -> V>(
        &mut self,
        key: K,
        make: F,
    ) -> &mut V {
        let idx = match self.index.get(&key) {
            Some(idx) => *idx,
            None => {
                let idx = self.entries.len();
                self.index.insert(key.clone(), idx);
                self.entries.push((key, make()));
                idx
            }
        };
        &mut self.entries[idx].1
    }

    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Removes \p key, and keeps the order of the remaining entries.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.index.remove(key)?;
        let (_, val) = self.entries.remove(idx);
        for slot in self.index.values_mut() {
            if *slot > idx {
                *slot -= 1;
            }
        }
        Some(val)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|pair| (&pair.0, &pair.1))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut V)> {
        self.entries.iter_mut().map(|pair| (&pair.0, &mut pair.1))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|pair| &pair.0)
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            inner: self.entries.iter(),
        }
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.entries.iter_mut().map(|pair| &mut pair.1)
    }
}

/// An iterator over the values of an `OrderedMap`, in insertion order.
#[derive(Debug, Clone)]
pub struct Values<'a, K, V> {
    inner: std::slice::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|pair| &pair.1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|pair| &pair.1)
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for OrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Clone + Hash + Eq, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

#[test]
fn test_ordered_map() {
    let mut map: OrderedMap<usize, usize> = OrderedMap::new();

    assert!(map.is_empty());
    map.insert(3, 3);
    map.insert(1, 1);
    map.insert(2, 2);
    assert_eq!(map.len(), 3);

    assert_eq!(*map.get(&1).unwrap(), 1);
    assert_eq!(*map.get(&2).unwrap(), 2);
    assert_eq!(*map.get(&3).unwrap(), 3);

    let keys: Vec<usize> = map.keys().cloned().collect();
    assert_eq!(keys, vec![3, 1, 2]);

    // Overwrites keep the original slot.
    assert_eq!(map.insert(3, 30), Some(3));
    let values: Vec<usize> = map.values().cloned().collect();
    assert_eq!(values, vec![30, 1, 2]);

    assert!(map.has(&1));
    assert!(!map.has(&4));
}

#[test]
fn test_ordered_map_remove() {
    let mut map: OrderedMap<String, usize> = OrderedMap::new();
    map.insert("a".to_string(), 1);
    map.insert("b".to_string(), 2);
    map.insert("c".to_string(), 3);

    assert_eq!(map.remove("b"), Some(2));
    assert_eq!(map.remove("b"), None);
    assert_eq!(*map.get("c").unwrap(), 3);

    map.insert("d".to_string(), 4);
    let keys: Vec<&str> = map.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, vec!["a", "c", "d"]);

    *map.get_or_insert_with("a".to_string(), || 0) += 10;
    *map.get_or_insert_with("e".to_string(), || 5) += 1;
    assert_eq!(*map.get("a").unwrap(), 11);
    assert_eq!(*map.get("e").unwrap(), 6);
}

#[test]
fn test_ordered_map_insert_and_get() {
    let mut map: OrderedMap<&str, usize> = OrderedMap::new();
    *map.insert_and_get("x", 1) += 1;
    map.insert("y", 5);
    *map.insert_and_get("x", 7) += 1;
    let pairs: Vec<(&str, usize)> = map.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(pairs, vec![("x", 8), ("y", 5)]);
    assert_eq!(map.values().rev().next(), Some(&5));
}

//! Map keyed by string content, looked up through views.
//!
//! [`ViewMap`] owns its keys as `String`s but accepts lookups by any
//! [`StrView`], so a range carved out of a parse buffer resolves without
//! allocating an owned key first.

use std::fmt;

use hashbrown::hash_table::{Entry, HashTable};

use crate::StrView;

fn hash_of(view: &StrView<'_>) -> u64 {
    view.content_hash() as u32 as u64
}

fn hash_str(s: &str) -> u64 {
    hash_of(&StrView::new(s))
}

/// A hash map from string content to `V`, keyed by [`StrView`]-compatible
/// lookups.
///
/// # Example
///
/// ```rust
/// use zerofmt_view::{StrView, ViewMap};
///
/// let mut colors = ViewMap::new();
/// colors.insert("warn", "#E5C07B");
///
/// let buffer: Vec<char> = "warn".chars().collect();
/// assert_eq!(colors.get(&StrView::from_chars(&buffer)), Some(&"#E5C07B"));
/// ```
pub struct ViewMap<V> {
    table: HashTable<(String, V)>,
}

impl<V> ViewMap<V> {
    pub fn new() -> Self {
        ViewMap {
            table: HashTable::new(),
        }
    }

    /// Inserts `value` under `key`, returning the previous value if the key
    /// was already present.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        let hash = hash_str(&key);
        match self
            .table
            .entry(hash, |(k, _)| *k == key, |(k, _)| hash_str(k))
        {
            Entry::Occupied(mut entry) => {
                Some(std::mem::replace(&mut entry.get_mut().1, value))
            }
            Entry::Vacant(entry) => {
                entry.insert((key, value));
                None
            }
        }
    }

    /// Looks up by view content without allocating.
    pub fn get(&self, key: &StrView<'_>) -> Option<&V> {
        self.table
            .find(hash_of(key), |(k, _)| key.eq_str(k))
            .map(|(_, v)| v)
    }

    pub fn get_str(&self, key: &str) -> Option<&V> {
        self.get(&StrView::new(key))
    }

    pub fn contains(&self, key: &StrView<'_>) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &StrView<'_>) -> Option<V> {
        match self
            .table
            .find_entry(hash_of(key), |(k, _)| key.eq_str(k))
        {
            Ok(entry) => {
                let ((_, value), _) = entry.remove();
                Some(value)
            }
            Err(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.table.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<V> Default for ViewMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for ViewMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ViewMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<V: fmt::Debug> fmt::Debug for ViewMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut map = ViewMap::new();
        assert_eq!(map.insert("red", 1), None);
        assert_eq!(map.insert("green", 2), None);
        assert_eq!(map.get_str("red"), Some(&1));
        assert_eq!(map.get_str("green"), Some(&2));
        assert_eq!(map.get_str("blue"), None);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn insert_replaces_existing() {
        let mut map = ViewMap::new();
        map.insert("key", 1);
        assert_eq!(map.insert("key", 2), Some(1));
        assert_eq!(map.get_str("key"), Some(&2));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn lookup_by_char_backing() {
        let mut map = ViewMap::new();
        map.insert("warn", "w");
        let buffer: Vec<char> = "some warn text".chars().collect();
        let key = StrView::char_range(&buffer, 5, 4).unwrap();
        assert_eq!(map.get(&key), Some(&"w"));
        assert!(map.contains(&key));
    }

    #[test]
    fn lookup_by_str_subrange() {
        let mut map = ViewMap::new();
        map.insert("color", 7);
        let key = StrView::str_range("<color=red>", 1, 5).unwrap();
        assert_eq!(map.get(&key), Some(&7));
    }

    #[test]
    fn remove_returns_value() {
        let mut map = ViewMap::new();
        map.insert("a", 1);
        assert_eq!(map.remove(&StrView::new("a")), Some(1));
        assert_eq!(map.remove(&StrView::new("a")), None);
        assert!(map.is_empty());
    }

    #[test]
    fn empty_key_is_a_valid_key() {
        let mut map = ViewMap::new();
        map.insert("", 9);
        assert_eq!(map.get(&StrView::empty()), Some(&9));
    }

    #[test]
    fn from_iter_collects_pairs() {
        let map: ViewMap<i32> = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get_str("b"), Some(&2));
    }

    #[test]
    fn many_keys_survive_growth() {
        let mut map = ViewMap::new();
        for i in 0..100 {
            map.insert(format!("key-{i}"), i);
        }
        assert_eq!(map.len(), 100);
        for i in 0..100 {
            let key = format!("key-{i}");
            assert_eq!(map.get_str(&key), Some(&i));
        }
    }
}

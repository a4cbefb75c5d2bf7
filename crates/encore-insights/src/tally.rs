//! Counting under a normalised key while keeping the first display form.

use std::{collections::HashMap, hash::Hash};

/// Occurrence counter that remembers insertion order and, per key, the
/// display value supplied the first time the key was seen.
pub(crate) struct Tally<K, V> {
  index:   HashMap<K, usize>,
  entries: Vec<(V, usize)>,
}

impl<K: Eq + Hash, V> Tally<K, V> {
  pub(crate) fn new() -> Self {
    Self { index: HashMap::new(), entries: Vec::new() }
  }

  /// Count one occurrence of `key`. `display` is only called for a new key.
  pub(crate) fn add(&mut self, key: K, display: impl FnOnce() -> V) {
    match self.index.get(&key) {
      Some(&i) => self.entries[i].1 += 1,
      None => {
        self.index.insert(key, self.entries.len());
        self.entries.push((display(), 1));
      }
    }
  }

  pub(crate) fn into_entries(self) -> Vec<(V, usize)> { self.entries }
}

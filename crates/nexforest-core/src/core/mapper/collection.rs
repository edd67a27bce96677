use slotmap::Key;
use std::collections::HashMap;

/// An insertion-ordered collection of related entities indexed by their string id.
///
/// This is the storage behind a `has_n` relation. Lookup by id is O(1); iteration
/// yields members in the order they were first inserted. Re-inserting an id keeps
/// its original position and replaces the stored key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasN<K: Key> {
    order: Vec<String>,
    index: HashMap<String, K>,
}

impl<K: Key> Default for HasN<K> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Key> HasN<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the key stored under `id`, if any.
    pub fn get(&self, id: &str) -> Option<K> {
        self.index.get(id).copied()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates over the stored keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.order.iter().map(move |id| self.index[id.as_str()])
    }

    /// Iterates over `(id, key)` pairs in insertion order.
    pub fn iter_with_id(&self) -> impl Iterator<Item = (&str, K)> + '_ {
        self.order
            .iter()
            .map(move |id| (id.as_str(), self.index[id.as_str()]))
    }

    /// Collects the keys into a vector, preserving insertion order.
    pub fn to_vec(&self) -> Vec<K> {
        self.keys().collect()
    }

    /// Stores `key` under `id` and returns the key it replaced, if any.
    pub(crate) fn insert(&mut self, id: &str, key: K) -> Option<K> {
        let replaced = self.index.insert(id.to_string(), key);
        if replaced.is_none() {
            self.order.push(id.to_string());
        }
        replaced
    }

    /// Removes the entry for `id`, but only when it currently maps to `key`.
    pub(crate) fn remove_entry(&mut self, id: &str, key: K) -> bool {
        if self.index.get(id) != Some(&key) {
            return false;
        }
        self.index.remove(id);
        self.order.retain(|existing| existing != id);
        true
    }
}

/// A single optional reference to a related entity.
///
/// Both sides of a one-to-one association and the member side of a one-to-many
/// association store their partner in a `Slot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot<K: Key> {
    target: Option<K>,
}

impl<K: Key> Default for Slot<K> {
    fn default() -> Self {
        Self { target: None }
    }
}

/// The member side of a `has_n` or `has_one` relation.
pub type BelongsTo<K> = Slot<K>;

/// The owner side of a `has_one` relation.
pub type HasOne<K> = Slot<K>;

impl<K: Key> Slot<K> {
    pub fn get(&self) -> Option<K> {
        self.target
    }

    pub fn is_set(&self) -> bool {
        self.target.is_some()
    }

    pub(crate) fn set(&mut self, key: K) {
        self.target = Some(key);
    }

    pub(crate) fn clear(&mut self) -> Option<K> {
        self.target.take()
    }
}

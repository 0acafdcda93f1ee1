//! In-memory entity collection: keyed records plus a `loaded` flag.

use crate::models::Entity;
use indexmap::IndexMap;

/// Records of one entity type, in the order the last load returned them.
///
/// `loaded == false` means the snapshot is not authoritative.
#[derive(Debug, Clone)]
pub struct CollectionState<E> {
    records: IndexMap<String, E>,
    loaded: bool,
}

impl<E> Default for CollectionState<E> {
    fn default() -> Self {
        Self {
            records: IndexMap::new(),
            loaded: false,
        }
    }
}

impl<E: Entity> CollectionState<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole record set and marks the collection loaded.
    pub(crate) fn replace_all(&mut self, records: Vec<E>) {
        self.records.clear();
        for record in records {
            // a duplicate key keeps its first position and takes the later value
            self.records.insert(record.key(), record);
        }
        self.loaded = true;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn get_all(&self) -> Vec<E> {
        self.records.values().cloned().collect()
    }

    pub fn get(&self, key: &str) -> Option<&E> {
        self.records.get(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

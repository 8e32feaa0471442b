use std::collections::HashMap;

use crate::store::collate::locale_compare;

/// A record with a stable unique key.
pub trait Entity: Clone {
    fn id(&self) -> &str;
}

/// Normalized collection: one record per id, ids kept in sorted order.
///
/// The only write is [`EntityStore::set_all`], which replaces everything.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityStore<T: Entity> {
    ids: Vec<String>,
    entities: HashMap<String, T>,
}

impl<T: Entity> Default for EntityStore<T> {
    fn default() -> Self {
        Self {
            ids: Vec::new(),
            entities: HashMap::new(),
        }
    }
}

impl<T: Entity> EntityStore<T> {
    pub fn from_records(records: impl IntoIterator<Item = T>) -> Self {
        let mut store = Self::default();
        store.set_all(records);
        store
    }

    /// Replace the whole collection.
    ///
    /// Later records with an already-seen id overwrite earlier ones. Ids are
    /// re-sorted with [`locale_compare`].
    pub fn set_all(&mut self, records: impl IntoIterator<Item = T>) {
        let mut entities = HashMap::new();
        for record in records {
            entities.insert(record.id().to_string(), record);
        }

        let mut ids: Vec<String> = entities.keys().cloned().collect();
        ids.sort_by(|a, b| locale_compare(a, b));

        self.ids = ids;
        self.entities = entities;
    }

    /// All records in id order.
    pub fn select_all(&self) -> Vec<&T> {
        self.ids
            .iter()
            .filter_map(|id| self.entities.get(id))
            .collect()
    }

    pub fn select_by_id(&self, id: &str) -> Option<&T> {
        self.entities.get(id)
    }

    pub fn select_ids(&self) -> &[String] {
        &self.ids
    }

    pub fn select_total(&self) -> usize {
        self.ids.len()
    }

    pub fn entities(&self) -> &HashMap<String, T> {
        &self.entities
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Named(&'static str, u32);

    impl Entity for Named {
        fn id(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_set_all_sorts_ids() {
        let store = EntityStore::from_records([Named("Peru", 1), Named("Chad", 2), Named("Oman", 3)]);
        assert_eq!(store.select_ids(), ["Chad", "Oman", "Peru"]);
        assert_eq!(store.select_total(), 3);
        let values: Vec<u32> = store.select_all().iter().map(|n| n.1).collect();
        assert_eq!(values, vec![2, 3, 1]);
    }

    #[test]
    fn test_set_all_replaces_previous_contents() {
        let mut store = EntityStore::from_records([Named("Peru", 1), Named("Chad", 2)]);
        store.set_all([Named("Fiji", 9)]);
        assert_eq!(store.select_ids(), ["Fiji"]);
        assert!(store.select_by_id("Peru").is_none());
    }

    #[test]
    fn test_duplicate_ids_keep_last_record() {
        let store = EntityStore::from_records([Named("Chad", 1), Named("Chad", 2)]);
        assert_eq!(store.select_total(), 1);
        assert_eq!(store.select_by_id("Chad"), Some(&Named("Chad", 2)));
    }

    #[test]
    fn test_default_is_empty() {
        let store: EntityStore<Named> = EntityStore::default();
        assert!(store.is_empty());
        assert!(store.select_all().is_empty());
    }
}

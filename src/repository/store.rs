//! Generic process-lifetime record store.
//!
//! Every read goes through [`EntityStore::active`], so soft-deleted records are
//! never returned by the public readers. The store is not synchronised on its
//! own; [`super::InMemoryRepository`] owns the lock.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt::Debug;
use std::hash::Hash;

use crate::domain::gallery::{Gallery, GalleryImage};
use crate::domain::product::Product;
use crate::domain::types::{GalleryId, ImageId, ProductId, VariationId};
use crate::domain::variation::ProductVariation;
use crate::repository::errors::{RepositoryError, RepositoryResult};

/// A record addressable by identifier.
pub trait Record: Clone {
    type Id: Copy + Eq + Hash + Debug;

    /// Entity label used in capacity errors.
    const ENTITY: &'static str;

    fn id(&self) -> Self::Id;

    fn is_active(&self) -> bool {
        true
    }
}

/// A record carrying its own active flag. Records without one are removed
/// with [`EntityStore::remove`] instead.
pub trait SoftDelete: Record {
    fn deactivate(&mut self);
}

#[derive(Debug, Clone)]
struct Slot<T> {
    seq: u64,
    record: T,
}

/// Insertion-ordered map from identifier to record with an optional cap on
/// the number of active records.
#[derive(Debug, Clone)]
pub struct EntityStore<T: Record> {
    records: HashMap<T::Id, Slot<T>>,
    next_seq: u64,
    capacity: Option<usize>,
}

impl<T: Record> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> EntityStore<T> {
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            next_seq: 0,
            capacity: None,
        }
    }

    pub fn with_capacity_limit(limit: usize) -> Self {
        Self {
            capacity: Some(limit),
            ..Self::new()
        }
    }

    fn active(&self) -> impl Iterator<Item = &Slot<T>> {
        self.records.values().filter(|slot| slot.record.is_active())
    }

    fn ordered<'a>(slots: impl Iterator<Item = &'a Slot<T>>) -> Vec<&'a T>
    where
        T: 'a,
    {
        let mut slots: Vec<&Slot<T>> = slots.collect();
        slots.sort_by_key(|slot| slot.seq);
        slots.into_iter().map(|slot| &slot.record).collect()
    }

    /// Inserts `record` under its own identifier.
    pub fn create(&mut self, record: T) -> RepositoryResult<T> {
        if let Some(limit) = self.capacity {
            if self.len() >= limit {
                return Err(RepositoryError::CapacityExceeded {
                    entity: T::ENTITY,
                    limit,
                });
            }
        }
        match self.records.entry(record.id()) {
            Entry::Occupied(_) => Err(RepositoryError::ValidationError(format!(
                "{} identifier {:?} already exists",
                T::ENTITY,
                record.id()
            ))),
            Entry::Vacant(entry) => {
                let seq = self.next_seq;
                self.next_seq += 1;
                entry.insert(Slot {
                    seq,
                    record: record.clone(),
                });
                Ok(record)
            }
        }
    }

    pub fn get_by_id(&self, id: &T::Id) -> Option<&T> {
        self.records
            .get(id)
            .map(|slot| &slot.record)
            .filter(|record| record.is_active())
    }

    /// Looks a record up regardless of its soft-delete flag.
    pub fn get_for_audit(&self, id: &T::Id) -> Option<&T> {
        self.records.get(id).map(|slot| &slot.record)
    }

    /// All active records in insertion order.
    pub fn get_all(&self) -> Vec<&T> {
        Self::ordered(self.active())
    }

    /// Active records matching `predicate`, in insertion order.
    pub fn filter<P>(&self, predicate: P) -> Vec<&T>
    where
        P: Fn(&T) -> bool,
    {
        Self::ordered(self.active().filter(|slot| predicate(&slot.record)))
    }

    pub fn find<P>(&self, predicate: P) -> Option<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.filter(predicate).into_iter().next()
    }

    /// Applies `merge` to a copy of the record and stores it only if the
    /// merge succeeds, so a failed merge never leaves a partial write.
    pub fn update<F>(&mut self, id: &T::Id, merge: F) -> RepositoryResult<T>
    where
        F: FnOnce(&mut T) -> RepositoryResult<()>,
    {
        let slot = self
            .records
            .get_mut(id)
            .filter(|slot| slot.record.is_active())
            .ok_or(RepositoryError::NotFound)?;
        let mut updated = slot.record.clone();
        merge(&mut updated)?;
        slot.record = updated.clone();
        Ok(updated)
    }

    pub fn remove(&mut self, id: &T::Id) -> RepositoryResult<T> {
        match self.records.get(id) {
            Some(slot) if slot.record.is_active() => {}
            _ => return Err(RepositoryError::NotFound),
        }
        self.records
            .remove(id)
            .map(|slot| slot.record)
            .ok_or(RepositoryError::NotFound)
    }

    pub fn exists(&self, id: &T::Id) -> bool {
        self.get_by_id(id).is_some()
    }

    /// Whether any active record satisfies `predicate`.
    pub fn any_active<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.active().any(|slot| predicate(&slot.record))
    }

    pub fn count_where<P>(&self, predicate: P) -> usize
    where
        P: Fn(&T) -> bool,
    {
        self.active().filter(|slot| predicate(&slot.record)).count()
    }

    /// Number of active records.
    pub fn len(&self) -> usize {
        self.active().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: SoftDelete> EntityStore<T> {
    /// Deactivates the record, keeping it addressable through
    /// [`EntityStore::get_for_audit`].
    ///
    /// Only records with an active flag can be soft-deleted:
    ///
    /// ```compile_fail
    /// use pushkind_catalog::domain::types::VariationId;
    /// use pushkind_catalog::domain::variation::ProductVariation;
    /// use pushkind_catalog::repository::store::EntityStore;
    ///
    /// let mut store: EntityStore<ProductVariation> = EntityStore::new();
    /// let _ = store.soft_delete(&VariationId::generate());
    /// ```
    pub fn soft_delete(&mut self, id: &T::Id) -> RepositoryResult<T> {
        self.update(id, |record| {
            record.deactivate();
            Ok(())
        })
    }
}

impl Record for Product {
    type Id = ProductId;
    const ENTITY: &'static str = "product";

    fn id(&self) -> ProductId {
        self.id
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

impl SoftDelete for Product {
    fn deactivate(&mut self) {
        self.is_active = false;
    }
}

impl Record for Gallery {
    type Id = GalleryId;
    const ENTITY: &'static str = "gallery";

    fn id(&self) -> GalleryId {
        self.id
    }
}

impl Record for GalleryImage {
    type Id = ImageId;
    const ENTITY: &'static str = "gallery image";

    fn id(&self) -> ImageId {
        self.id
    }
}

impl Record for ProductVariation {
    type Id = VariationId;
    const ENTITY: &'static str = "variation";

    fn id(&self) -> VariationId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: u32,
        text: &'static str,
        active: bool,
    }

    impl Record for Note {
        type Id = u32;
        const ENTITY: &'static str = "note";

        fn id(&self) -> u32 {
            self.id
        }

        fn is_active(&self) -> bool {
            self.active
        }
    }

    impl SoftDelete for Note {
        fn deactivate(&mut self) {
            self.active = false;
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Tag {
        id: u32,
    }

    impl Record for Tag {
        type Id = u32;
        const ENTITY: &'static str = "tag";

        fn id(&self) -> u32 {
            self.id
        }
    }

    fn note(id: u32, text: &'static str) -> Note {
        Note {
            id,
            text,
            active: true,
        }
    }

    #[test]
    fn get_all_keeps_insertion_order() {
        let mut store = EntityStore::new();
        for (id, text) in [(9, "c"), (1, "a"), (5, "b")] {
            store.create(note(id, text)).unwrap();
        }
        let texts: Vec<&str> = store.get_all().iter().map(|n| n.text).collect();
        assert_eq!(texts, vec!["c", "a", "b"]);
    }

    #[test]
    fn capacity_counts_active_records() {
        let mut store = EntityStore::with_capacity_limit(2);
        store.create(note(1, "a")).unwrap();
        store.create(note(2, "b")).unwrap();
        assert_eq!(
            store.create(note(3, "c")).unwrap_err(),
            RepositoryError::CapacityExceeded {
                entity: "note",
                limit: 2
            }
        );
        store.soft_delete(&1).unwrap();
        assert!(store.create(note(3, "c")).is_ok());
    }

    #[test]
    fn soft_deleted_records_are_hidden_but_auditable() {
        let mut store = EntityStore::new();
        store.create(note(1, "a")).unwrap();
        store.soft_delete(&1).unwrap();

        assert!(store.get_by_id(&1).is_none());
        assert!(store.get_all().is_empty());
        assert!(!store.exists(&1));
        assert!(!store.any_active(|n| n.text == "a"));
        assert_eq!(store.get_for_audit(&1).map(|n| n.active), Some(false));
        assert_eq!(store.soft_delete(&1).unwrap_err(), RepositoryError::NotFound);
    }

    #[test]
    fn failed_merge_keeps_previous_value() {
        let mut store = EntityStore::new();
        store.create(note(1, "a")).unwrap();
        let result = store.update(&1, |n| {
            n.text = "changed";
            Err(RepositoryError::ValidationError("nope".into()))
        });
        assert!(result.is_err());
        assert_eq!(store.get_by_id(&1).unwrap().text, "a");
    }

    #[test]
    fn update_and_remove_missing_records_fail() {
        let mut store: EntityStore<Note> = EntityStore::new();
        assert_eq!(
            store.update(&7, |_| Ok(())).unwrap_err(),
            RepositoryError::NotFound
        );
        assert_eq!(store.remove(&7).unwrap_err(), RepositoryError::NotFound);
    }

    #[test]
    fn duplicate_identifiers_are_rejected() {
        let mut store = EntityStore::new();
        store.create(note(1, "a")).unwrap();
        assert!(store.create(note(1, "b")).is_err());
        assert_eq!(store.get_by_id(&1).unwrap().text, "a");
    }

    #[test]
    fn records_without_active_flag_are_removed_outright() {
        let mut store = EntityStore::new();
        store.create(Tag { id: 1 }).unwrap();
        store.create(Tag { id: 2 }).unwrap();

        assert_eq!(store.remove(&1).unwrap(), Tag { id: 1 });
        assert!(!store.exists(&1));
        assert!(store.get_for_audit(&1).is_none());
        assert_eq!(store.len(), 1);
        assert_eq!(store.remove(&1).unwrap_err(), RepositoryError::NotFound);
    }
}

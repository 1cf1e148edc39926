use crate::error::{StoreError, StoreResult};
use crate::record::{PersistedRecord, StoredRecord, UserRecord};
use crate::types::RecordId;
use std::collections::HashSet;
use tracing::warn;

/// Ordered, in-memory Record Store. Order is insertion order; positions
/// shift down on remove, ids never change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<StoredRecord>,
    next_id: u64,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records read off the slot. Missing or duplicate
    /// ids are replaced with fresh ones; the first occurrence of an id keeps it.
    /// If the stored ids leave no room for fresh ones, every record is
    /// renumbered from zero.
    pub(crate) fn from_persisted(persisted: Vec<PersistedRecord>) -> Self {
        let (ids, next_id) = assign_ids(&persisted).unwrap_or_else(|| {
            warn!(count = persisted.len(), "stored ids exhausted, renumbering records");
            let ids = (0..persisted.len() as u64).map(RecordId).collect();
            (ids, persisted.len() as u64)
        });
        let records = ids
            .into_iter()
            .zip(persisted)
            .map(|(id, p)| StoredRecord { id, record: p.record })
            .collect();
        Self { records, next_id }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[StoredRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &StoredRecord> {
        self.records.iter()
    }

    pub fn get(&self, index: usize) -> Option<&StoredRecord> {
        self.records.get(index)
    }

    pub fn get_by_id(&self, id: RecordId) -> Option<&StoredRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    /// Resolve a list position to the record's stable id.
    pub fn id_at(&self, index: usize) -> StoreResult<RecordId> {
        self.records
            .get(index)
            .map(|r| r.id)
            .ok_or(StoreError::IndexOutOfRange {
                index,
                len: self.records.len(),
            })
    }

    /// Append `record` and return its freshly assigned id.
    pub fn push(&mut self, record: UserRecord) -> StoreResult<RecordId> {
        let id = RecordId(self.next_id);
        self.next_id = self.next_id.checked_add(1).ok_or(StoreError::IdsExhausted)?;
        self.records.push(StoredRecord { id, record });
        Ok(id)
    }

    /// Replace the fields of record `id` in place. Position and id are kept.
    pub fn replace(&mut self, id: RecordId, record: UserRecord) -> StoreResult<usize> {
        let pos = self.position(id).ok_or(StoreError::RecordNotFound(id.0))?;
        self.records[pos].record = record;
        Ok(pos)
    }

    /// Remove record `id`; later records shift down by one.
    pub fn remove(&mut self, id: RecordId) -> StoreResult<(usize, StoredRecord)> {
        let pos = self.position(id).ok_or(StoreError::RecordNotFound(id.0))?;
        Ok((pos, self.records.remove(pos)))
    }

    /// Drop every record. The id counter keeps running so ids are never reused
    /// within a session.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

/// Keep the first occurrence of each stored id and hand out fresh ids above
/// the largest one for the rest. `None` when the fresh ids would overflow.
fn assign_ids(persisted: &[PersistedRecord]) -> Option<(Vec<RecordId>, u64)> {
    let mut next_id = match persisted.iter().filter_map(|p| p.id).max() {
        Some(max) => max.0.checked_add(1)?,
        None => 0,
    };
    let mut seen = HashSet::with_capacity(persisted.len());
    let mut ids = Vec::with_capacity(persisted.len());
    for p in persisted {
        let id = match p.id {
            Some(id) if seen.insert(id) => id,
            _ => {
                let id = RecordId(next_id);
                next_id = next_id.checked_add(1)?;
                id
            }
        };
        ids.push(id);
    }
    Some((ids, next_id))
}

use super::db::SlotDb;
use crate::error::StoreResult;
use crate::record::PersistedRecord;
use crate::store::RecordStore;
use crate::types::SlotKey;
use tracing::{debug, warn};

/// The Record Store's durable slot: one key holding the full collection as
/// a JSON array. Writes are full snapshots, last writer wins.
pub struct RecordSlot {
    db: SlotDb,
    key: SlotKey,
}

impl RecordSlot {
    pub fn new(db: SlotDb, key: impl Into<SlotKey>) -> Self {
        Self { db, key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the slot. Absent, unreadable or malformed data all yield an
    /// empty store; nothing is raised to the caller.
    pub fn load(&self) -> RecordStore {
        let bytes = match self.db.read(&self.key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!(key = %self.key, "slot empty, starting with no records");
                return RecordStore::new();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "slot unreadable, starting with no records");
                return RecordStore::new();
            }
        };
        match serde_json::from_slice::<Vec<PersistedRecord>>(&bytes) {
            Ok(persisted) => {
                debug!(key = %self.key, count = persisted.len(), "loaded records");
                RecordStore::from_persisted(persisted)
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "slot data malformed, starting with no records");
                RecordStore::new()
            }
        }
    }

    /// Serialize every record and overwrite the slot.
    pub fn save(&self, store: &RecordStore) -> StoreResult<()> {
        let bytes = serde_json::to_vec(store.records())?;
        self.db.write(&self.key, &bytes)?;
        debug!(key = %self.key, count = store.len(), bytes = bytes.len(), "saved records");
        Ok(())
    }

    /// Remove the slot entirely.
    pub fn clear(&self) -> StoreResult<()> {
        let existed = self.db.remove(&self.key)?;
        debug!(key = %self.key, existed, "slot removed");
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn write_raw(&self, bytes: &[u8]) -> StoreResult<()> {
        self.db.write(&self.key, bytes)
    }
}

use crate::error::{StoreError, StoreResult};
use crate::types::SLOTS_TABLE_NAME;
use redb::backends::InMemoryBackend;
use redb::{Database, ReadableDatabase, TableDefinition};
use std::path::Path;

// Table definitions
// Key: slot name
// Value: serialized slot payload
const SLOTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new(SLOTS_TABLE_NAME);

/// Durable key-value slots backed by redb. Each write is its own committed
/// transaction, so a value is durable before the call returns.
pub struct SlotDb {
    db: Database,
}

impl SlotDb {
    /// Open or create the database at the specified path.
    /// Also ensures that the slots table exists.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Volatile database for tests and throwaway sessions.
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StoreResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(SLOTS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { db })
    }

    /// Overwrite slot `key` with `data`.
    pub fn write(&self, key: &str, data: &[u8]) -> StoreResult<()> {
        check_key(key)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SLOTS_TABLE)?;
            table.insert(key, data)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Remove slot `key`.
    /// Returns true if the slot existed and was removed, false otherwise.
    pub fn remove(&self, key: &str) -> StoreResult<bool> {
        check_key(key)?;
        let write_txn = self.db.begin_write()?;
        let existed = {
            let mut table = write_txn.open_table(SLOTS_TABLE)?;
            table.remove(key)?.is_some()
        };
        write_txn.commit()?;
        Ok(existed)
    }

    /// Copy out the bytes held in slot `key`.
    pub fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        check_key(key)?;
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SLOTS_TABLE)?;
        Ok(table.get(key)?.map(|access| access.value().to_vec()))
    }
}

fn check_key(key: &str) -> StoreResult<()> {
    if key.trim().is_empty() {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

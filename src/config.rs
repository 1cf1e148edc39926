use crate::types::{DEFAULT_DB_PATH, DEFAULT_SLOT_KEY, FieldSet, SlotKey};
use std::path::PathBuf;

/// Where the durable slot lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageLocation {
    File(PathBuf),
    /// Nothing outlives the process.
    InMemory,
}

/// Configuration for [`Controller::open`](crate::app::Controller::open).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStoreConfig {
    pub location: StorageLocation,
    /// Key of the slot holding the record array.
    ///
    /// Default: `"users"`.
    pub slot_key: SlotKey,
    /// Fields the form carries and validation requires.
    ///
    /// Default: [`FieldSet::Credentials`].
    pub field_set: FieldSet,
}

impl Default for UserStoreConfig {
    fn default() -> Self {
        Self {
            location: StorageLocation::File(PathBuf::from(DEFAULT_DB_PATH)),
            slot_key: SlotKey::new_static(DEFAULT_SLOT_KEY),
            field_set: FieldSet::default(),
        }
    }
}

impl UserStoreConfig {
    pub fn in_memory() -> Self {
        Self {
            location: StorageLocation::InMemory,
            ..Self::default()
        }
    }

    pub fn with_field_set(mut self, field_set: FieldSet) -> Self {
        self.field_set = field_set;
        self
    }
}

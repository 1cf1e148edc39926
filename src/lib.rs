//! Form-and-list management of user/credential records, mirrored in full to
//! a durable key-value slot on every change.

pub mod app;
pub mod config;
pub mod db;
pub mod draft;
pub mod error;
pub mod logging;
pub mod record;
pub mod store;
pub mod types;
pub mod validation;

pub use app::{Action, AppState, Confirm, Controller, ListRow, Notice};
pub use config::{StorageLocation, UserStoreConfig};
pub use db::{RecordSlot, SlotDb};
pub use draft::{DraftBuffer, Mode};
pub use error::{StoreError, StoreResult};
pub use record::{StoredRecord, UserRecord};
pub use store::RecordStore;
pub use types::{Field, FieldSet, RecordId};
pub use validation::{ValidationError, is_valid_email, validate};

pub mod db;
pub mod slot;

pub use db::SlotDb;
pub use slot::RecordSlot;

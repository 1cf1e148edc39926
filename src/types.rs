use smol_str::SmolStr;
use std::fmt;
use std::str::FromStr;

// ─── Slot Layout ────────────────────────────────────────────────────────────
//
//  ┌──────────────────────────────────────────────┐
//  │ redb table "slots"  (&str -> &[u8])          │
//  │   "users" -> JSON array of record objects    │
//  │     [{"id":1,"name":..,"email":..,           │
//  │       "username":..,"password":..}, ...]     │
//  └──────────────────────────────────────────────┘
//
// One key holds the whole collection. Every mutation rewrites it in full.

pub const DEFAULT_SLOT_KEY: &str = "users";
pub const SLOTS_TABLE_NAME: &str = "slots";
pub const DEFAULT_DB_PATH: &str = "users.redb";

/// Name of a durable slot.
pub type SlotKey = SmolStr;

// ─── RecordId ───────────────────────────────────────────────────────────────

/// Stable identity of a stored record. Survives deletes of other records,
/// unlike its position in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ─── Field ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Username,
    Password,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Username, Field::Password];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Username => "username",
            Field::Password => "password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(Field::Name),
            "email" => Ok(Field::Email),
            "username" => Ok(Field::Username),
            "password" => Ok(Field::Password),
            other => Err(format!("unknown field: {other}")),
        }
    }
}

// ─── FieldSet ───────────────────────────────────────────────────────────────

/// Which fields the form carries and validation requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldSet {
    /// `{name, email}`
    Basic,
    /// `{name, email, username, password}`
    #[default]
    Credentials,
}

impl FieldSet {
    pub fn fields(self) -> &'static [Field] {
        match self {
            FieldSet::Basic => &[Field::Name, Field::Email],
            FieldSet::Credentials => &Field::ALL,
        }
    }

    pub fn contains(self, field: Field) -> bool {
        self.fields().contains(&field)
    }
}

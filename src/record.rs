use crate::types::{Field, FieldSet, RecordId};
use serde::{Deserialize, Serialize};

// ─── UserRecord ─────────────────────────────────────────────────────────────

/// One user/credential entry. All fields are plain strings.
///
/// `name` and `email` default to empty when missing from stored JSON so that
/// data written with a different field set still loads. The credential
/// fields are omitted from JSON when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserRecord {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            username: None,
            password: None,
        }
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Empty record shaped for `field_set`: credential fields are present
    /// (as empty strings) only when the set carries them.
    pub fn empty(field_set: FieldSet) -> Self {
        match field_set {
            FieldSet::Basic => Self::default(),
            FieldSet::Credentials => Self::default().with_credentials("", ""),
        }
    }

    /// Value of `field`; absent optional fields read as `""`.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Username => self.username.as_deref().unwrap_or(""),
            Field::Password => self.password.as_deref().unwrap_or(""),
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Username => self.username = Some(value),
            Field::Password => self.password = Some(value),
        }
    }

    pub fn is_blank(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// Password rendered for display. Never reveals the length.
    pub fn masked_password(&self) -> &'static str {
        match self.password.as_deref() {
            Some(p) if !p.is_empty() => "********",
            _ => "",
        }
    }
}

// ─── StoredRecord ───────────────────────────────────────────────────────────

/// A record as held in the store: the user fields plus a stable id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: RecordId,
    #[serde(flatten)]
    pub record: UserRecord,
}

/// Shape accepted when reading the slot. Older data carries no `id`.
#[derive(Debug, Deserialize)]
pub(crate) struct PersistedRecord {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(flatten)]
    pub record: UserRecord,
}

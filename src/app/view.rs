use crate::record::StoredRecord;
use crate::types::RecordId;
use std::fmt;

/// One entry of the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub index: usize,
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ListRow {
    pub(crate) fn new(index: usize, stored: &StoredRecord, reveal_password: bool) -> Self {
        let record = &stored.record;
        let password = record.password.as_ref().map(|p| {
            if reveal_password {
                p.clone()
            } else {
                record.masked_password().to_string()
            }
        });
        Self {
            index,
            id: stored.id,
            name: record.name.clone(),
            email: record.email.clone(),
            username: record.username.clone(),
            password,
        }
    }
}

impl fmt::Display for ListRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}  Email: {}", self.index, self.name, self.email)?;
        if let Some(username) = &self.username {
            write!(f, "  Username: {username}")?;
        }
        if let Some(password) = &self.password {
            write!(f, "  Password: {password}")?;
        }
        Ok(())
    }
}

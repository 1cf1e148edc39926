use crate::record::UserRecord;
use crate::types::{Field, FieldSet, RecordId};

/// Form mode. `Creating` is the initial state; `Editing` is entered only
/// through an explicit begin-edit and names the record by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Creating,
    Editing(RecordId),
}

impl Mode {
    pub fn editing_id(self) -> Option<RecordId> {
        match self {
            Mode::Creating => None,
            Mode::Editing(id) => Some(id),
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Mode::Creating => "Add User",
            Mode::Editing(_) => "Edit User",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            Mode::Creating => "Add User",
            Mode::Editing(_) => "Update User",
        }
    }
}

/// The in-progress form: one record, the mode, and the password visibility
/// toggle (display only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftBuffer {
    field_set: FieldSet,
    record: UserRecord,
    mode: Mode,
    show_password: bool,
}

impl DraftBuffer {
    pub fn new(field_set: FieldSet) -> Self {
        Self {
            field_set,
            record: UserRecord::empty(field_set),
            mode: Mode::Creating,
            show_password: false,
        }
    }

    pub fn field_set(&self) -> FieldSet {
        self.field_set
    }

    pub fn record(&self) -> &UserRecord {
        &self.record
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn show_password(&self) -> bool {
        self.show_password
    }

    pub fn is_empty(&self) -> bool {
        self.record.is_blank()
    }

    /// Set one form field. Fields outside the configured set are ignored and
    /// reported as `false`.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> bool {
        if !self.field_set.contains(field) {
            return false;
        }
        self.record.set(field, value);
        true
    }

    /// Load `record` verbatim for editing record `id`.
    pub fn load(&mut self, id: RecordId, record: UserRecord) {
        self.record = record;
        self.mode = Mode::Editing(id);
        self.show_password = false;
    }

    pub fn toggle_password(&mut self) -> bool {
        self.show_password = !self.show_password;
        self.show_password
    }

    /// Back to an empty form in `Creating` mode.
    pub fn reset(&mut self) {
        self.record = UserRecord::empty(self.field_set);
        self.mode = Mode::Creating;
    }
}

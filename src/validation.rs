use crate::record::UserRecord;
use crate::types::FieldSet;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing-fields")]
    MissingFields,
    #[error("invalid-email")]
    InvalidEmail,
}

impl ValidationError {
    /// Message shown to the user.
    pub fn message(self) -> &'static str {
        match self {
            ValidationError::MissingFields => "All fields are required.",
            ValidationError::InvalidEmail => "Invalid email format.",
        }
    }
}

/// `local@domain.tld` with no whitespace and exactly the `@` separators the
/// pattern allows. No normalization.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Run the gate. The first failing rule wins: required fields are checked
/// before the email format.
pub fn validate(record: &UserRecord, field_set: FieldSet) -> Result<(), ValidationError> {
    if field_set
        .fields()
        .iter()
        .any(|f| record.get(*f).trim().is_empty())
    {
        return Err(ValidationError::MissingFields);
    }
    if !is_valid_email(&record.email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

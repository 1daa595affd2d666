//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{EmailId, Error, UserId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    EmptyList,
    InvalidId,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::EmptyList => "empty_list",
            Self::InvalidId => "invalid_id",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ValidationCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(
        field,
        ValidationCode::MissingField,
        format!("missing required field: {}", field.as_str()),
    )
}

/// Unwrap an optional body field, reporting which field was absent.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Unwrap an optional list field that must hold at least one entry.
pub(crate) fn require_non_empty<T>(value: Option<Vec<T>>, field: FieldName) -> Result<Vec<T>, Error> {
    let values = require(value, field)?;
    if values.is_empty() {
        return Err(field_error(
            field,
            ValidationCode::EmptyList,
            format!("{} must not be empty", field.as_str()),
        ));
    }
    Ok(values)
}

/// Parse a decimal path segment into a user id.
pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    raw.parse::<u64>().map(UserId::new).map_err(|_| {
        Error::invalid_request("user id must be a non-negative integer").with_details(json!({
            "field": "id",
            "value": raw,
            "code": ValidationCode::InvalidId.as_str(),
        }))
    })
}

pub(crate) fn email_ids(raw: Vec<u64>) -> Vec<EmailId> {
    raw.into_iter().map(EmailId::new).collect()
}

pub(crate) fn user_ids(raw: Vec<u64>) -> Vec<UserId> {
    raw.into_iter().map(UserId::new).collect()
}

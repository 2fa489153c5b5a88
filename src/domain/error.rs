use std::collections::BTreeMap;

use color_eyre::eyre::Report;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthAPIError {
    #[error("Missing token")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

#[derive(Debug, Error)]
pub enum TeamAPIError {
    #[error("Authentication error")]
    AuthenticationError(#[from] AuthAPIError),
    #[error("Member lookup failed")]
    LookupError(#[source] Report),
    #[error("Validation error")]
    ValidationError(#[from] ValidationError),
    #[error("Field validation error")]
    FieldValidationError(#[from] FieldErrors),
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

#[derive(Debug, Error)]
pub enum ProjectAPIError {
    #[error("Authentication error")]
    AuthenticationError(#[from] AuthAPIError),
    #[error("Validation error")]
    ValidationError(#[from] ValidationError),
    #[error("Upstream error")]
    UpstreamError(#[source] Report),
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

#[derive(Debug, Error)]
#[error("Validation error: {0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: String) -> Self {
        Self(message)
    }

    pub fn as_ref(&self) -> &String {
        &self.0
    }
}

/// Per-field validation failures, keyed by request field name.
#[derive(Debug, Default, Error, Serialize)]
#[error("Field validation failed: {0:?}")]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: &str) {
        self.0.insert(field.to_owned(), message.to_owned());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }
}

#[test]
fn test_field_errors_collects_all_fields() {
    let mut errors = FieldErrors::default();
    assert!(errors.is_empty());

    errors.add("email", "Email is required");
    errors.add("phone_number", "Phone number is required");

    assert!(!errors.is_empty());
    assert_eq!(errors.as_map().len(), 2);
    assert_eq!(
        errors.as_map().get("email").map(String::as_str),
        Some("Email is required")
    );
}

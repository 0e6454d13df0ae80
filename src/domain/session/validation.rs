//! Session request validation, applied by the transports before any handler
//! runs

use thiserror::Error;

use crate::domain::DomainError;

/// Errors that can occur during session request validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionValidationError {
    #[error("SessionKey cannot be empty")]
    EmptyKey,

    #[error("SessionValue cannot be empty")]
    MissingValue,
}

impl From<SessionValidationError> for DomainError {
    fn from(err: SessionValidationError) -> Self {
        DomainError::validation(err.to_string())
    }
}

/// Validate a session key
pub fn validate_session_key(key: &str) -> Result<(), SessionValidationError> {
    if key.is_empty() {
        return Err(SessionValidationError::EmptyKey);
    }

    Ok(())
}

/// Validate that a session value was supplied, returning it
pub fn validate_session_value<T>(value: Option<T>) -> Result<T, SessionValidationError> {
    value.ok_or(SessionValidationError::MissingValue)
}

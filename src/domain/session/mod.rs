//! Session domain - session values, their encoding and the storage contract

mod repository;
mod validation;
mod value;

pub use repository::{SessionRepository, StoredValue};
pub use validation::{validate_session_key, validate_session_value, SessionValidationError};
pub use value::SessionValue;

#[cfg(test)]
pub use repository::MockSessionRepository;

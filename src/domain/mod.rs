//! Domain layer - Core business logic and entities

pub mod error;
pub mod session;

pub use error::DomainError;
pub use session::{
    validate_session_key, validate_session_value, SessionRepository, SessionValidationError,
    SessionValue, StoredValue,
};

//! HTTP request and error types

pub mod error;
pub mod json;
pub mod session;

pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use json::Json;
pub use session::PostSessionRequest;

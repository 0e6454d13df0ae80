//! Infrastructure layer - Session backends and observability

pub mod observability;
pub mod session_store;

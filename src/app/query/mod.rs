//! Session queries

mod get_session;

pub use get_session::{GetSession, GetSessionHandler};

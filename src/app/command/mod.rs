//! Session commands

mod delete_session;
mod set_session;

pub use delete_session::{DeleteSession, DeleteSessionHandler};
pub use set_session::{SetSession, SetSessionHandler};

//! Shared state for the HTTP handlers

use crate::app::Application;

#[derive(Clone, Debug)]
pub struct AppState {
    pub app: Application,
}

impl AppState {
    pub fn new(app: Application) -> Self {
        Self { app }
    }
}

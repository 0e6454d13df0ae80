//! HTTP middleware

pub mod logging;
pub mod metrics;

pub use logging::{logging_middleware, REQUEST_ID_HEADER};
pub use metrics::metrics_middleware;

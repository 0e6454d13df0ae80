//! Session request bodies

use serde::{Deserialize, Serialize};

use crate::domain::SessionValue;

/// Body of `POST /session`.
///
/// Both fields are optional at the serde level so a missing key or value is
/// reported by validation as a 400, not as a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostSessionRequest {
    #[serde(rename = "sessionKey", default)]
    pub session_key: String,
    #[serde(rename = "sessionValue", default)]
    pub session_value: Option<SessionValue>,
}

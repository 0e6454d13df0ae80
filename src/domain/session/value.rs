//! Session value and its storage encoding

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::DomainError;

/// The value half of a session: a string-keyed map of arbitrary JSON values.
///
/// The storage encoding is JSON. Decoding what was encoded always yields the
/// same mapping, but re-encoding decoded bytes may reorder keys, so byte-level
/// equality is not preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionValue(Map<String, Value>);

impl SessionValue {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encodes the value into the bytes handed to a session repository
    pub fn encode(&self) -> Result<Bytes, DomainError> {
        serde_json::to_vec(&self.0)
            .map(Bytes::from)
            .map_err(|e| DomainError::serialization(format!("Failed to encode session value: {}", e)))
    }

    /// Decodes bytes read back from a session repository.
    ///
    /// Anything other than a JSON object is rejected.
    pub fn decode(data: &[u8]) -> Result<Self, DomainError> {
        serde_json::from_slice::<Map<String, Value>>(data)
            .map(Self)
            .map_err(|e| DomainError::serialization(format!("Failed to decode session value: {}", e)))
    }
}

impl From<Map<String, Value>> for SessionValue {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<SessionValue> for Value {
    fn from(value: SessionValue) -> Self {
        Value::Object(value.0)
    }
}

impl TryFrom<Value> for SessionValue {
    type Error = DomainError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(DomainError::validation(format!(
                "Session value must be a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> SessionValue {
        SessionValue::try_from(json!({
            "user": {"id": 42, "roles": ["admin", "dev"]},
            "theme": "dark",
            "ratio": 0.5,
            "active": true,
            "nothing": null
        }))
        .unwrap()
    }

    #[test]
    fn test_decode_of_encode_is_identity() {
        let value = sample();
        let encoded = value.encode().unwrap();

        assert_eq!(SessionValue::decode(&encoded).unwrap(), value);
    }

    #[test]
    fn test_decode_accepts_any_key_order() {
        let a = SessionValue::decode(br#"{"a":1,"b":2}"#).unwrap();
        let b = SessionValue::decode(br#"{"b":2,"a":1}"#).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_decode_rejects_plain_text() {
        let err = SessionValue::decode(b"aValue").unwrap_err();
        assert!(matches!(err, DomainError::Serialization { .. }));
    }

    #[test]
    fn test_decode_rejects_non_object_json() {
        assert!(SessionValue::decode(b"[1,2,3]").is_err());
        assert!(SessionValue::decode(b"\"text\"").is_err());
        assert!(SessionValue::decode(b"null").is_err());
        assert!(SessionValue::decode(b"").is_err());
    }

    #[test]
    fn test_empty_value_round_trips() {
        let value = SessionValue::new();
        let encoded = value.encode().unwrap();

        assert_eq!(&encoded[..], b"{}");
        assert!(SessionValue::decode(&encoded).unwrap().is_empty());
    }

    #[test]
    fn test_try_from_non_object() {
        let err = SessionValue::try_from(json!(["x"])).unwrap_err();
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_with_field() {
        let value = SessionValue::new().with_field("x", 1);

        assert_eq!(value.len(), 1);
        assert_eq!(value.get("x"), Some(&json!(1)));
    }

    #[test]
    fn test_serializes_transparently() {
        let value = SessionValue::new().with_field("x", 1);
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"x":1}"#);
    }
}

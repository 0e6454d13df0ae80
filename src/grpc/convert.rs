//! Conversion between JSON maps and `google.protobuf.Struct`

use prost_types::{value::Kind, ListValue, Struct, Value as ProtoValue};
use serde_json::{Map, Number, Value};

use crate::domain::DomainError;

/// Largest magnitude below which every integer is exactly representable as f64
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

pub fn map_to_struct(map: Map<String, Value>) -> Struct {
    Struct {
        fields: map
            .into_iter()
            .map(|(key, value)| (key, json_to_proto(value)))
            .collect(),
    }
}

/// Fails on numbers JSON cannot carry (NaN and the infinities)
pub fn struct_to_map(value: Struct) -> Result<Map<String, Value>, DomainError> {
    value
        .fields
        .into_iter()
        .map(|(key, value)| Ok((key, proto_to_json(value)?)))
        .collect()
}

fn json_to_proto(value: Value) -> ProtoValue {
    let kind = match value {
        Value::Null => Kind::NullValue(0),
        Value::Bool(b) => Kind::BoolValue(b),
        // Struct numbers are doubles, so large integers lose precision
        Value::Number(n) => Kind::NumberValue(n.as_f64().unwrap_or_default()),
        Value::String(s) => Kind::StringValue(s),
        Value::Array(values) => Kind::ListValue(ListValue {
            values: values.into_iter().map(json_to_proto).collect(),
        }),
        Value::Object(map) => Kind::StructValue(map_to_struct(map)),
    };

    ProtoValue { kind: Some(kind) }
}

fn proto_to_json(value: ProtoValue) -> Result<Value, DomainError> {
    Ok(match value.kind {
        None | Some(Kind::NullValue(_)) => Value::Null,
        Some(Kind::BoolValue(b)) => Value::Bool(b),
        Some(Kind::NumberValue(n)) => Value::Number(number_from_f64(n)?),
        Some(Kind::StringValue(s)) => Value::String(s),
        Some(Kind::ListValue(list)) => Value::Array(
            list.values
                .into_iter()
                .map(proto_to_json)
                .collect::<Result<_, _>>()?,
        ),
        Some(Kind::StructValue(s)) => Value::Object(struct_to_map(s)?),
    })
}

/// Whole numbers come back as JSON integers, everything else as floats
fn number_from_f64(n: f64) -> Result<Number, DomainError> {
    if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER {
        return Ok(Number::from(n as i64));
    }

    Number::from_f64(n).ok_or_else(|| {
        DomainError::serialization(format!("number {} cannot be represented in JSON", n))
    })
}

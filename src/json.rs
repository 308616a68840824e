//! Conversions between [`Value`] and `serde_json::Value`
//!
//! JSON has no byte strings, so BSER strings are converted lossily as UTF-8.
//! Doubles that JSON cannot represent (NaN, infinities) become `null`.

use alloc::string::String;
use alloc::vec::Vec;

use serde_json::{Map as JsonMap, Number, Value as Json};

use crate::error::Error;
use crate::value::{Map, Value};

impl From<&Value> for Json {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Json::Null,
            Value::Bool(v) => Json::Bool(*v),
            Value::Integer(v) => Json::Number(Number::from(*v)),
            Value::Double(v) => Number::from_f64(*v).map_or(Json::Null, Json::Number),
            Value::String(bytes) => Json::String(String::from_utf8_lossy(bytes).into_owned()),
            Value::Array(items) => Json::Array(items.iter().map(Json::from).collect()),
            Value::Object(map) => Json::Object(
                map.iter()
                    .map(|(k, v)| (String::from_utf8_lossy(k).into_owned(), Json::from(v)))
                    .collect::<JsonMap<String, Json>>(),
            ),
        }
    }
}

impl From<Value> for Json {
    fn from(value: Value) -> Self {
        Json::from(&value)
    }
}

impl TryFrom<&Json> for Value {
    type Error = Error;

    fn try_from(json: &Json) -> Result<Self, Self::Error> {
        let value = match json {
            Json::Null => Value::Null,
            Json::Bool(v) => Value::Bool(*v),
            Json::Number(n) => {
                if let Some(v) = n.as_i64() {
                    Value::Integer(v)
                } else if n.is_u64() {
                    // above i64::MAX: no lossless wire form
                    return Err(Error::UnsupportedValue);
                } else {
                    Value::Double(n.as_f64().ok_or(Error::UnsupportedValue)?)
                }
            }
            Json::String(s) => Value::String(s.as_bytes().to_vec()),
            Json::Array(items) => Value::Array(
                items
                    .iter()
                    .map(Value::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Json::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| Ok((k.as_bytes().to_vec(), Value::try_from(v)?)))
                    .collect::<Result<Map, Error>>()?,
            ),
        };
        Ok(value)
    }
}

impl TryFrom<Json> for Value {
    type Error = Error;

    fn try_from(json: Json) -> Result<Self, Self::Error> {
        Value::try_from(&json)
    }
}

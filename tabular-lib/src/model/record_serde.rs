//! JSON conversion and serde support for Record and Value.
//!
//! ## Serialization
//!
//! - A `Record` serializes as a JSON object, nested records as nested objects.
//! - `DateTime` serializes as an RFC 3339 string.
//! - `Null` serializes as `null` (kept, so the shape round-trips).
//!
//! ## Deserialization
//!
//! Everything goes through `serde_json::Value` first:
//! - integers that fit in 32 bits become `Int`, larger ones `Long`
//! - other numbers become `Float`
//! - strings that parse as RFC 3339 become `DateTime`, all others stay `String`
//! - objects become `Record`, arrays become `List`

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;

use super::Record;
use super::Value;
use crate::error::FieldError;

// =============================================================================
// Serialization
// =============================================================================

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// =============================================================================
// Deserialization
// =============================================================================

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map representing a record")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Record, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut record = Record::new();
        while let Some(key) = map.next_key::<String>()? {
            let value: serde_json::Value = map.next_value()?;
            record.fields.insert(key, Value::from(value));
        }
        Ok(record)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

impl Record {
    /// Converts a JSON object into a record.
    ///
    /// Fails if the document is not an object.
    pub fn from_json(json: serde_json::Value) -> Result<Record, FieldError> {
        match Value::from(json) {
            Value::Record(record) => Ok(*record),
            other => Err(FieldError::NotAnObject {
                actual: other.type_name(),
            }),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    match i32::try_from(i) {
                        Ok(small) => Value::Int(small),
                        Err(_) => Value::Long(i),
                    }
                } else if let Some(f) = n.as_f64() {
                    Value::Float(f)
                } else {
                    Value::Null
                }
            }
            serde_json::Value::String(s) => {
                // Try to parse as DateTime (RFC 3339)
                if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&s) {
                    Value::DateTime(dt.with_timezone(&chrono::Utc))
                } else {
                    Value::String(s)
                }
            }
            serde_json::Value::Array(arr) => Value::List(arr.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(obj) => {
                let record: Record = obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect();
                Value::Record(Box::new(record))
            }
        }
    }
}

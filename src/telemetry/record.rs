use std::io::Read;
use std::path::Path;

use serde_json::{Map, Value};

use crate::foundation::error::{HudError, HudResult};

/// One loosely-typed telemetry sample: field name to JSON value.
///
/// Produced externally, one per output frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TelemetryRecord {
    fields: Map<String, Value>,
}

impl TelemetryRecord {
    /// Wrap an existing JSON object map.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Convert a JSON value; anything that is not an object is a missing record.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    /// Raw field value, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Set a field, returning `self` for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Number of fields in the record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Return `true` when the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Ordered telemetry records in presentation order; `None` marks a missing sample.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TelemetrySequence {
    /// One entry per output frame.
    pub records: Vec<Option<TelemetryRecord>>,
}

impl TelemetrySequence {
    /// Parse a JSON array of objects (records) and `null`s (missing markers).
    pub fn from_json_str(s: &str) -> HudResult<Self> {
        let value: Value = serde_json::from_str(s)
            .map_err(|e| HudError::telemetry(format!("invalid telemetry json: {e}")))?;
        Self::from_json_value(value)
    }

    /// Parse from any reader producing the JSON described in [`Self::from_json_str`].
    pub fn from_reader(reader: impl Read) -> HudResult<Self> {
        let value: Value = serde_json::from_reader(reader)
            .map_err(|e| HudError::telemetry(format!("invalid telemetry json: {e}")))?;
        Self::from_json_value(value)
    }

    /// Read and parse a telemetry JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> HudResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            HudError::telemetry(format!("failed to open '{}': {e}", path.display()))
        })?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    fn from_json_value(value: Value) -> HudResult<Self> {
        let Value::Array(items) = value else {
            return Err(HudError::telemetry(
                "telemetry json must be an array of records",
            ));
        };
        let mut records = Vec::with_capacity(items.len());
        for (i, item) in items.into_iter().enumerate() {
            match item {
                Value::Null => records.push(None),
                Value::Object(fields) => records.push(Some(TelemetryRecord::new(fields))),
                other => {
                    return Err(HudError::telemetry(format!(
                        "telemetry entry {i} must be an object or null, got {}",
                        json_kind(&other)
                    )));
                }
            }
        }
        Ok(Self { records })
    }

    /// Number of frames in the sequence.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Return `true` when there are no frames.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/telemetry/record.rs"]
mod tests;

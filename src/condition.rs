// src/condition.rs
//
// Inbound request shape: a string-keyed JSON object.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key selecting the read variant, and the counter operation
pub const BY: &str = "by";

/// Request parameters. Missing keys read as neutral defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Condition(Map<String, Value>);

impl Condition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// The `by` discriminator, `""` when absent
    pub fn by(&self) -> &str {
        self.get_str(BY)
    }

    /// String value, `""` when absent or not a string
    pub fn get_str(&self, key: &str) -> &str {
        self.0.get(key).and_then(Value::as_str).unwrap_or("")
    }

    /// Integer value given as a JSON number or a numeric string
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        match self.0.get(key)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn get_u32(&self, key: &str) -> Option<u32> {
        self.get_i64(key).and_then(|v| u32::try_from(v).ok())
    }

    /// The whole condition as a JSON object
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl TryFrom<Value> for Condition {
    type Error = Value;

    /// Only JSON objects are conditions; anything else is handed back
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

impl From<Map<String, Value>> for Condition {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

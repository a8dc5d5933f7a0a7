use serde_json::{Map, Value};

use crate::tools::ToolError;

/// Tool-call arguments decoded into a JSON object.
///
/// The voice platform sends either an object or a JSON-encoded string; both
/// are accepted, and absent arguments mean an empty object.
#[derive(Debug, Default)]
pub struct ToolArguments(Map<String, Value>);

impl ToolArguments {
    pub fn decode(raw: &Value) -> Result<Self, ToolError> {
        match raw {
            Value::Null => Ok(Self::default()),
            Value::Object(map) => Ok(Self(map.clone())),
            Value::String(text) if text.trim().is_empty() => Ok(Self::default()),
            Value::String(text) => match serde_json::from_str::<Value>(text) {
                Ok(Value::Object(map)) => Ok(Self(map)),
                Ok(other) => Err(ToolError::InvalidArguments(format!(
                    "expected an object, got {}",
                    type_name(&other)
                ))),
                Err(e) => Err(ToolError::InvalidArguments(e.to_string())),
            },
            other => Err(ToolError::InvalidArguments(format!(
                "expected an object, got {}",
                type_name(other)
            ))),
        }
    }

    /// Permissive text read: strings as-is, numbers and booleans rendered,
    /// anything else (including absent) as `""`.
    pub fn text(&self, key: &str) -> String {
        match self.0.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }

    /// Strict read of the first key present holding a string.
    pub fn string(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|k| self.0.get(*k).and_then(Value::as_str))
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

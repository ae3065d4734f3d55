//! Formato del blob de datos: un objeto JSON `campo -> valor`.

use serde_json::{Map, Value};

use crate::errors::CoreFormError;

pub type StepData = Map<String, Value>;

pub fn encode_data(data: &StepData) -> Result<String, CoreFormError> {
    serde_json::to_string(data).map_err(|e| CoreFormError::Serialization(e.to_string()))
}

/// Un blob vacío equivale a un step sin datos todavía.
pub fn decode_data(blob: &str) -> Result<StepData, CoreFormError> {
    if blob.trim().is_empty() {
        return Ok(StepData::new());
    }
    match serde_json::from_str::<Value>(blob) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(CoreFormError::Deserialization(format!("expected object, got {}", type_name(&other)))),
        Err(e) => Err(CoreFormError::Deserialization(e.to_string())),
    }
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

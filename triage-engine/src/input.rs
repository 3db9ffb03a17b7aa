//! Lenient decoding of patient JSON.

use serde_json::Value;
use triage_core::{PatientInput, SymptomInput, TriageError};

/// Decode a patient object from a JSON string.
pub fn parse_patient(json: &str) -> Result<PatientInput, TriageError> {
    let value: Value =
        serde_json::from_str(json).map_err(|err| TriageError::Parse(err.to_string()))?;
    Ok(decode_patient(&value))
}

/// Pick the known fields out of `value`; anything missing or of an
/// unexpected type falls back to its default.
pub fn decode_patient(value: &Value) -> PatientInput {
    PatientInput {
        age: value.get("age").and_then(scalar_text),
        gender: value.get("gender").and_then(scalar_text),
        symptoms: value
            .get("symptoms")
            .map(decode_symptoms)
            .unwrap_or_default(),
    }
}

fn decode_symptoms(value: &Value) -> SymptomInput {
    match value {
        Value::String(text) => SymptomInput::Text(text.clone()),
        Value::Array(items) => SymptomInput::List(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        ),
        _ => SymptomInput::default(),
    }
}

/// Strings are kept verbatim; only the empty string is treated as absent.
fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        _ => return None,
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

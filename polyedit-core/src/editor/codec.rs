use serde_json::Value;

use crate::error::{EditError, Result};

/// JSON text form of a coordinate sequence: a flat array of numbers.
///
/// Non-finite coordinates have no JSON representation and come out as `null`,
/// which [`deserialize`] rejects.
pub fn serialize(points: &[f64]) -> String {
    Value::from(points.to_vec()).to_string()
}

/// Parse the JSON text form of a coordinate sequence.
///
/// Fails on anything other than an even-length array of numbers.
pub fn deserialize(text: &str) -> Result<Vec<f64>> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| EditError::Parse(e.to_string()))?;
    let entries = match value {
        Value::Array(entries) => entries,
        other => {
            return Err(EditError::Parse(format!(
                "expected an array of numbers, found {}",
                kind(&other)
            )))
        }
    };
    let points = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            entry.as_f64().ok_or_else(|| {
                EditError::Parse(format!("entry {} is {}, not a number", i, kind(entry)))
            })
        })
        .collect::<Result<Vec<f64>>>()?;
    if points.len() % 2 != 0 {
        return Err(EditError::Parse(format!(
            "odd number of coordinates ({})",
            points.len()
        )));
    }
    Ok(points)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

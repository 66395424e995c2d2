//! Raw report rows as returned by the backend.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// `/reports/summary` row: result count per status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusCount {
    pub status: String,
    pub count: u64,
}

/// `/reports/by-lab` row: patients affected per test and status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabRow {
    pub test_name: String,
    pub status: String,
    pub patient_count: u64,
}

/// `/reports/by-gender` row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenderRow {
    pub gender: Option<String>,
    pub patient_count: u64,
}

/// `/reports/unreviewed-critical` row: one critical lab result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriticalResult {
    pub subject_id: i64,
    pub test_name: String,
    pub value: Value,
    pub unit: Option<String>,
}

/// `/reports/recent-critical` row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecentCritical {
    pub test_name: String,
    pub count: u64,
}

/// Read an array of rows, skipping elements that do not fit the row shape.
///
/// A non-array body yields no rows.
pub fn rows_from_value<T: DeserializeOwned>(value: &Value) -> Vec<T> {
    let Some(items) = value.as_array() else {
        debug!("Expected an array of rows, got {}", json_kind(value));
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(row) => Some(row),
            Err(e) => {
                debug!("Skipping row that does not match the expected shape: {}", e);
                None
            }
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

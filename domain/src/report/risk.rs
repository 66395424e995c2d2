//! Risk prediction view models.
//!
//! Counter bodies are read field by field with missing or non-numeric
//! values treated as zero.

use serde::{Deserialize, Serialize};
use serde_json::Value;

fn count_field(value: &Value, key: &str) -> u64 {
    value.get(key).and_then(Value::as_u64).unwrap_or(0)
}

/// Patients per predicted risk label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RiskDistribution {
    pub normal: u64,
    pub abnormal: u64,
    pub critical: u64,
    /// Total patients scored, when reported.
    pub total: Option<u64>,
}

impl RiskDistribution {
    pub fn from_value(value: &Value) -> Self {
        Self {
            normal: count_field(value, "NORMAL"),
            abnormal: count_field(value, "ABNORMAL"),
            critical: count_field(value, "CRITICAL"),
            total: value.get("total").and_then(Value::as_u64),
        }
    }
}

/// Unreviewed critical results and the patients they affect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UnreviewedSummary {
    pub total_unreviewed: u64,
    pub affected_patients: u64,
}

impl UnreviewedSummary {
    pub fn from_value(value: &Value) -> Self {
        Self {
            total_unreviewed: count_field(value, "total_unreviewed"),
            affected_patients: count_field(value, "affected_patients"),
        }
    }
}

/// Patients with at least one critical result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HighRiskCount {
    pub critical_patients: u64,
}

impl HighRiskCount {
    pub fn from_value(value: &Value) -> Self {
        Self {
            critical_patients: count_field(value, "critical_patients"),
        }
    }
}

/// Class probabilities in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Probabilities {
    pub normal: f64,
    pub abnormal: f64,
    pub critical: f64,
}

/// One entry of `/predict/high-risk`.
///
/// Entries the model could not score carry `error` instead of a label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskPatient {
    pub subject_id: i64,
    pub risk_level: Option<u8>,
    pub risk_label: Option<String>,
    pub confidence: Option<f64>,
    pub probabilities: Option<Probabilities>,
    pub error: Option<String>,
}

impl RiskPatient {
    /// Whether the entry has a prediction worth a table row.
    pub fn is_displayable(&self) -> bool {
        self.error.is_none() && self.risk_label.as_deref().is_some_and(|l| !l.is_empty())
    }

    pub fn badge(&self) -> Option<String> {
        self.risk_label
            .as_deref()
            .map(|label| format!("badge-{}", label.to_lowercase()))
    }

    pub fn confidence_or_zero(&self) -> f64 {
        self.confidence.unwrap_or(0.0)
    }

    pub fn probabilities_or_zero(&self) -> Probabilities {
        self.probabilities.unwrap_or_default()
    }
}

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A lower-emission replacement proposed for a high-risk product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub original_product: String,
    #[serde(default)]
    pub category: String,
    pub alternative_product: String,
    /// kg CO2e saved per unit by switching.
    pub reduction_potential: f64,
    /// "Low" or "Moderate - Minimal Reduction".
    pub risk_analysis: String,
}

/// One row of the high-risk report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Product id. Servers may send it as a string or a number.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub product: String,
    pub category: String,
    pub source: String,
    pub units: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emission_per_unit: Option<f64>,
    pub total_emission: f64,
    pub risk_level: String,
}

/// Response body of `POST /upload-file`.
///
/// Only `total_emission` and `suggestions` are required; the remaining fields
/// default so that a minimal response still renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub total_emission: f64,
    #[serde(default)]
    pub total_units: i64,
    #[serde(default)]
    pub avg_emission: f64,
    #[serde(default = "no_highest_impact")]
    pub highest_impact: String,
    /// Row count per risk label.
    #[serde(default)]
    pub risk_breakdown: BTreeMap<String, u64>,
    #[serde(default)]
    pub category_emissions: BTreeMap<String, f64>,
    #[serde(default)]
    pub source_emissions: BTreeMap<String, f64>,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
    #[serde(default)]
    pub high_risk_report: Vec<ReportRow>,
}

/// Shown when no product emits anything.
pub const NO_HIGHEST_IMPACT: &str = "-";

fn no_highest_impact() -> String {
    NO_HIGHEST_IMPACT.into()
}

/// Error body returned with every non-success status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Int(i) => i.to_string(),
        Id::Float(f) => f.to_string(),
    })
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Product id used when the input has no `ProductID` column.
pub const UNKNOWN_ID: &str = "N/A";

/// Production source used when the input has no `ProductionSource` column.
pub const UNKNOWN_SOURCE: &str = "Unknown";

/// Risk classification assigned to every analyzed product row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Normal,
    Critical,
    #[serde(rename = "High-Risk")]
    HighRisk,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Normal, RiskLevel::Critical, RiskLevel::HighRisk];

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Normal => "Normal",
            RiskLevel::Critical => "Critical",
            RiskLevel::HighRisk => "High-Risk",
        }
    }

    /// Lenient match for labels coming back from a server.
    pub fn from_str_loose(s: &str) -> Option<RiskLevel> {
        let lower = s.trim().to_lowercase();
        if lower.contains("high") {
            Some(RiskLevel::HighRisk)
        } else if lower.contains("critical") {
            Some(RiskLevel::Critical)
        } else if lower.contains("normal") || lower.contains("low") {
            Some(RiskLevel::Normal)
        } else {
            None
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One product line read from an uploaded sales sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub product: String,
    pub category: String,
    pub source: String,
    /// Units sold. Unparseable cells are read as zero.
    pub units: Decimal,
}

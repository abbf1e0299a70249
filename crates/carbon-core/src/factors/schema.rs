use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Emission factors per product category, plus the risk thresholds applied to each row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorTableDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Display unit for the factors.
    #[serde(default = "default_unit")]
    pub unit: String,
    /// Map of exact category name -> kg CO2e per unit (as string for exact decimal).
    pub factors: BTreeMap<String, Decimal>,
    #[serde(default)]
    pub risk: RiskPolicy,
}

impl FactorTableDef {
    /// Factor for a category. Unknown categories emit nothing.
    pub fn factor_for(&self, category: &str) -> Decimal {
        self.factors.get(category).copied().unwrap_or(Decimal::ZERO)
    }
}

fn default_unit() -> String {
    "kg CO2e/unit".into()
}

/// Thresholds that decide a row's risk level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskPolicy {
    /// Per-unit factor above which high volume alone makes a row high-risk.
    pub high_unit_factor: Decimal,
    /// Units sold above which a high per-unit factor makes a row high-risk.
    pub high_unit_volume: Decimal,
    /// Row total above which a row is high-risk regardless of volume.
    pub high_total: Decimal,
    /// Row total above which a row is critical.
    pub critical_total: Decimal,
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self {
            high_unit_factor: Decimal::from(3),
            high_unit_volume: Decimal::from(100),
            high_total: Decimal::from(500),
            critical_total: Decimal::from(200),
        }
    }
}

/// Lower-emission alternatives, searched in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlternativesDef {
    pub name: String,
    pub version: String,
    /// Assumed per-unit factor of any suggested alternative.
    #[serde(default = "default_alternative_factor")]
    pub alternative_factor: Decimal,
    /// Suggested when no category entry matches.
    #[serde(default = "default_fallback")]
    pub fallback: String,
    pub categories: Vec<AlternativeCategoryDef>,
}

fn default_alternative_factor() -> Decimal {
    Decimal::new(5, 1)
}

fn default_fallback() -> String {
    "Generic Eco-Friendly Alternative".into()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlternativeCategoryDef {
    /// Matched case-insensitively as a substring of the row's category.
    pub keyword: String,
    /// Used when no product keyword matches.
    pub default: String,
    #[serde(default)]
    pub products: Vec<ProductAlternativeDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductAlternativeDef {
    /// Matched case-insensitively as a substring of the product name.
    pub keyword: String,
    pub alternative: String,
}

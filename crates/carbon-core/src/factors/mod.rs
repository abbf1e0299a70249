pub mod builtin;
pub mod schema;

use crate::error::CarbonError;
use rust_decimal::Decimal;
use schema::{AlternativesDef, FactorTableDef};
use std::path::Path;

/// Everything the engine needs besides the uploaded rows.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub factors: FactorTableDef,
    pub alternatives: AlternativesDef,
}

impl Catalog {
    /// Catalog built from the tables compiled into the crate.
    pub fn builtin() -> Result<Catalog, CarbonError> {
        Ok(Catalog {
            factors: builtin::factor_table()?,
            alternatives: builtin::alternatives()?,
        })
    }

    /// Catalog with optional file overrides for either table.
    pub fn load(
        factors_path: Option<&Path>,
        alternatives_path: Option<&Path>,
    ) -> Result<Catalog, CarbonError> {
        let factors = match factors_path {
            Some(path) => load_factor_table(path)?,
            None => builtin::factor_table()?,
        };
        let alternatives = match alternatives_path {
            Some(path) => load_alternatives(path)?,
            None => builtin::alternatives()?,
        };
        Ok(Catalog {
            factors,
            alternatives,
        })
    }
}

/// Load a factor table from a JSON file.
pub fn load_factor_table(path: &Path) -> Result<FactorTableDef, CarbonError> {
    let content = std::fs::read_to_string(path).map_err(|e| CarbonError::TableLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let table: FactorTableDef =
        serde_json::from_str(&content).map_err(|e| CarbonError::TableLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_factor_table(&table)?;
    Ok(table)
}

/// Parse a factor table from a JSON string (no file path context).
pub fn parse_factor_table_str(json: &str) -> Result<FactorTableDef, CarbonError> {
    let table: FactorTableDef = serde_json::from_str(json)?;
    validate_factor_table(&table)?;
    Ok(table)
}

/// Load an alternatives database from a JSON file.
pub fn load_alternatives(path: &Path) -> Result<AlternativesDef, CarbonError> {
    let content = std::fs::read_to_string(path).map_err(|e| CarbonError::TableLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let db: AlternativesDef =
        serde_json::from_str(&content).map_err(|e| CarbonError::TableLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_alternatives(&db)?;
    Ok(db)
}

/// Parse an alternatives database from a JSON string.
pub fn parse_alternatives_str(json: &str) -> Result<AlternativesDef, CarbonError> {
    let db: AlternativesDef = serde_json::from_str(json)?;
    validate_alternatives(&db)?;
    Ok(db)
}

/// Validate that a factor table is well-formed.
pub fn validate_factor_table(table: &FactorTableDef) -> Result<(), CarbonError> {
    if table.factors.is_empty() {
        return Err(CarbonError::TableInvalid("factors must not be empty".into()));
    }

    for (category, factor) in &table.factors {
        if category.trim().is_empty() {
            return Err(CarbonError::TableInvalid(
                "category name must not be empty".into(),
            ));
        }
        if factor.is_sign_negative() {
            return Err(CarbonError::TableInvalid(format!(
                "category '{}' has negative factor {}",
                category, factor
            )));
        }
    }

    let risk = &table.risk;
    for (name, value) in [
        ("high_unit_factor", risk.high_unit_factor),
        ("high_unit_volume", risk.high_unit_volume),
        ("high_total", risk.high_total),
        ("critical_total", risk.critical_total),
    ] {
        if value < Decimal::ZERO {
            return Err(CarbonError::TableInvalid(format!(
                "risk threshold '{}' must not be negative",
                name
            )));
        }
    }

    if risk.critical_total > risk.high_total {
        return Err(CarbonError::TableInvalid(format!(
            "critical_total ({}) must not exceed high_total ({})",
            risk.critical_total, risk.high_total
        )));
    }

    Ok(())
}

/// Validate that an alternatives database is well-formed.
pub fn validate_alternatives(db: &AlternativesDef) -> Result<(), CarbonError> {
    if db.alternative_factor < Decimal::ZERO {
        return Err(CarbonError::TableInvalid(
            "alternative_factor must not be negative".into(),
        ));
    }

    if db.categories.is_empty() {
        return Err(CarbonError::TableInvalid(
            "categories must not be empty".into(),
        ));
    }

    for cat in &db.categories {
        if cat.keyword.trim().is_empty() {
            return Err(CarbonError::TableInvalid(
                "category keyword must not be empty".into(),
            ));
        }
        if cat.default.trim().is_empty() {
            return Err(CarbonError::TableInvalid(format!(
                "category '{}' has no default alternative",
                cat.keyword
            )));
        }
        for product in &cat.products {
            if product.keyword.trim().is_empty() {
                return Err(CarbonError::TableInvalid(format!(
                    "category '{}' has a product entry without keyword",
                    cat.keyword
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_valid_factor_table() {
        let json = r#"{
            "name": "Test",
            "version": "1.0",
            "factors": { "Dairy": "1.9", "Steel": "12.5" }
        }"#;
        let table = parse_factor_table_str(json).unwrap();
        assert_eq!(table.name, "Test");
        assert_eq!(table.factor_for("Steel"), dec!(12.5));
        assert_eq!(table.unit, "kg CO2e/unit");
        assert_eq!(table.risk.high_total, dec!(500));
    }

    #[test]
    fn test_empty_factors_rejected() {
        let json = r#"{ "name": "Bad", "version": "1.0", "factors": {} }"#;
        assert!(parse_factor_table_str(json).is_err());
    }

    #[test]
    fn test_negative_factor_rejected() {
        let json = r#"{ "name": "Bad", "version": "1.0", "factors": { "Dairy": "-1" } }"#;
        assert!(parse_factor_table_str(json).is_err());
    }

    #[test]
    fn test_inverted_risk_thresholds_rejected() {
        let json = r#"{
            "name": "Bad",
            "version": "1.0",
            "factors": { "Dairy": "1.9" },
            "risk": {
                "high_unit_factor": "3",
                "high_unit_volume": "100",
                "high_total": "100",
                "critical_total": "200"
            }
        }"#;
        assert!(parse_factor_table_str(json).is_err());
    }

    #[test]
    fn test_alternatives_defaults_applied() {
        let json = r#"{
            "name": "Alt",
            "version": "1.0",
            "categories": [ { "keyword": "Dairy", "default": "Oat Milk" } ]
        }"#;
        let db = parse_alternatives_str(json).unwrap();
        assert_eq!(db.alternative_factor, dec!(0.5));
        assert_eq!(db.fallback, "Generic Eco-Friendly Alternative");
        assert!(db.categories[0].products.is_empty());
    }

    #[test]
    fn test_alternatives_without_default_rejected() {
        let json = r#"{
            "name": "Alt",
            "version": "1.0",
            "categories": [ { "keyword": "Dairy", "default": " " } ]
        }"#;
        assert!(parse_alternatives_str(json).is_err());
    }

    #[test]
    fn test_load_factor_table_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("factors.json");
        std::fs::write(
            &path,
            r#"{ "name": "File", "version": "2", "factors": { "Food": "2.1" } }"#,
        )
        .unwrap();
        let table = load_factor_table(&path).unwrap();
        assert_eq!(table.version, "2");
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = load_factor_table(Path::new("/nonexistent/factors.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/factors.json"));
    }
}

use crate::error::CarbonError;
use crate::factors::schema::{AlternativesDef, FactorTableDef};

const EMISSION_FACTORS_JSON: &str = include_str!("../../../../data/emission-factors.json");
const ALTERNATIVES_JSON: &str = include_str!("../../../../data/alternatives.json");

/// Load the built-in emission factor table.
pub fn factor_table() -> Result<FactorTableDef, CarbonError> {
    let table: FactorTableDef = serde_json::from_str(EMISSION_FACTORS_JSON)?;
    Ok(table)
}

/// Load the built-in alternatives database.
pub fn alternatives() -> Result<AlternativesDef, CarbonError> {
    let db: AlternativesDef = serde_json::from_str(ALTERNATIVES_JSON)?;
    Ok(db)
}

pub mod header;
pub mod values;

use crate::error::CarbonError;
use crate::input::RawSheet;
use crate::model::{ProductRecord, UNKNOWN_ID, UNKNOWN_SOURCE};
use header::{resolve_columns, ColumnMap};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use values::parse_units;

/// A units cell that could not be read as a number and was counted as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedValue {
    /// 1-based line in the sheet, header included.
    pub line: usize,
    pub product: String,
    pub raw_value: String,
}

/// Product records read from a sheet, with the cells that were zeroed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedSheet {
    pub records: Vec<ProductRecord>,
    pub skipped_values: Vec<SkippedValue>,
}

/// Turn raw sheet cells into product records.
///
/// Missing optional columns (and empty cells in them) fall back to
/// `N/A` for the id and `Unknown` for the source.
pub fn parse_records(sheet: &RawSheet) -> Result<ParsedSheet, CarbonError> {
    let columns = resolve_columns(&sheet.headers)?;

    let mut parsed = ParsedSheet::default();
    for (index, row) in sheet.rows.iter().enumerate() {
        let line = index + 2;
        let record = parse_row(row, &columns, line, &mut parsed.skipped_values)?;
        parsed.records.push(record);
    }

    if !parsed.skipped_values.is_empty() {
        tracing::warn!(
            count = parsed.skipped_values.len(),
            "non-numeric Units_Sold values counted as zero"
        );
    }

    Ok(parsed)
}

fn parse_row(
    row: &[String],
    columns: &ColumnMap,
    line: usize,
    skipped: &mut Vec<SkippedValue>,
) -> Result<ProductRecord, CarbonError> {
    let cell = |idx: usize| row.get(idx).map(|s| s.trim()).unwrap_or("");
    let optional = |idx: Option<usize>, fallback: &str| {
        idx.map(cell)
            .filter(|s| !s.is_empty())
            .unwrap_or(fallback)
            .to_string()
    };

    let product = cell(columns.product).to_string();
    let raw_units = cell(columns.units);
    let parsed = parse_units(raw_units).map_err(|e| match e {
        CarbonError::OutOfRange(what) => CarbonError::OutOfRange(format!("{what} on line {line}")),
        other => other,
    })?;
    let units = match parsed {
        Some(units) => units,
        None => {
            tracing::debug!(line, raw_units, "units not numeric");
            skipped.push(SkippedValue {
                line,
                product: product.clone(),
                raw_value: raw_units.to_string(),
            });
            Decimal::ZERO
        }
    };

    Ok(ProductRecord {
        id: optional(columns.id, UNKNOWN_ID),
        product,
        category: cell(columns.category).to_string(),
        source: optional(columns.source, UNKNOWN_SOURCE),
        units,
    })
}

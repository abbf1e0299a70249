use crate::error::CarbonError;

pub const PRODUCT: &str = "Product";
pub const CATEGORY: &str = "Category";
pub const UNITS_SOLD: &str = "Units_Sold";
pub const PRODUCT_ID: &str = "ProductID";
pub const PRODUCTION_SOURCE: &str = "ProductionSource";

/// Column positions of the fields the engine reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub product: usize,
    pub category: usize,
    pub units: usize,
    pub id: Option<usize>,
    pub source: Option<usize>,
}

/// Locate the known columns in a header row.
///
/// Header names are matched exactly after trimming. `Product`, `Category`
/// and `Units_Sold` are required; `ProductID` and `ProductionSource` are optional.
pub fn resolve_columns(headers: &[String]) -> Result<ColumnMap, CarbonError> {
    let find = |name: &str| headers.iter().position(|h| h.trim() == name);

    let product = find(PRODUCT);
    let category = find(CATEGORY);
    let units = find(UNITS_SOLD);

    match (product, category, units) {
        (Some(product), Some(category), Some(units)) => Ok(ColumnMap {
            product,
            category,
            units,
            id: find(PRODUCT_ID),
            source: find(PRODUCTION_SOURCE),
        }),
        _ => {
            let missing = [(PRODUCT, product), (CATEGORY, category), (UNITS_SOLD, units)]
                .iter()
                .filter(|(_, pos)| pos.is_none())
                .map(|(name, _)| name.to_string())
                .collect();
            Err(CarbonError::MissingColumns { missing })
        }
    }
}

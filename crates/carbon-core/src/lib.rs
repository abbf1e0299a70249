pub mod analysis;
pub mod client;
pub mod error;
pub mod export;
pub mod factors;
pub mod input;
pub mod model;
pub mod parsing;
pub mod recommend;
pub mod ui;
pub mod view;

use analysis::outcome::AnalysisResult;
use error::CarbonError;
use factors::Catalog;
use input::RawSheet;
use parsing::SkippedValue;

/// Result of analyzing one uploaded file.
#[derive(Debug, Clone)]
pub struct UploadAnalysis {
    pub result: AnalysisResult,
    /// Units cells that were not numeric and were counted as zero.
    pub skipped_values: Vec<SkippedValue>,
}

/// Main API entry point: analyze an uploaded sales sheet.
///
/// The file name picks the decoder (`.csv` or a spreadsheet workbook).
pub fn analyze_upload(
    file_name: &str,
    bytes: &[u8],
    catalog: &Catalog,
) -> Result<UploadAnalysis, CarbonError> {
    let sheet = input::read_upload(file_name, bytes)?;
    analyze_sheet(&sheet, catalog)
}

/// Analyze an already decoded sheet.
pub fn analyze_sheet(sheet: &RawSheet, catalog: &Catalog) -> Result<UploadAnalysis, CarbonError> {
    let parsed = parsing::parse_records(sheet)?;
    let result = analysis::analyze(&parsed.records, catalog)?;

    Ok(UploadAnalysis {
        result,
        skipped_values: parsed.skipped_values,
    })
}

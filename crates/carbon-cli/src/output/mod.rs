pub mod json;
pub mod table;

use carbon_core::analysis::AnalysisResult;
use carbon_core::export;
use std::path::Path;

use crate::error::CliError;

/// Final path component, used as the upload file name.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Write the high-risk report CSV and say where it went.
pub fn write_export(result: &AnalysisResult, path: &Path) -> Result<(), CliError> {
    export::write_report_csv(&result.high_risk_report, path)?;
    eprintln!(
        "High-risk report ({} row(s)) written to {}",
        result.high_risk_report.len(),
        path.display()
    );
    Ok(())
}

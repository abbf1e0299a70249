use carbon_core::analysis::AnalysisResult;
use std::path::Path;

use crate::error::CliError;
use crate::output;

pub fn run(result_file: &Path, out: &Path) -> Result<(), CliError> {
    let json = std::fs::read(result_file)?;
    let result: AnalysisResult = serde_json::from_slice(&json)?;
    output::write_export(&result, out)
}

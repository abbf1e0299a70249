use carbon_core::analysis::AnalysisResult;

use crate::error::CliError;

pub fn print(result: &AnalysisResult) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

use carbon_core::factors::Catalog;
use carbon_core::view::{render_result, ViewVariant};
use std::path::PathBuf;

use crate::error::CliError;
use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    factors: Option<PathBuf>,
    alternatives: Option<PathBuf>,
    export: Option<PathBuf>,
) -> Result<(), CliError> {
    let catalog = Catalog::load(factors.as_deref(), alternatives.as_deref())?;
    let bytes = std::fs::read(&input_file)?;
    let file_name = output::file_name(&input_file);

    tracing::info!(file = %input_file.display(), table = %catalog.factors.name, "analyzing");
    let analysis = carbon_core::analyze_upload(&file_name, &bytes, &catalog)?;

    for skipped in &analysis.skipped_values {
        eprintln!(
            "  warning: line {}: Units_Sold '{}' for '{}' is not a number, counted as 0",
            skipped.line, skipped.raw_value, skipped.product
        );
    }

    match output_format {
        "json" => output::json::print(&analysis.result)?,
        _ => {
            let view = render_result(&analysis.result, ViewVariant::Extended);
            println!("{}", output::table::format_result(&view));
        }
    }

    if let Some(path) = export {
        output::write_export(&analysis.result, &path)?;
    }

    Ok(())
}

use carbon_core::client::ClientError;
use carbon_core::ui::AnalysisSession;
use carbon_core::view::ViewVariant;
use std::path::PathBuf;

use crate::client;
use crate::error::CliError;
use crate::output;

pub fn run(
    input_file: PathBuf,
    server: &str,
    output_format: &str,
    export: Option<PathBuf>,
) -> Result<(), CliError> {
    let mut session = AnalysisSession::new(ViewVariant::Extended);
    let name = output::file_name(&input_file);
    let selection = session.select_files(vec![(name, input_file)]);
    tracing::debug!(file = %selection.file_name, "selected");

    let runtime = tokio::runtime::Runtime::new()?;
    let http = reqwest::Client::new();

    let pending = session.begin_analysis()?;
    eprintln!("{}", session.state().button().label);

    let outcome = match std::fs::read(&pending.handle) {
        Ok(bytes) => runtime.block_on(client::upload_file(&http, server, &pending.name, bytes)),
        Err(e) => Err(ClientError::Transport(e.to_string())),
    };

    let view = match session.finish(outcome) {
        Ok(view) => view,
        Err(e) => {
            tracing::error!(error = %e, "upload failed");
            return Err(e.into());
        }
    };
    eprintln!("{}", session.state().button().label);

    match output_format {
        "json" => {
            if let Some(result) = session.last_result() {
                output::json::print(result)?;
            }
        }
        _ => println!("{}", output::table::format_result(&view)),
    }

    if let Some(path) = export {
        let csv = session.export_csv()?;
        std::fs::write(&path, csv)?;
        eprintln!("High-risk report written to {}", path.display());
    }

    Ok(())
}

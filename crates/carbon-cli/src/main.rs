mod client;
mod commands;
mod error;
mod output;
#[cfg(test)]
mod test_support;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "carbon",
    version,
    about = "Carbon emission analysis for product sales sheets"
)]
struct Cli {
    /// Log level when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a sales sheet (CSV or Excel) locally
    Analyze {
        /// Path to the CSV or spreadsheet file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Custom emission factor table (JSON)
        #[arg(long, value_name = "FILE")]
        factors: Option<PathBuf>,

        /// Custom alternatives database (JSON)
        #[arg(long, value_name = "FILE")]
        alternatives: Option<PathBuf>,

        /// Also write the high-risk report as CSV
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,
    },
    /// Upload a sales sheet to a running carbon-server
    Upload {
        /// Path to the CSV or spreadsheet file
        input_file: PathBuf,

        /// Server base URL
        #[arg(short, long, default_value = "http://127.0.0.1:5000")]
        server: String,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Also write the high-risk report as CSV
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,
    },
    /// Export the high-risk report of a saved JSON result as CSV
    Export {
        /// Analysis result JSON (as printed with `-o json`)
        result_file: PathBuf,

        /// Destination CSV file
        #[arg(short = 'O', long = "out", value_name = "FILE", default_value = carbon_core::export::EXPORT_FILE_NAME)]
        out: PathBuf,
    },
    /// Inspect and validate emission factor tables
    Factors {
        #[command(subcommand)]
        action: FactorsAction,
    },
}

#[derive(Subcommand)]
enum FactorsAction {
    /// List the built-in emission factors
    List,
    /// Explain how risk levels and suggestions are derived
    Explain,
    /// Validate a custom factor table or alternatives file
    Validate {
        /// Path to JSON file
        file: PathBuf,

        /// Validate as an alternatives database instead of a factor table
        #[arg(long)]
        alternatives: bool,
    },
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let result = match cli.command {
        Commands::Analyze {
            input_file,
            output,
            factors,
            alternatives,
            export,
        } => commands::analyze::run(input_file, &output, factors, alternatives, export),
        Commands::Upload {
            input_file,
            server,
            output,
            export,
        } => commands::upload::run(input_file, &server, &output, export),
        Commands::Export { result_file, out } => commands::export::run(&result_file, &out),
        Commands::Factors { action } => match action {
            FactorsAction::List => commands::factors::list(),
            FactorsAction::Explain => commands::factors::explain(),
            FactorsAction::Validate { file, alternatives } => {
                commands::factors::validate(&file, alternatives)
            }
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

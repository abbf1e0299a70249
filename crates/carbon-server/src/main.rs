use carbon_server::config::ServerConfig;
use carbon_server::state::AppState;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[actix_web::main]
async fn main() {
    init_tracing();

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        host = %config.host,
        port = config.port,
        factors = %state.catalog.factors.name,
        upload_dir = ?config.upload_dir,
        "starting carbon-server"
    );

    if let Some(problem) = config.web_bundle_problem() {
        tracing::warn!("{problem}");
    }

    let result = match carbon_server::run(&config, state) {
        Ok(server) => server.await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

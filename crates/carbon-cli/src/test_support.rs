use carbon_server::config::ServerConfig;
use carbon_server::state::AppState;
use std::net::TcpListener;

pub const SAMPLE_CSV: &[u8] = include_bytes!("../../../data/sample.csv");

/// Start a carbon-server on an ephemeral port in its own thread and return
/// its base URL. The listener is bound before returning, so requests queue
/// until the server accepts them.
pub fn spawn_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let config = ServerConfig::default();
    let state = AppState::from_config(&config).unwrap();

    std::thread::spawn(move || {
        actix_web::rt::System::new().block_on(async move {
            carbon_server::serve(listener, &config, state).unwrap().await
        })
    });

    format!("http://{addr}")
}

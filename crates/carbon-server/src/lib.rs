pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::middleware::Condition;
use actix_web::{web, App, HttpServer};
use std::net::TcpListener;

use config::ServerConfig;
use state::AppState;

/// Bind and start the HTTP server. The returned future runs until shutdown.
pub fn run(config: &ServerConfig, state: AppState) -> std::io::Result<Server> {
    let listener = TcpListener::bind(config.bind_addr())?;
    serve(listener, config, state)
}

/// Start the HTTP server on an already bound listener.
pub fn serve(listener: TcpListener, config: &ServerConfig, state: AppState) -> std::io::Result<Server> {
    let data = web::Data::new(state);
    let permissive = config.cors_permissive;
    let pkg_dir = config.web_pkg_dir.clone();

    let server = HttpServer::new(move || {
        let mut app = App::new()
            .wrap(Condition::new(permissive, Cors::permissive()))
            .app_data(data.clone())
            .configure(routes::configure);

        if let Some(dir) = &pkg_dir {
            app = app.service(actix_files::Files::new("/pkg", dir));
        }
        app
    })
    .listen(listener)?
    .run();

    Ok(server)
}

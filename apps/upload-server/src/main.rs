//! # Glance Upload Server
//!
//! Accepts media as data URIs, stores them on disk and serves them back.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod datauri;
mod handlers;
mod middleware;
mod state;
mod storage;
mod telemetry;

use config::ServerConfig;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        media_dir = %config.media_dir.display(),
        public_base_url = %config.public_base_url,
        "Starting Glance upload server"
    );

    let state = AppState::new(&config);
    let bind = (config.host.clone(), config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .app_data(handlers::json_config(config.max_upload_bytes))
            .configure(handlers::configure_routes)
    })
    .bind(bind)?
    .run()
    .await
}

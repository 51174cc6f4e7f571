//! HTTP handlers and route configuration.

mod health;
mod media;
mod upload;

#[cfg(test)]
mod tests;

use actix_web::web;

use crate::middleware::error::AppError;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .route("/upload", web::post().to(upload::upload)),
    )
    .route("/media/{name}", web::get().to(media::serve));
}

/// JSON extractor limits, with extractor failures rendered as [`AppError`].
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| AppError::from(err).into())
}

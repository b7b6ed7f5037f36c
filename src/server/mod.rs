//! HTTP front end.
//!
//! Routes:
//!
//! - `GET /`: the single-page UI
//! - `GET /static/script.js`: UI script
//! - `GET /health`: liveness and version
//! - `POST /predict`: classify `{"comment": "..."}`

pub mod handlers;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use log::info;

use crate::config::ServerConfig;
use crate::error::Result;
use crate::predictor::Predictor;

/// Register every route and the JSON extractor settings.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(handlers::json_config())
        .route("/", web::get().to(handlers::index))
        .route("/static/script.js", web::get().to(handlers::script))
        .route("/health", web::get().to(handlers::health))
        .route("/predict", web::post().to(handlers::predict));
}

/// Serve `predictor` until the process is stopped.
pub async fn run_server(config: &ServerConfig, predictor: Predictor) -> Result<()> {
    let data = web::Data::new(predictor);

    info!(
        "Listening on {}:{} with {} workers",
        config.host, config.port, config.workers
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(data.clone())
            .configure(configure_routes)
    })
    .workers(config.workers)
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}

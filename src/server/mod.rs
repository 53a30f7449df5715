//! HTTP surface of the service.
//!
//! Endpoints:
//! - GET /books?name=<book> - chunked text of `<books_dir>/<book>.epub`
//! - GET /health - liveness probe

mod error;
mod routes;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use good_read_core::{DocumentSource, Extractor};
use std::sync::Arc;
use tracing::info;

pub use error::ApiError;
pub use routes::configure;

/// Per-application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn DocumentSource>,
    pub extractor: Extractor,
}

impl AppState {
    pub fn new(source: Arc<dyn DocumentSource>, extractor: Extractor) -> Self {
        AppState { source, extractor }
    }
}

pub async fn run(state: AppState, bind_addr: &str) -> std::io::Result<()> {
    let data = web::Data::new(state);
    info!(addr = %bind_addr, "Starting HTTP server");
    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}

use super::{ApiError, AppState};
use actix_web::{HttpResponse, web};
use good_read_core::{Chunk, read_book};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
pub struct BookQuery {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub good_read: Vec<Chunk>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
    )
    .route("/books", web::get().to(get_book))
    .route("/health", web::get().to(health));
}

async fn get_book(
    state: web::Data<AppState>,
    query: web::Query<BookQuery>,
) -> Result<HttpResponse, ApiError> {
    let BookQuery { name } = query.into_inner();
    debug!(book = %name, "Book requested");

    let source = Arc::clone(&state.source);
    let extractor = state.extractor;
    let book = name.clone();
    let chunks = web::block(move || read_book(source.as_ref(), &extractor, &book)).await??;

    info!(book = %name, chunks = chunks.len(), "Serving book");
    Ok(HttpResponse::Ok().json(BookResponse { good_read: chunks }))
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

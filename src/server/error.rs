use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use good_read_core::DocumentError;
use serde_json::json;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("blocking task failed: {0}")]
    Blocking(String),
}

impl From<BlockingError> for ApiError {
    fn from(err: BlockingError) -> Self {
        ApiError::Blocking(err.to_string())
    }
}

impl ApiError {
    fn kind(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Document(err) => err.kind(),
            ApiError::Blocking(_) => "internal",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Document(DocumentError::InvalidIdentifier { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Document(DocumentError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Document(DocumentError::Malformed { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Document(DocumentError::Io { .. }) | ApiError::Blocking(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = if status.is_server_error() {
            error!(error = %self, "Request failed");
            "internal server error".to_string()
        } else {
            self.to_string()
        };
        HttpResponse::build(status).json(json!({ "error": message, "kind": self.kind() }))
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tokencost_core::TcError;

/// Failure of a request handler. Always a 500: client input is never rejected
/// by the handlers themselves.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] TcError),
    #[error("catalog task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        let body = Json(json!({ "error": self.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

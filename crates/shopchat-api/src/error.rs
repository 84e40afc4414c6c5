use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Any failure escaping the pipeline: catalog fetch, model call, or a
    /// session write. Session-file write failures abort the request too.
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Everything surfaces as a generic 500: the caller learns nothing
        // about the upstream, the logs carry the detail.
        match self {
            ApiError::Pipeline(ref e) => tracing::error!("Pipeline error: {:#}", e),
        }

        let body = Json(json!({
            "error": "Something went wrong"
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

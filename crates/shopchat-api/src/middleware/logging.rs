use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Request logging middleware.
///
/// Failures answer with a generic `{"error": ...}` body, so this log line
/// (plus the error-site log) is the only place a failed request is visible.
/// Server errors are therefore logged at error level.
pub async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let response = next.run(req).await;

    let duration = start.elapsed();
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = %status,
            duration_ms = %duration.as_millis(),
            "Request failed"
        );
    } else {
        tracing::info!(
            method = %method,
            uri = %uri,
            status = %status,
            duration_ms = %duration.as_millis(),
            "Request processed"
        );
    }

    response
}

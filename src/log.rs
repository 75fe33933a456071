//! Request logging

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

/// Log method, URI, status and latency of every request.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let resp = next.run(req).await;

    tracing::info!(
        %method,
        %uri,
        status = resp.status().as_u16(),
        elapsed = ?start.elapsed(),
        "request served"
    );

    resp
}

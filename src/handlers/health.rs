use axum::{extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::json;

use crate::{state::AppState, storage::Storage};

/// Name reported by the health check
pub(crate) const SERVICE_NAME: &str = "exam-server";

/// live_check
/// Interface: GET /api/health
pub(crate) async fn live_check<S: Storage>(State(state): State<AppState<S>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        json!({
            "status": "ok",
            "service": SERVICE_NAME,
            "version": env!("CARGO_PKG_VERSION"),
            "uptime": state.uptime(),
            "timestamp": chrono::Local::now().timestamp(),
        }),
    )
}

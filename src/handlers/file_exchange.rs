use std::io;

use axum::{
    extract::{OriginalUri, State},
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
        HeaderValue, StatusCode,
    },
    response::IntoResponse,
};

use crate::{
    error::{ApiErrorKind, ApiResult},
    handlers::{
        file_helpers::content_disposition,
        path_analysis::{decompose_path, resolve_target},
    },
    state::AppState,
    storage::Storage,
};

/// get_file
/// Interface: GET /api/file/{category}/{filename}
///
/// The file name is taken from the raw request path so that decoding and
/// validation happen here and not in the router.
pub(crate) async fn get_file<S: Storage>(
    State(state): State<AppState<S>>,
    OriginalUri(uri): OriginalUri,
) -> ApiResult<impl IntoResponse> {
    let (category, raw_name) = decompose_path(uri.path())?;
    tracing::debug!("[get_file] category: {category}, name: {raw_name}");

    let handle = resolve_target(state.storage(), category, raw_name)?;

    let body = tokio::fs::read(&handle.path).await.map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            ApiErrorKind::NotFound
        } else {
            ApiErrorKind::ReadingFileFailed(err.to_string())
        }
    })?;
    tracing::debug!(
        "[get_file] sending `{}` ({} bytes, {})",
        handle.path.display(),
        body.len(),
        handle.content_type
    );

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, HeaderValue::from_static(handle.content_type)),
            (
                CONTENT_DISPOSITION,
                content_disposition(state.disposition(), &handle.name),
            ),
        ],
        body,
    ))
}

/// preflight
/// Interface: OPTIONS /api/file/...
pub(crate) async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

use crate::error::ApiErrorKind;

/// Any method a route does not support
pub(crate) async fn method_not_allowed() -> ApiErrorKind {
    ApiErrorKind::MethodNotAllowed
}

/// Any path no route matches
pub(crate) async fn route_not_found() -> ApiErrorKind {
    ApiErrorKind::RouteNotFound
}

/// landing
/// Interface: GET /
pub(crate) async fn landing() -> &'static str {
    concat!(
        "exam-server ",
        env!("CARGO_PKG_VERSION"),
        " is running. Try /api/health, /api/exams, /api/answer-keys\n"
    )
}

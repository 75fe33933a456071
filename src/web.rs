//! Router assembly and the server loop

use std::future::Future;

use axum::{
    handler::Handler,
    http::{header, HeaderValue},
    middleware,
    routing::{get, MethodRouter},
    Router,
};
use tokio::net::TcpListener;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{info, level_filters::LevelFilter};

use crate::{
    context::ServerRuntimeContext,
    error::{AppResult, ErrorKind},
    handlers::{
        fallback::{landing, method_not_allowed, route_not_found},
        file_exchange::{get_file, preflight},
        files_list::{list_answer_keys, list_exams},
        health::live_check,
    },
    log::log_requests,
    state::AppState,
    storage::Storage,
};

/// A route that answers `GET` and nothing else.
///
/// axum would answer `HEAD` through the `GET` handler and other methods with
/// an empty 405; both get the plain-text 405 instead.
fn get_only<H, T, S>(handler: H) -> MethodRouter<S>
where
    H: Handler<T, S>,
    T: 'static,
    S: Clone + Send + Sync + 'static,
{
    get(handler)
        .head(method_not_allowed)
        .fallback(method_not_allowed)
}

/// Build the complete router, including CORS headers and request logging.
pub fn app_router<S: Storage>(state: AppState<S>) -> Router {
    let file_route = get_only(get_file::<S>).options(preflight);

    let mut app = Router::new()
        .route("/", get_only(landing))
        .route("/api/health", get_only(live_check::<S>))
        .route("/api/exams", get_only(list_exams::<S>))
        .route("/api/answer-keys", get_only(list_answer_keys::<S>))
        .route("/api/file", file_route.clone())
        .route("/api/file/", file_route.clone())
        .route("/api/file/*path", file_route)
        .fallback(route_not_found)
        .with_state(state);

    // -----------------------------------------------
    // Extra logging requested. Handlers will log too
    // ----------------------------------------------
    if LevelFilter::current() >= LevelFilter::INFO {
        app = app.layer(middleware::from_fn(log_requests));
    }

    app.layer(SetResponseHeaderLayer::overriding(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    ))
    .layer(SetResponseHeaderLayer::overriding(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, OPTIONS"),
    ))
    .layer(SetResponseHeaderLayer::overriding(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    ))
}

/// Bind the configured address and serve until `shutdown` resolves.
pub async fn start_web_server<S, F>(runtime_ctx: ServerRuntimeContext<S>, shutdown: F) -> AppResult<()>
where
    S: Storage,
    F: Future<Output = ()> + Send + 'static,
{
    let socket_address = runtime_ctx.socket_address;
    let app = app_router(AppState::from(runtime_ctx));

    info!("Starting web server ...");

    let listener = TcpListener::bind(socket_address).await.map_err(|err| {
        ErrorKind::Server.context(format!("Could not bind to `{socket_address}`: {err}"))
    })?;

    info!("Listening on: `http://{}`", listener.local_addr()?);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|err| ErrorKind::Server.context(err))?;

    Ok(())
}

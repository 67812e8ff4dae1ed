//! Router assembly: quiz endpoints, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - `POST /chat` quiz endpoint
/// - `GET /health` liveness and `GET /debug` pool sizes
/// - `/public/*` image assets and the quiz frontend (index.html fallback)
/// - CORS (allow any origin/method/headers) and per-request trace spans
pub fn build_router(state: Arc<AppState>) -> Router {
    let server = &state.config.server;
    let static_service = ServeDir::new(&server.static_dir)
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new(format!("{}/index.html", server.static_dir.trim_end_matches('/'))));
    let public_service = ServeDir::new(&server.public_dir);

    Router::new()
        .route("/chat", post(http::http_post_chat))
        .route("/health", get(http::http_health))
        .route("/debug", get(http::http_debug))
        .nest_service("/public", public_service)
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Frontend fallback
        .fallback_service(static_service)
}

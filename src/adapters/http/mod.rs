//! HTTP adapters - REST API implementations.

pub mod pass;

use axum::routing::get;
use axum::Router;
use http::header::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

pub use pass::handlers::PassAppState;
pub use pass::routes::pass_router;

/// Build the application router with tracing, CORS, and timeout layers.
pub fn router(state: PassAppState, server: &ServerConfig) -> Router {
    let origins = server.cors_origins_list();
    let cors = if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(
                origins
                    .iter()
                    .filter_map(|origin| origin.parse::<HeaderValue>().ok()),
            ))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .merge(pass_router())
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors)
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

use axum::{
    extract::DefaultBodyLimit,
    middleware::map_response,
    routing::{get, put},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::handlers;
use crate::middleware::response::{attach_cors_headers, panic_response, update_panic_response};
use crate::state::AppState;

/// Full HTTP surface with global layers applied
pub fn app(state: AppState, body_limit: usize) -> Router {
    router(state, body_limit).layer(TraceLayer::new_for_http())
}

/// Same surface without per-request tracing
pub fn router(state: AppState, body_limit: usize) -> Router {
    Router::new()
        // Public
        .route("/health", get(handlers::health))
        // Property API, also reachable under /api for proxied deployments
        .nest("/properties", property_routes())
        .nest("/api/properties", property_routes())
        // Global middleware. The CORS hook sits outside the routes so 404
        // fallbacks, 405s and extractor rejections carry the headers too.
        .layer(map_response(attach_cors_headers))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

fn property_routes() -> Router<AppState> {
    use handlers::properties;

    // PUT reports its own failure message when the handler panics
    let update = put(properties::property_put).layer(CatchPanicLayer::custom(update_panic_response));

    Router::new().route(
        "/:id",
        get(properties::property_get)
            .delete(properties::property_delete)
            .options(properties::property_options)
            .merge(update),
    )
}

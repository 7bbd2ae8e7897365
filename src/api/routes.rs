use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::{request_id::make_span_with_request_id, request_id_middleware};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    let enable_cors = state.enable_cors;

    // Outermost first: the request id must exist before the trace span is made.
    let layers = ServiceBuilder::new()
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id));

    let router = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/movies", get(handlers::get_movies))
        .route("/recommend", post(handlers::recommend))
        .with_state(state)
        .layer(layers);

    if enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

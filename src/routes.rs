use crate::{handler::inventory_status, metrics::track_request_metrics, state::AppState};
use axum::{Router, middleware, routing::get};
use tower_http::trace::TraceLayer;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/inventory", get(inventory_status))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            track_request_metrics,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

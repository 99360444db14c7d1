use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes mounted under `base_path`
pub fn create_router(state: Arc<AppState>, base_path: &str) -> Router {
    let api = Router::new()
        .route("/status", get(handlers::get_status))
        .route(
            "/timeseries/{dataset_id}/{variable_name}",
            get(handlers::get_timeseries),
        )
        .route("/timeseries", post(handlers::post_timeseries))
        .with_state(state);

    if base_path.is_empty() {
        api
    } else {
        Router::new().nest(base_path, api)
    }
}

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::dto::{TimeseriesBody, TimeseriesPlanResponse, TimeseriesQuery};
use crate::error::ApiError;
use crate::services::TimeseriesService;
use crate::state::AppState;

pub async fn get_timeseries(
    State(state): State<Arc<AppState>>,
    Path((dataset_id, variable_name)): Path<(String, String)>,
    Query(query): Query<TimeseriesQuery>,
) -> Result<Json<TimeseriesPlanResponse>, ApiError> {
    tracing::info!(
        dataset_id = %dataset_id,
        variable_name = %variable_name,
        start = ?query.start,
        end = ?query.end,
        "Processing timeseries request"
    );

    let request = query.into_request(dataset_id, variable_name)?;
    let plan = TimeseriesService::plan(&state, &request)?;

    Ok(Json(plan))
}

pub async fn post_timeseries(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TimeseriesBody>,
) -> Result<Json<TimeseriesPlanResponse>, ApiError> {
    tracing::info!(
        dataset_id = ?body.dataset_id,
        variable_name = ?body.variable_name,
        has_geometry = body.boundary_geometry.is_some(),
        "Processing timeseries request"
    );

    let request = body.into_request()?;
    let plan = TimeseriesService::plan(&state, &request)?;

    Ok(Json(plan))
}

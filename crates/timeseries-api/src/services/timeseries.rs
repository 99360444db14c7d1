use timeseries_core::{BoundaryGeometry, TimeseriesRequest};

use crate::dto::TimeseriesPlanResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// Service for resolving timeseries requests against the dataset catalog
pub struct TimeseriesService;

impl TimeseriesService {
    /// Validate the request and resolve its time range for the requested dataset
    pub fn plan(
        state: &AppState,
        request: &TimeseriesRequest,
    ) -> Result<TimeseriesPlanResponse, ApiError> {
        request.validate()?;

        // Validation guarantees these are present.
        let (Some(dataset_id), Some(variable_name), Some(longitude), Some(latitude)) = (
            request.dataset_id(),
            request.variable_name(),
            request.longitude(),
            request.latitude(),
        ) else {
            return Err(ApiError::internal("Validated request is incomplete"));
        };

        let value_count = state.catalog.value_count(dataset_id).ok_or_else(|| {
            tracing::warn!(dataset_id = %dataset_id, "Dataset not found");
            ApiError::not_found("Dataset not found").with_details(dataset_id.to_string())
        })?;

        let index_range = request.resolve_index_range(value_count)?;
        let time_zero = request.effective_time_zero().unwrap_or_default().to_string();

        Ok(TimeseriesPlanResponse {
            dataset_id: dataset_id.to_string(),
            variable_name: variable_name.to_string(),
            boundary_geometry: BoundaryGeometry::point(longitude, latitude),
            time_resolution: request.effective_time_resolution(),
            time_zero,
            start: request.start().map(str::to_string),
            end: request.end().map(str::to_string),
            index_range,
            value_count,
            csv: request.csv(),
            array: request.array(),
        })
    }
}

use serde::Serialize;
use timeseries_core::{BoundaryGeometry, IndexRange, TimeResolution};

/// Service status response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub name: &'static str,
    pub status: &'static str,
}

impl Default for StatusResponse {
    fn default() -> Self {
        Self { name: "Timeseries Service", status: "ok" }
    }
}

/// Normalized request and the index range it resolves to
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeseriesPlanResponse {
    pub dataset_id: String,
    pub variable_name: String,
    pub boundary_geometry: BoundaryGeometry,
    pub time_resolution: TimeResolution,
    pub time_zero: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(flatten)]
    pub index_range: IndexRange,
    pub value_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array: Option<bool>,
}

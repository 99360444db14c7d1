//! Boundary geometry accepted by timeseries requests.
//!
//! Requests carry a minimal GeoJSON-like object. Only points are supported;
//! any other declared `type` makes the request invalid. The raw object is
//! kept as-is and turned into a [`GeometryOutcome`] by a single
//! normalization step.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, TimeseriesError};

/// The only geometry type a request may declare
pub const POINT_TYPE: &str = "Point";

/// Raw boundary geometry as received from the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundaryGeometry {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Value>,
}

/// Result of normalizing a [`BoundaryGeometry`]
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryOutcome {
    /// A point; GeoJSON order is `[longitude, latitude]`
    Point { longitude: f64, latitude: f64 },
    /// A point-compatible geometry without coordinates
    Empty,
    /// A geometry whose declared type is not a point
    Unsupported(String),
}

impl BoundaryGeometry {
    /// Create a Point geometry
    pub fn point(longitude: f64, latitude: f64) -> Self {
        Self {
            kind: Some(POINT_TYPE.to_string()),
            coordinates: Some(serde_json::json!([longitude, latitude])),
        }
    }

    /// Try to parse from a serde_json::Value (GeoJSON)
    pub fn from_geojson(value: &Value) -> Result<Self> {
        serde_json::from_value(value.clone())
            .map_err(|_| TimeseriesError::invalid_value("boundaryGeometry", value.to_string()))
    }

    /// Declared type, defaulting to a point when absent
    pub fn kind(&self) -> &str {
        self.kind.as_deref().unwrap_or(POINT_TYPE)
    }

    /// Derive the location carried by this geometry.
    ///
    /// Coordinates are not inspected when the declared type is not a point.
    /// Positions with more than two members (e.g. altitude) use the first two.
    pub fn normalize(&self) -> Result<GeometryOutcome> {
        if self.kind() != POINT_TYPE {
            return Ok(GeometryOutcome::Unsupported(self.kind().to_string()));
        }

        let Some(coordinates) = &self.coordinates else {
            return Ok(GeometryOutcome::Empty);
        };

        let invalid = || {
            TimeseriesError::invalid_value("boundaryGeometry.coordinates", coordinates.to_string())
        };

        let position = coordinates.as_array().ok_or_else(invalid)?;
        match (
            position.first().and_then(Value::as_f64),
            position.get(1).and_then(Value::as_f64),
        ) {
            (Some(longitude), Some(latitude)) => Ok(GeometryOutcome::Point { longitude, latitude }),
            _ => Err(invalid()),
        }
    }
}

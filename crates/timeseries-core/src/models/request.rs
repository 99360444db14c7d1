//! Timeseries request model.
//!
//! A [`TimeseriesRequest`] accumulates loosely-typed request fields in any
//! order, is checked once with [`TimeseriesRequest::validate`], and then maps
//! its human-facing time range onto array indices with
//! [`TimeseriesRequest::resolve_index_range`].

use serde_json::Value;

use super::geometry::{BoundaryGeometry, GeometryOutcome, POINT_TYPE};
use super::index_range::IndexRange;
use super::time_resolution::TimeResolution;
use crate::error::{Result, TimeseriesError};

pub const TIME_RANGE_START_OUTSIDE_COVERAGE: &str =
    "Time range start is outside coverage of dataset";
pub const TIME_RANGE_END_BEFORE_START: &str = "Time range end is before time range start";
pub const UNRECOGNIZED_TIME_RESOLUTION: &str = "Unrecognized TimeResolution";

/// Point timeseries request
#[derive(Debug, Clone, PartialEq)]
pub struct TimeseriesRequest {
    dataset_id: Option<String>,
    variable_name: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    boundary_geometry_kind: String,
    /// Set once a non-point geometry is assigned and never cleared
    unsupported_geometry_kind: Option<String>,
    time_resolution: Option<TimeResolution>,
    time_zero: Option<String>,
    start: Option<String>,
    end: Option<String>,
    csv: Option<bool>,
    array: Option<bool>,
}

impl Default for TimeseriesRequest {
    fn default() -> Self {
        Self {
            dataset_id: None,
            variable_name: None,
            latitude: None,
            longitude: None,
            boundary_geometry_kind: POINT_TYPE.to_string(),
            unsupported_geometry_kind: None,
            time_resolution: None,
            time_zero: None,
            start: None,
            end: None,
            csv: None,
            array: None,
        }
    }
}

impl TimeseriesRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_dataset_id(&mut self, dataset_id: impl Into<String>) {
        self.dataset_id = Some(dataset_id.into());
    }

    pub fn set_variable_name(&mut self, variable_name: impl Into<String>) {
        self.variable_name = Some(variable_name.into());
    }

    /// Parse and set the latitude. `None` leaves the current value untouched.
    pub fn set_latitude(&mut self, latitude: Option<&str>) -> Result<()> {
        if let Some(raw) = latitude {
            self.latitude = Some(parse_float("latitude", raw)?);
        }
        Ok(())
    }

    /// Parse and set the longitude. `None` leaves the current value untouched.
    pub fn set_longitude(&mut self, longitude: Option<&str>) -> Result<()> {
        if let Some(raw) = longitude {
            self.longitude = Some(parse_float("longitude", raw)?);
        }
        Ok(())
    }

    /// Unknown labels are accepted here and rejected by [`Self::validate`].
    pub fn set_time_resolution(&mut self, time_resolution: Option<&str>) {
        if let Some(label) = time_resolution {
            self.time_resolution = Some(TimeResolution::parse(label));
        }
    }

    pub fn set_time_zero(&mut self, time_zero: Option<&str>) {
        if let Some(time_zero) = time_zero {
            self.time_zero = Some(time_zero.to_string());
        }
    }

    pub fn set_start(&mut self, start: Option<&str>) {
        if let Some(start) = start {
            self.start = Some(start.to_string());
        }
    }

    pub fn set_end(&mut self, end: Option<&str>) {
        if let Some(end) = end {
            self.end = Some(end.to_string());
        }
    }

    pub fn set_csv(&mut self, csv: bool) {
        self.csv = Some(csv);
    }

    pub fn set_array(&mut self, array: bool) {
        self.array = Some(array);
    }

    /// Apply a boundary geometry.
    ///
    /// A point with coordinates overwrites latitude and longitude. A
    /// non-point geometry marks the request invalid for the rest of its
    /// lifetime, whatever is assigned afterwards.
    pub fn set_boundary_geometry(&mut self, geometry: &BoundaryGeometry) -> Result<()> {
        let outcome = geometry.normalize()?;
        self.boundary_geometry_kind = geometry.kind().to_string();

        match outcome {
            GeometryOutcome::Point { longitude, latitude } => {
                self.longitude = Some(longitude);
                self.latitude = Some(latitude);
            }
            GeometryOutcome::Empty => {}
            GeometryOutcome::Unsupported(kind) => {
                tracing::debug!(geometry_type = %kind, "Unsupported boundary geometry type");
                self.unsupported_geometry_kind = Some(kind);
            }
        }

        Ok(())
    }

    /// Apply a boundary geometry given as GeoJSON
    pub fn set_boundary_geometry_json(&mut self, geometry: &Value) -> Result<()> {
        self.set_boundary_geometry(&BoundaryGeometry::from_geojson(geometry)?)
    }

    /// Check that the request is complete.
    ///
    /// Checks run in a fixed order and the first failure is reported, so a
    /// request with several problems always yields the same error.
    pub fn validate(&self) -> Result<()> {
        let result = self.check();
        if let Err(e) = &result {
            tracing::debug!(error = %e, "Timeseries request failed validation");
        }
        result
    }

    fn check(&self) -> Result<()> {
        if self.time_resolution == Some(TimeResolution::Invalid) {
            return Err(TimeseriesError::invalid_argument(UNRECOGNIZED_TIME_RESOLUTION));
        }
        if self.dataset_id.is_none() {
            return Err(TimeseriesError::missing_property("datasetId"));
        }
        if self.variable_name.is_none() {
            return Err(TimeseriesError::missing_property("variableName"));
        }
        if let Some(kind) = &self.unsupported_geometry_kind {
            return Err(TimeseriesError::invalid_value("boundaryGeometry.type", kind.clone()));
        }
        if self.latitude.is_none() {
            return Err(TimeseriesError::missing_property("latitude"));
        }
        if self.longitude.is_none() {
            return Err(TimeseriesError::missing_property("longitude"));
        }
        Ok(())
    }

    /// Resolution used for index computation; `INDEX` when none was given
    pub fn effective_time_resolution(&self) -> TimeResolution {
        self.time_resolution.unwrap_or_default()
    }

    /// Reference epoch used for index computation, falling back to the
    /// resolution's default
    pub fn effective_time_zero(&self) -> Option<&str> {
        self.time_zero
            .as_deref()
            .or_else(|| self.effective_time_resolution().default_time_zero())
    }

    /// Map the requested time range onto indices of an array of `value_count`
    /// values.
    ///
    /// A start past the last index is rejected, an end past the last index is
    /// clamped to it. A start before index 0 is not checked.
    pub fn resolve_index_range(&self, value_count: usize) -> Result<IndexRange> {
        let resolution = self.effective_time_resolution();
        let time_zero = match resolution {
            TimeResolution::Index | TimeResolution::Band | TimeResolution::Year => {
                self.effective_time_zero()
            }
            TimeResolution::Invalid => None,
        }
        .ok_or_else(|| TimeseriesError::UnsupportedTimeResolution {
            resolution: resolution.to_string(),
        })?;

        let tzero = parse_int("timeZero", time_zero)?;
        let last_index = i64::try_from(value_count)
            .map_err(|_| TimeseriesError::invalid_value("valueCount", value_count.to_string()))?
            - 1;

        let start_index = match &self.start {
            Some(start) => offset_from("start", start, tzero)?,
            None => tzero,
        };
        if start_index > last_index {
            return Err(TimeseriesError::invalid_argument(TIME_RANGE_START_OUTSIDE_COVERAGE));
        }

        let end_index = match &self.end {
            Some(end) => offset_from("end", end, tzero)?,
            None => last_index,
        }
        .min(last_index);
        if end_index < start_index {
            return Err(TimeseriesError::invalid_argument(TIME_RANGE_END_BEFORE_START));
        }

        tracing::debug!(
            resolution = %resolution,
            tzero,
            start_index,
            end_index,
            value_count,
            "Resolved time range"
        );

        Ok(IndexRange::new(start_index, end_index))
    }

    pub fn dataset_id(&self) -> Option<&str> {
        self.dataset_id.as_deref()
    }

    pub fn variable_name(&self) -> Option<&str> {
        self.variable_name.as_deref()
    }

    pub fn latitude(&self) -> Option<f64> {
        self.latitude
    }

    pub fn longitude(&self) -> Option<f64> {
        self.longitude
    }

    /// Most recently declared boundary geometry type
    pub fn boundary_geometry_kind(&self) -> &str {
        &self.boundary_geometry_kind
    }

    pub fn has_invalid_boundary_geometry(&self) -> bool {
        self.unsupported_geometry_kind.is_some()
    }

    pub fn time_resolution(&self) -> Option<TimeResolution> {
        self.time_resolution
    }

    pub fn time_zero(&self) -> Option<&str> {
        self.time_zero.as_deref()
    }

    pub fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    pub fn end(&self) -> Option<&str> {
        self.end.as_deref()
    }

    pub fn csv(&self) -> Option<bool> {
        self.csv
    }

    pub fn array(&self) -> Option<bool> {
        self.array
    }
}

fn parse_float(field: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| TimeseriesError::invalid_value(field, raw))
}

fn parse_int(field: &str, raw: &str) -> Result<i64> {
    raw.parse::<i64>()
        .map_err(|_| TimeseriesError::invalid_value(field, raw))
}

/// Index of the time label `raw` relative to `tzero`
fn offset_from(field: &str, raw: &str, tzero: i64) -> Result<i64> {
    parse_int(field, raw)?
        .checked_sub(tzero)
        .ok_or_else(|| TimeseriesError::invalid_value(field, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_request() -> TimeseriesRequest {
        let mut request = TimeseriesRequest::new();
        request.set_dataset_id("annual_5x5x5_dataset");
        request.set_variable_name("float32_variable");
        request.set_longitude(Some("-123.0")).unwrap();
        request.set_latitude(Some("45.0")).unwrap();
        request
    }

    fn assert_invalid_argument(result: Result<impl std::fmt::Debug>, expected: &str) {
        match result {
            Err(TimeseriesError::InvalidArgument { description, .. }) => {
                assert_eq!(description, expected)
            }
            other => panic!("expected InvalidArgument({}), got {:?}", expected, other),
        }
    }

    fn assert_missing(result: Result<()>, expected: &str) {
        match result {
            Err(TimeseriesError::MissingProperty { name }) => assert_eq!(name, expected),
            other => panic!("expected MissingProperty({}), got {:?}", expected, other),
        }
    }

    #[test]
    fn test_valid_request_passes_validation() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_validation_order() {
        let mut request = TimeseriesRequest::new();
        request.set_time_resolution(Some("decade"));
        request.set_boundary_geometry_json(&json!({ "type": "Polygon" })).unwrap();
        assert_invalid_argument(request.validate(), UNRECOGNIZED_TIME_RESOLUTION);

        let mut request = TimeseriesRequest::new();
        request.set_boundary_geometry_json(&json!({ "type": "Polygon" })).unwrap();
        assert_missing(request.validate(), "datasetId");

        request.set_dataset_id("dataset");
        assert_missing(request.validate(), "variableName");

        request.set_variable_name("variable");
        assert_invalid_argument(request.validate(), "boundaryGeometry.type");
    }

    #[test]
    fn test_missing_coordinates() {
        let mut request = TimeseriesRequest::new();
        request.set_dataset_id("dataset");
        request.set_variable_name("variable");
        assert_missing(request.validate(), "latitude");

        request.set_latitude(Some("45")).unwrap();
        assert_missing(request.validate(), "longitude");
    }

    #[test]
    fn test_geometry_error_reports_offending_type() {
        let mut request = valid_request();
        request
            .set_boundary_geometry_json(&json!({ "type": "MultiPoint", "coordinates": [[0, 0]] }))
            .unwrap();

        match request.validate() {
            Err(TimeseriesError::InvalidArgument { value, .. }) => {
                assert_eq!(value.as_deref(), Some("MultiPoint"))
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_invalid_geometry_is_sticky() {
        let mut request = valid_request();
        request.set_boundary_geometry_json(&json!({ "type": "Polygon" })).unwrap();
        request
            .set_boundary_geometry_json(&json!({ "type": "Point", "coordinates": [1.0, 2.0] }))
            .unwrap();

        assert!(request.has_invalid_boundary_geometry());
        assert_eq!(request.boundary_geometry_kind(), "Point");
        assert_invalid_argument(request.validate(), "boundaryGeometry.type");
    }

    #[test]
    fn test_point_geometry_overwrites_coordinates() {
        let mut request = valid_request();
        request
            .set_boundary_geometry_json(&json!({ "type": "Point", "coordinates": [-121.0, 43.0] }))
            .unwrap();

        assert_eq!(request.longitude(), Some(-121.0));
        assert_eq!(request.latitude(), Some(43.0));
    }

    #[test]
    fn test_geometry_without_coordinates_keeps_location() {
        let mut request = valid_request();
        request.set_boundary_geometry_json(&json!({ "type": "Point" })).unwrap();

        assert_eq!(request.longitude(), Some(-123.0));
        assert_eq!(request.latitude(), Some(45.0));
    }

    #[test]
    fn test_non_numeric_coordinate_is_rejected() {
        let mut request = TimeseriesRequest::new();
        assert_invalid_argument(request.set_latitude(Some("north")), "latitude");
        assert_invalid_argument(request.set_longitude(Some("")), "longitude");
        assert_eq!(request.latitude(), None);
    }

    #[test]
    fn test_absent_coordinate_does_not_overwrite() {
        let mut request = valid_request();
        request.set_latitude(None).unwrap();
        assert_eq!(request.latitude(), Some(45.0));
    }

    #[test]
    fn test_validate_does_not_mutate() {
        let request = valid_request();
        let before = request.clone();
        request.validate().unwrap();
        assert_eq!(request, before);
    }

    #[test]
    fn test_default_range_per_resolution() {
        let mut request = valid_request();
        assert_eq!(request.resolve_index_range(10).unwrap(), IndexRange::new(0, 9));

        request.set_time_resolution(Some("BAND"));
        assert_eq!(request.resolve_index_range(10).unwrap(), IndexRange::new(1, 9));

        request.set_time_resolution(Some("YEAR"));
        assert_eq!(request.resolve_index_range(10).unwrap(), IndexRange::new(1, 9));
    }

    #[test]
    fn test_resolution_does_not_store_defaults() {
        let request = valid_request();
        request.resolve_index_range(10).unwrap();
        assert_eq!(request.time_resolution(), None);
        assert_eq!(request.time_zero(), None);
        assert_eq!(request.effective_time_zero(), Some("0"));
    }

    #[test]
    fn test_year_range_maps_to_indices() {
        let mut request = valid_request();
        request.set_time_resolution(Some("YEAR"));
        request.set_start(Some("1"));
        request.set_end(Some("10"));
        assert_eq!(request.resolve_index_range(10).unwrap(), IndexRange::new(0, 9));
    }

    #[test]
    fn test_explicit_time_zero() {
        let mut request = valid_request();
        request.set_time_resolution(Some("YEAR"));
        request.set_time_zero(Some("1900"));
        request.set_start(Some("1905"));
        request.set_end(Some("1907"));
        assert_eq!(request.resolve_index_range(100).unwrap(), IndexRange::new(5, 7));
    }

    #[test]
    fn test_start_beyond_coverage_is_rejected() {
        let mut request = valid_request();
        request.set_time_resolution(Some("YEAR"));
        request.set_start(Some("11"));
        assert_invalid_argument(request.resolve_index_range(10), TIME_RANGE_START_OUTSIDE_COVERAGE);
    }

    #[test]
    fn test_end_beyond_coverage_is_clamped() {
        let mut request = valid_request();
        request.set_time_resolution(Some("YEAR"));
        request.set_start(Some("5"));
        request.set_end(Some("20"));
        assert_eq!(request.resolve_index_range(10).unwrap(), IndexRange::new(4, 9));
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let mut request = valid_request();
        request.set_time_resolution(Some("YEAR"));
        request.set_start(Some("8"));
        request.set_end(Some("2"));
        assert_invalid_argument(request.resolve_index_range(10), TIME_RANGE_END_BEFORE_START);
    }

    #[test]
    fn test_start_below_coverage_is_not_checked() {
        let mut request = valid_request();
        request.set_time_resolution(Some("YEAR"));
        request.set_start(Some("0"));
        request.set_end(Some("3"));
        assert_eq!(request.resolve_index_range(10).unwrap(), IndexRange::new(-1, 2));
    }

    #[test]
    fn test_empty_dataset_rejects_every_range() {
        let request = valid_request();
        assert_invalid_argument(request.resolve_index_range(0), TIME_RANGE_START_OUTSIDE_COVERAGE);
    }

    #[test]
    fn test_malformed_time_values_are_invalid_arguments() {
        let mut request = valid_request();
        request.set_start(Some("1990s"));
        assert_invalid_argument(request.resolve_index_range(10), "start");

        let mut request = valid_request();
        request.set_end(Some("soon"));
        assert_invalid_argument(request.resolve_index_range(10), "end");

        let mut request = valid_request();
        request.set_time_zero(Some("epoch"));
        assert_invalid_argument(request.resolve_index_range(10), "timeZero");
    }

    #[test]
    fn test_integer_labels_are_not_trimmed() {
        let mut request = valid_request();
        request.set_start(Some(" 5"));
        assert_invalid_argument(request.resolve_index_range(10), "start");
    }

    #[test]
    fn test_label_overflowing_time_zero_is_invalid() {
        let mut request = valid_request();
        request.set_time_resolution(Some("YEAR"));
        request.set_start(Some("-9223372036854775808"));
        assert_invalid_argument(request.resolve_index_range(10), "start");

        let mut request = valid_request();
        request.set_time_zero(Some("-5"));
        request.set_end(Some("9223372036854775807"));
        assert_invalid_argument(request.resolve_index_range(10), "end");
    }

    #[test]
    fn test_malformed_geometry_leaves_request_unchanged() {
        let mut request = valid_request();
        request.set_boundary_geometry_json(&json!({ "type": "Polygon" })).unwrap();
        let before = request.clone();

        let result = request
            .set_boundary_geometry_json(&json!({ "type": "Point", "coordinates": ["x", 1] }));

        assert_invalid_argument(result, "boundaryGeometry.coordinates");
        assert_eq!(request, before);
        assert_eq!(request.boundary_geometry_kind(), "Polygon");
    }

    #[test]
    fn test_invalid_resolution_cannot_be_resolved() {
        let mut request = valid_request();
        request.set_time_resolution(Some("fortnight"));
        assert!(matches!(
            request.resolve_index_range(10),
            Err(TimeseriesError::UnsupportedTimeResolution { .. })
        ));
    }

    #[test]
    fn test_output_hints_are_kept() {
        let mut request = valid_request();
        assert_eq!(request.csv(), None);
        request.set_csv(true);
        request.set_array(false);
        assert_eq!(request.csv(), Some(true));
        assert_eq!(request.array(), Some(false));
    }
}

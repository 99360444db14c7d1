use serde::Deserialize;
use serde_json::Value;
use timeseries_core::{Result, TimeseriesRequest};

/// Query parameters of `GET /timeseries/{datasetId}/{variableName}`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeseriesQuery {
    pub longitude: Option<String>,
    pub latitude: Option<String>,
    pub time_resolution: Option<String>,
    pub time_zero: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub csv: Option<bool>,
    pub array: Option<bool>,
}

impl TimeseriesQuery {
    /// Populate a request for the dataset and variable named in the path
    pub fn into_request(
        self,
        dataset_id: String,
        variable_name: String,
    ) -> Result<TimeseriesRequest> {
        let mut request = TimeseriesRequest::new();
        request.set_dataset_id(dataset_id);
        request.set_variable_name(variable_name);
        request.set_longitude(self.longitude.as_deref())?;
        request.set_latitude(self.latitude.as_deref())?;
        request.set_time_resolution(self.time_resolution.as_deref());
        request.set_time_zero(self.time_zero.as_deref());
        request.set_start(self.start.as_deref());
        request.set_end(self.end.as_deref());
        if let Some(csv) = self.csv {
            request.set_csv(csv);
        }
        if let Some(array) = self.array {
            request.set_array(array);
        }
        Ok(request)
    }
}

/// Scalar that clients may send either as a JSON string or a JSON number
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Text(String),
    Number(serde_json::Number),
}

impl ScalarValue {
    pub fn as_text(&self) -> String {
        match self {
            ScalarValue::Text(text) => text.clone(),
            ScalarValue::Number(number) => number.to_string(),
        }
    }
}

/// JSON body of `POST /timeseries`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeseriesBody {
    pub dataset_id: Option<String>,
    pub variable_name: Option<String>,
    pub boundary_geometry: Option<Value>,
    pub longitude: Option<ScalarValue>,
    pub latitude: Option<ScalarValue>,
    pub time_resolution: Option<String>,
    pub time_zero: Option<ScalarValue>,
    pub start: Option<ScalarValue>,
    pub end: Option<ScalarValue>,
    pub csv: Option<bool>,
    pub array: Option<bool>,
}

impl TimeseriesBody {
    /// Populate a request from the body.
    ///
    /// Separate coordinates are applied before the boundary geometry, so a
    /// point geometry wins when both are given.
    pub fn into_request(self) -> Result<TimeseriesRequest> {
        let text = |value: &Option<ScalarValue>| value.as_ref().map(ScalarValue::as_text);

        let mut request = TimeseriesRequest::new();
        if let Some(dataset_id) = self.dataset_id {
            request.set_dataset_id(dataset_id);
        }
        if let Some(variable_name) = self.variable_name {
            request.set_variable_name(variable_name);
        }
        request.set_longitude(text(&self.longitude).as_deref())?;
        request.set_latitude(text(&self.latitude).as_deref())?;
        if let Some(geometry) = &self.boundary_geometry {
            request.set_boundary_geometry_json(geometry)?;
        }
        request.set_time_resolution(self.time_resolution.as_deref());
        request.set_time_zero(text(&self.time_zero).as_deref());
        request.set_start(text(&self.start).as_deref());
        request.set_end(text(&self.end).as_deref());
        if let Some(csv) = self.csv {
            request.set_csv(csv);
        }
        if let Some(array) = self.array {
            request.set_array(array);
        }
        Ok(request)
    }
}

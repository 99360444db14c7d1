//! Timeseries Core - Request model and temporal index resolution
//!
//! This crate normalizes point timeseries requests and maps their time range
//! onto indices of a dataset's value array. It performs no data access.

pub mod config;
pub mod error;
pub mod models;

pub use error::{Result, TimeseriesError};
pub use models::{BoundaryGeometry, IndexRange, TimeResolution, TimeseriesRequest};

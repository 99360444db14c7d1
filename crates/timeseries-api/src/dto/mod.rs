pub mod request;
pub mod response;

pub use request::{ScalarValue, TimeseriesBody, TimeseriesQuery};
pub use response::{StatusResponse, TimeseriesPlanResponse};

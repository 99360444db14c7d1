pub mod geometry;
pub mod index_range;
pub mod request;
pub mod time_resolution;

pub use geometry::{BoundaryGeometry, GeometryOutcome};
pub use index_range::IndexRange;
pub use request::TimeseriesRequest;
pub use time_resolution::TimeResolution;

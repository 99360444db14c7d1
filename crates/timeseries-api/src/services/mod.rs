mod timeseries;

pub use timeseries::TimeseriesService;

mod health;
mod timeseries;

pub use health::get_status;
pub use timeseries::{get_timeseries, post_timeseries};

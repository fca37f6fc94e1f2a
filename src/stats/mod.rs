//! Stats module - Trip statistics and reports

mod calculator;
mod reports;

pub use calculator::StatsCalculator;
pub use reports::{DurationStats, StationStats, StatsError, TimeStats, UserStats};

//! Report Module
//! The four trip summaries computed over a filtered DataFrame.

use crate::config::City;
use crate::data::loader::{
    BIRTH_YEAR, DAY_OF_WEEK, END_STATION, GENDER, HOUR, MONTH, START_STATION, TRIP_DURATION,
    USER_TYPE,
};
use crate::data::{DataProcessor, ProcessorError};
use crate::stats::StatsCalculator;
use chrono::{Month, TimeDelta};
use polars::prelude::DataFrame;
use std::fmt;
use thiserror::Error;

const NOT_AVAILABLE: &str = "n/a";

#[derive(Error, Debug)]
pub enum StatsError {
    #[error(transparent)]
    Processor(#[from] ProcessorError),
}

fn or_na<T: fmt::Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn write_counts(f: &mut fmt::Formatter<'_>, counts: &[(String, usize)]) -> fmt::Result {
    if counts.is_empty() {
        return writeln!(f, "{NOT_AVAILABLE}");
    }
    let width = counts.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, count) in counts {
        writeln!(f, "{label:<width$}    {count}")?;
    }
    Ok(())
}

// ── Time of travel ───────────────────────────────────────────────────────────

/// Most frequent month, weekday and start hour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeStats {
    pub popular_month: Option<String>,
    pub popular_day: Option<String>,
    pub popular_hour: Option<i32>,
}

impl TimeStats {
    pub const HEADING: &'static str = "Calculating the most popular/frequent times of travel...";
    pub const NOTE: &'static str = "N.B. If you have specified a month or day, this will \
        automatically be reflected as the most popular option!";

    pub fn compute(df: &DataFrame) -> Result<Self, StatsError> {
        let months = DataProcessor::i32_values(df, MONTH)?;
        let popular_month = StatsCalculator::mode(months.into_iter().flatten())
            .and_then(|m| u8::try_from(m).ok())
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name().to_string());

        let days = DataProcessor::string_values(df, DAY_OF_WEEK)?;
        let popular_day = StatsCalculator::mode(days.into_iter().flatten());

        let hours = DataProcessor::i32_values(df, HOUR)?;
        let popular_hour = StatsCalculator::mode(hours.into_iter().flatten());

        Ok(Self {
            popular_month,
            popular_day,
            popular_hour,
        })
    }
}

impl fmt::Display for TimeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Most popular month to travel: {}", or_na(&self.popular_month))?;
        writeln!(f, "Most popular day to travel: {}", or_na(&self.popular_day))?;
        writeln!(f, "Most popular hour to travel: {}", or_na(&self.popular_hour))
    }
}

// ── Stations ─────────────────────────────────────────────────────────────────

/// Most used start station, end station and start/end pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    pub popular_start: Option<String>,
    pub popular_end: Option<String>,
    pub popular_trip: Option<String>,
}

impl StationStats {
    pub const HEADING: &'static str = "Calculating the most popular stations and trip...";

    pub fn compute(df: &DataFrame) -> Result<Self, StatsError> {
        let starts = DataProcessor::string_values(df, START_STATION)?;
        let ends = DataProcessor::string_values(df, END_STATION)?;

        let trips: Vec<String> = starts
            .iter()
            .zip(ends.iter())
            .filter_map(|pair| match pair {
                (Some(start), Some(end)) => Some(format!("{start} to {end}")),
                _ => None,
            })
            .collect();

        Ok(Self {
            popular_start: StatsCalculator::mode(starts.into_iter().flatten()),
            popular_end: StatsCalculator::mode(ends.into_iter().flatten()),
            popular_trip: StatsCalculator::mode(trips),
        })
    }
}

impl fmt::Display for StationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Most commonly used Start Station to travel from: {}",
            or_na(&self.popular_start)
        )?;
        writeln!(
            f,
            "Most commonly used End Station to arrive at: {}",
            or_na(&self.popular_end)
        )?;
        writeln!(
            f,
            "Most commonly used combination of stations: {}",
            or_na(&self.popular_trip)
        )
    }
}

// ── Trip duration ────────────────────────────────────────────────────────────

/// Total and average trip duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationStats {
    pub trips: usize,
    pub total: TimeDelta,
    pub mean: Option<TimeDelta>,
}

impl DurationStats {
    pub const HEADING: &'static str = "Calculating trip duration...";

    pub fn compute(df: &DataFrame) -> Result<Self, StatsError> {
        let seconds: Vec<f64> = DataProcessor::f64_values(df, TRIP_DURATION)?
            .into_iter()
            .flatten()
            .filter(|s| !s.is_nan())
            .collect();

        let total = StatsCalculator::seconds_to_duration(seconds.iter().sum());
        let mean = StatsCalculator::mean(&seconds).map(StatsCalculator::seconds_to_duration);

        Ok(Self {
            trips: seconds.len(),
            total,
            mean,
        })
    }
}

impl fmt::Display for DurationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Trips counted: {}", self.trips)?;
        writeln!(
            f,
            "Total duration of travel: {}",
            StatsCalculator::format_duration(self.total)
        )?;
        let mean = self
            .mean
            .map(StatsCalculator::format_duration)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        writeln!(f, "Average duration of travel: {mean}")
    }
}

// ── Users ────────────────────────────────────────────────────────────────────

/// Gender and birth-year figures, only for cities that record them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Demographics {
    pub genders: Vec<(String, usize)>,
    pub earliest_birth_year: Option<i32>,
    pub most_recent_birth_year: Option<i32>,
    pub most_common_birth_year: Option<i32>,
}

impl Demographics {
    fn compute(df: &DataFrame) -> Result<Self, StatsError> {
        let genders = DataProcessor::string_values(df, GENDER)?;
        let genders = StatsCalculator::value_counts(genders.into_iter().flatten());

        let years: Vec<f64> = DataProcessor::f64_values(df, BIRTH_YEAR)?
            .into_iter()
            .flatten()
            .filter(|y| !y.is_nan())
            .collect();
        let range = StatsCalculator::min_max(&years);
        let most_common_birth_year = StatsCalculator::mode(years.iter().map(|y| y.trunc() as i32));

        Ok(Self {
            genders,
            earliest_birth_year: range.map(|(min, _)| min.trunc() as i32),
            most_recent_birth_year: range.map(|(_, max)| max.trunc() as i32),
            most_common_birth_year,
        })
    }
}

/// User type distribution plus demographics where available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    pub user_types: Vec<(String, usize)>,
    pub demographics: Option<Demographics>,
}

impl UserStats {
    pub const HEADING: &'static str = "Calculating User statistics...";

    /// Gender and birth-year columns are only read when `city` carries them.
    pub fn compute(df: &DataFrame, city: &City) -> Result<Self, StatsError> {
        let user_types = DataProcessor::string_values(df, USER_TYPE)?;
        let user_types = StatsCalculator::value_counts(user_types.into_iter().flatten());

        let demographics = if city.has_demographics {
            Some(Demographics::compute(df)?)
        } else {
            tracing::debug!("{} has no demographic columns", city.name);
            None
        };

        Ok(Self {
            user_types,
            demographics,
        })
    }
}

impl fmt::Display for UserStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Type of bikeshare users and the total number of each:")?;
        write_counts(f, &self.user_types)?;

        if let Some(demo) = &self.demographics {
            writeln!(f)?;
            writeln!(f, "Gender of bikeshare users and the total number of each:")?;
            write_counts(f, &demo.genders)?;
            writeln!(f)?;
            writeln!(f, "Birth year of eldest user: {}", or_na(&demo.earliest_birth_year))?;
            writeln!(f, "Birth year of youngest user: {}", or_na(&demo.most_recent_birth_year))?;
            writeln!(f, "Most common birth year: {}", or_na(&demo.most_common_birth_year))?;
        }
        Ok(())
    }
}

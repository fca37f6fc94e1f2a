//! CSV Data Loader Module
//! Loads a city's trip file with Polars and derives calendar columns from `Start Time`.

use crate::config::{City, DatasetRegistry};
use chrono::{Datelike, NaiveDateTime, Timelike};
use polars::prelude::*;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const START_TIME: &str = "Start Time";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

pub const MONTH: &str = "month";
pub const DAY_OF_WEEK: &str = "day_of_week";
pub const HOUR: &str = "hour";

const BASE_COLUMNS: [&str; 5] = [START_TIME, START_STATION, END_STATION, TRIP_DURATION, USER_TYPE];
const DEMOGRAPHIC_COLUMNS: [&str; 2] = [GENDER, BIRTH_YEAR];

const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%m/%d/%Y %H:%M"];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Data file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Column '{column}' missing from {path}")]
    MissingColumn { column: String, path: PathBuf },
}

/// Calendar fields derived from one start timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarFields {
    pub month: i32,
    pub day_of_week: String,
    pub hour: i32,
}

impl CalendarFields {
    fn from_datetime(dt: &NaiveDateTime) -> Self {
        Self {
            month: dt.month() as i32,
            day_of_week: dt.format("%A").to_string(),
            hour: dt.hour() as i32,
        }
    }
}

/// Parse a `Start Time` value in any of the accepted layouts.
pub fn parse_start_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Loads trip CSV files into Polars DataFrames.
pub struct DataLoader;

impl DataLoader {
    /// Load the file registered for `city` and add the derived columns.
    pub fn load_city(registry: &DatasetRegistry, city: &City) -> Result<DataFrame, LoaderError> {
        let path = registry.path_for(city);
        tracing::info!("Loading {} trips from {}", city.name, path.display());

        let df = Self::load_csv(&path)?;
        Self::require_columns(&df, &path, &BASE_COLUMNS)?;
        if city.has_demographics {
            Self::require_columns(&df, &path, &DEMOGRAPHIC_COLUMNS)?;
        }

        let df = Self::with_calendar_columns(df)?;
        tracing::info!("Loaded {} rows for {}", df.height(), city.name);
        Ok(df)
    }

    /// Read a CSV file using Polars.
    pub fn load_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::FileNotFound(path.to_path_buf()));
        }

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        Ok(df)
    }

    fn require_columns(df: &DataFrame, path: &Path, columns: &[&str]) -> Result<(), LoaderError> {
        for column in columns {
            if df.column(column).is_err() {
                return Err(LoaderError::MissingColumn {
                    column: column.to_string(),
                    path: path.to_path_buf(),
                });
            }
        }
        Ok(())
    }

    /// Append `month`, `day_of_week` and `hour` derived from `Start Time`.
    ///
    /// Rows whose timestamp cannot be parsed get nulls in all three columns.
    pub fn with_calendar_columns(mut df: DataFrame) -> Result<DataFrame, LoaderError> {
        let start = df.column(START_TIME)?.cast(&DataType::String)?;
        let raw: Vec<Option<&str>> = start.str()?.into_iter().collect();

        let fields: Vec<Option<CalendarFields>> = raw
            .par_iter()
            .map(|value| {
                value
                    .and_then(parse_start_time)
                    .map(|dt| CalendarFields::from_datetime(&dt))
            })
            .collect();

        let unparsed = fields.iter().filter(|f| f.is_none()).count();
        if unparsed > 0 {
            tracing::debug!("{} rows have an unparseable start time", unparsed);
        }

        let months: Vec<Option<i32>> = fields.iter().map(|f| f.as_ref().map(|f| f.month)).collect();
        let days: Vec<Option<String>> = fields
            .iter()
            .map(|f| f.as_ref().map(|f| f.day_of_week.clone()))
            .collect();
        let hours: Vec<Option<i32>> = fields.iter().map(|f| f.as_ref().map(|f| f.hour)).collect();

        df.with_column(Column::new(MONTH.into(), months))?;
        df.with_column(Column::new(DAY_OF_WEEK.into(), days))?;
        df.with_column(Column::new(HOUR.into(), hours))?;

        Ok(df)
    }
}

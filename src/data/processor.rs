//! Data Processor Module
//! Applies the session's month/day filter and extracts typed column values.

use crate::config::DatasetRegistry;
use crate::data::loader::{DAY_OF_WEEK, MONTH};
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column '{0}' not found")]
    MissingColumn(String),
}

/// Month and weekday restriction chosen for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripFilter {
    /// Month number (1 = January), `None` keeps every month.
    pub month: Option<u32>,
    /// Title-cased weekday name, `None` keeps every day.
    pub day: Option<String>,
}

impl TripFilter {
    /// Build a filter from raw month/day selectors such as `"march"` or `"all"`.
    pub fn from_selectors(registry: &DatasetRegistry, month: &str, day: &str) -> Self {
        Self {
            month: registry.month_number(month),
            day: registry.day_filter(day),
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.month.is_none() && self.day.is_none()
    }
}

/// Filtering and column access over trip DataFrames.
pub struct DataProcessor;

impl DataProcessor {
    /// Return the rows matching `filter`. The input frame is left untouched.
    pub fn apply_filter(df: &DataFrame, filter: &TripFilter) -> Result<DataFrame, ProcessorError> {
        if filter.is_unfiltered() {
            return Ok(df.clone());
        }

        let mut lazy = df.clone().lazy();
        if let Some(month) = filter.month {
            lazy = lazy.filter(col(MONTH).eq(lit(month as i32)));
        }
        if let Some(day) = &filter.day {
            lazy = lazy.filter(col(DAY_OF_WEEK).eq(lit(day.as_str())));
        }

        let filtered = lazy.collect()?;
        tracing::info!(
            "Filter {:?} kept {} of {} rows",
            filter,
            filtered.height(),
            df.height()
        );
        Ok(filtered)
    }

    pub fn has_column(df: &DataFrame, name: &str) -> bool {
        df.column(name).is_ok()
    }

    fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, ProcessorError> {
        df.column(name)
            .map_err(|_| ProcessorError::MissingColumn(name.to_string()))
    }

    /// Column values as strings, nulls preserved.
    pub fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, ProcessorError> {
        let column = Self::column(df, name)?.cast(&DataType::String)?;
        let values = column
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect();
        Ok(values)
    }

    /// Column values as floats, nulls preserved.
    pub fn f64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, ProcessorError> {
        let column = Self::column(df, name)?.cast(&DataType::Float64)?;
        let values = column.f64()?.into_iter().collect();
        Ok(values)
    }

    /// Column values as 32-bit integers, nulls preserved.
    pub fn i32_values(df: &DataFrame, name: &str) -> Result<Vec<Option<i32>>, ProcessorError> {
        let column = Self::column(df, name)?.cast(&DataType::Int32)?;
        let values = column.i32()?.into_iter().collect();
        Ok(values)
    }
}

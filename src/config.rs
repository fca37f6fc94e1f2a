//! Configuration Module
//! Command-line settings and the fixed dataset registry.

use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Number of rows shown per raw-data window.
pub const WINDOW_SIZE: usize = 5;

/// Selector value meaning "no filter".
pub const ALL: &str = "all";

const MONTHS: [&str; 7] = [ALL, "january", "february", "march", "april", "may", "june"];

const DAYS: [&str; 8] = [
    ALL,
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Explore US bikeshare trip data interactively
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bikeshare_explorer",
    about = "Explore US bikeshare trip data interactively",
    version
)]
pub struct Settings {
    /// Directory containing the city CSV files
    #[arg(long, env = "BIKESHARE_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Logging level (written to stderr)
    #[arg(
        long,
        env = "BIKESHARE_LOG",
        default_value = "warn",
        value_parser = ["trace", "debug", "info", "warn", "error"]
    )]
    pub log_level: String,
}

/// Install the global `tracing` subscriber.
///
/// Logs go to stderr so stdout carries only the interactive session.
pub fn setup_logging(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("warn"));

    let layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry().with(filter).with(layer).init();
}

/// A city whose trips can be explored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    pub name: &'static str,
    pub file_name: &'static str,
    /// Whether the dataset carries `Gender` and `Birth Year` columns.
    pub has_demographics: bool,
}

/// Fixed mapping of cities to files plus the month and day enumerations.
///
/// Built once at startup and shared read-only by the whole session.
#[derive(Debug, Clone)]
pub struct DatasetRegistry {
    data_dir: PathBuf,
    cities: Vec<City>,
    window_size: usize,
}

impl DatasetRegistry {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            cities: vec![
                City {
                    name: "chicago",
                    file_name: "chicago.csv",
                    has_demographics: true,
                },
                City {
                    name: "new york city",
                    file_name: "new_york_city.csv",
                    has_demographics: true,
                },
                City {
                    name: "washington",
                    file_name: "washington.csv",
                    has_demographics: false,
                },
            ],
            window_size: WINDOW_SIZE,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.data_dir.clone())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// City names in prompt order.
    pub fn city_names(&self) -> Vec<&'static str> {
        self.cities.iter().map(|c| c.name).collect()
    }

    pub fn city(&self, name: &str) -> Option<&City> {
        self.cities.iter().find(|c| c.name == name)
    }

    /// Full path of the CSV file backing `city`.
    pub fn path_for(&self, city: &City) -> PathBuf {
        self.data_dir.join(city.file_name)
    }

    pub fn months(&self) -> &'static [&'static str] {
        &MONTHS
    }

    pub fn days(&self) -> &'static [&'static str] {
        &DAYS
    }

    /// Month number (1-based) for a month selector, `None` for `all` or unknown names.
    pub fn month_number(&self, selector: &str) -> Option<u32> {
        match MONTHS.iter().position(|m| *m == selector) {
            Some(0) | None => None,
            Some(index) => u32::try_from(index).ok(),
        }
    }

    /// Weekday name as it appears in the derived `day_of_week` column.
    pub fn day_filter(&self, selector: &str) -> Option<String> {
        if selector == ALL || !DAYS.contains(&selector) {
            return None;
        }
        Some(title_case(selector))
    }
}

/// Capitalise the first letter of every word: `"new york city"` -> `"New York City"`.
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

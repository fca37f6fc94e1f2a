//! Bikeshare Session Driver
//! Prompts for filters, prints the four reports, pages raw data and offers a restart.

use crate::config::{City, DatasetRegistry};
use crate::console::pager::RawDataPager;
use crate::console::prompt::{PromptError, Prompter};
use crate::data::{DataLoader, DataProcessor, LoaderError, ProcessorError, TripFilter};
use crate::stats::{DurationStats, StationStats, StatsError, TimeStats, UserStats};
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::time::Instant;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error(transparent)]
    Processor(#[from] ProcessorError),
    #[error(transparent)]
    Stats(#[from] StatsError),
    #[error(transparent)]
    Prompt(#[from] PromptError),
    #[error("Unknown city: {0}")]
    UnknownCity(String),
    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// City, month and day chosen at the start of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub city: City,
    pub month: String,
    pub day: String,
}

/// Interactive bikeshare explorer.
pub struct BikeshareApp<R, W> {
    registry: DatasetRegistry,
    prompter: Prompter<R, W>,
}

impl<R: BufRead, W: Write> BikeshareApp<R, W> {
    pub fn new(registry: DatasetRegistry, input: R, output: W) -> Self {
        Self {
            registry,
            prompter: Prompter::new(input, output),
        }
    }

    /// Run sessions until the user declines to restart or input ends.
    pub fn run(&mut self) -> Result<(), AppError> {
        loop {
            let Some(selection) = self.select_filters()? else {
                tracing::info!("Input closed, leaving");
                return Ok(());
            };

            self.run_session(&selection)?;

            if !self.prompter.confirm("Would you like to restart?")? {
                return Ok(());
            }
        }
    }

    /// Ask for city, month and day. `None` when input ends first.
    fn select_filters(&mut self) -> Result<Option<Selection>, AppError> {
        writeln!(
            self.prompter.output(),
            "Hello! Let's explore some US bikeshare data!"
        )?;

        let (city, month, day) = match self.ask_filters() {
            Ok(answers) => answers,
            Err(PromptError::InputClosed) => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        writeln!(self.prompter.output(), "{}", "-".repeat(40))?;

        self.resolve_selection(&city, month, day).map(Some)
    }

    fn resolve_selection(&self, city: &str, month: String, day: String) -> Result<Selection, AppError> {
        let city = self
            .registry
            .city(city)
            .cloned()
            .ok_or_else(|| AppError::UnknownCity(city.to_string()))?;
        Ok(Selection { city, month, day })
    }

    fn ask_filters(&mut self) -> Result<(String, String, String), PromptError> {
        let cities = self.registry.city_names();
        let city = self.prompter.choose("US city", &cities)?;
        let month = self.prompter.choose("month", self.registry.months())?;
        let day = self.prompter.choose("day", self.registry.days())?;
        Ok((city, month, day))
    }

    /// Load, filter, report and page one selection.
    pub fn run_session(&mut self, selection: &Selection) -> Result<(), AppError> {
        let trips = DataLoader::load_city(&self.registry, &selection.city)?;
        let filter = TripFilter::from_selectors(&self.registry, &selection.month, &selection.day);
        let df = DataProcessor::apply_filter(&trips, &filter)?;

        self.report(TimeStats::HEADING, Some(TimeStats::NOTE), || {
            TimeStats::compute(&df)
        })?;
        self.report(StationStats::HEADING, None, || StationStats::compute(&df))?;
        self.report(DurationStats::HEADING, None, || DurationStats::compute(&df))?;
        self.report(UserStats::HEADING, None, || {
            UserStats::compute(&df, &selection.city)
        })?;

        let mut pager = RawDataPager::new(self.registry.window_size());
        pager.run(&mut self.prompter, &df)?;
        Ok(())
    }

    fn report<T, F>(&mut self, heading: &str, note: Option<&str>, compute: F) -> Result<(), AppError>
    where
        T: Display,
        F: FnOnce() -> Result<T, StatsError>,
    {
        let out = self.prompter.output();
        writeln!(out, "\n{heading}\n")?;
        if let Some(note) = note {
            writeln!(out, "{note}\n")?;
        }

        let started = Instant::now();
        let report = compute()?;
        let elapsed = started.elapsed();

        writeln!(out, "{report}")?;
        writeln!(out, "This took {} seconds to compute.", elapsed.as_secs_f64())?;
        writeln!(out, "{}", "-".repeat(40))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    const CHICAGO: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
0,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
1,2017-05-25 18:19:03,2017-05-25 18:45:53,1610,Theater on the Lake,Sheffield Ave & Waveland Ave,Subscriber,Female,1992.0
2,2017-01-04 08:27:49,2017-01-04 08:34:45,416,Theater on the Lake,Wood St & Taylor St,Customer,,
3,2017-03-06 13:49:38,2017-03-06 13:55:28,350,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1981.0
4,2017-01-17 14:53:07,2017-01-17 15:02:01,534,Theater on the Lake,Clark St & Armitage Ave,Subscriber,Male,1975.0
";

    const WASHINGTON: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
0,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
1,2017-06-11 10:40:00,2017-06-11 10:46:00,402.549,Yuma St & Tenley Circle NW,Connecticut Ave & Yuma St NW,Customer
2,2017-03-11 10:40:00,2017-03-11 10:46:00,402.549,Yuma St & Tenley Circle NW,Connecticut Ave & Yuma St NW,Subscriber
";

    fn data_dir() -> TempDir {
        let tmp = TempDir::new().expect("tempdir");
        fs::write(tmp.path().join("chicago.csv"), CHICAGO).expect("write chicago");
        fs::write(tmp.path().join("washington.csv"), WASHINGTON).expect("write washington");
        tmp
    }

    fn run_script(tmp: &TempDir, script: &str) -> (Result<(), AppError>, String) {
        let registry = DatasetRegistry::new(tmp.path());
        let mut out = Vec::new();
        let result = {
            let mut app = BikeshareApp::new(registry, Cursor::new(script.to_string()), &mut out);
            app.run()
        };
        (result, String::from_utf8(out).expect("utf8"))
    }

    #[test]
    fn test_chicago_unfiltered_session() {
        let tmp = data_dir();
        let (result, text) = run_script(&tmp, "chicago\nall\nall\nno\nno\n");
        result.expect("session");

        assert!(text.contains("Most commonly used Start Station to travel from: Theater on the Lake"));
        assert!(text.contains("Most commonly used End Station to arrive at: Damen Ave & Chicago Ave"));
        assert!(text.contains("Gender of bikeshare users"));
        assert!(text.contains("Birth year of youngest user: 1992"));
        assert_eq!(text.matches("This took").count(), 4);
    }

    #[test]
    fn test_washington_june_has_no_demographics() {
        let tmp = data_dir();
        let (result, text) = run_script(&tmp, "washington\njune\nall\nno\nno\n");
        result.expect("session");

        assert!(text.contains("Most popular month to travel: June"));
        assert!(text.contains("Subscriber"));
        assert!(!text.contains("Gender"));
        assert!(!text.contains("Birth year"));
    }

    #[test]
    fn test_restart_and_pager() {
        let tmp = data_dir();
        let script = "chicago\njanuary\nall\nyes\nno\nyes\nwashington\nall\nsunday\nno\nno\n";
        let (result, text) = run_script(&tmp, script);
        result.expect("session");

        assert_eq!(text.matches("Which specific US city").count(), 2);
        assert!(text.contains("shape: (2,"));
        assert!(text.contains("Most popular day to travel: Sunday"));
    }

    #[test]
    fn test_input_closed_ends_cleanly() {
        let tmp = data_dir();
        let (result, text) = run_script(&tmp, "chicago\n");
        result.expect("clean exit");
        assert!(!text.contains("This took"));
    }

    #[test]
    fn test_unknown_city_is_an_error() {
        let tmp = data_dir();
        let app = BikeshareApp::new(DatasetRegistry::new(tmp.path()), Cursor::new(""), Vec::new());

        let err = app
            .resolve_selection("boston", "all".to_string(), "all".to_string())
            .unwrap_err();
        assert!(matches!(err, AppError::UnknownCity(ref name) if name == "boston"));
        assert_eq!(err.to_string(), "Unknown city: boston");

        let selection = app
            .resolve_selection("chicago", "june".to_string(), "all".to_string())
            .expect("known city");
        assert_eq!(selection.city.name, "chicago");
    }

    #[test]
    fn test_missing_dataset_is_fatal() {
        let tmp = data_dir();
        let (result, _text) = run_script(&tmp, "new york city\nall\nall\n");
        let err = result.unwrap_err();
        assert!(matches!(err, AppError::Loader(LoaderError::FileNotFound(_))));
    }
}

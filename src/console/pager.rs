//! Raw Data Pager Module
//! Shows successive fixed-size windows of the filtered trips on request.

use crate::console::prompt::{PromptError, Prompter};
use polars::prelude::*;
use std::io::{BufRead, Write};

/// Let polars print every column and full station names.
pub fn configure_table_display() {
    for (key, value) in [("POLARS_FMT_MAX_COLS", "-1"), ("POLARS_FMT_STR_LEN", "64")] {
        if std::env::var_os(key).is_none() {
            std::env::set_var(key, value);
        }
    }
}

/// Window position over a DataFrame.
#[derive(Debug, Clone)]
pub struct RawDataPager {
    window_size: usize,
    offset: usize,
}

impl RawDataPager {
    pub fn new(window_size: usize) -> Self {
        Self {
            window_size,
            offset: 0,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Rows `[offset, offset + window_size)` clamped to the frame, then advance.
    ///
    /// Returns `None` once the frame is exhausted.
    pub fn next_window(&mut self, df: &DataFrame) -> Option<DataFrame> {
        let start = self.offset;
        self.offset = self.offset.saturating_add(self.window_size);

        let height = df.height();
        if start >= height {
            return None;
        }
        let len = self.window_size.min(height - start);
        Some(df.slice(start as i64, len))
    }

    /// Keep showing windows while the user answers `yes`. Returns how many were shown.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
        df: &DataFrame,
    ) -> Result<usize, PromptError> {
        let mut shown = 0;
        while prompter.confirm(&format!(
            "Would you like to see {} lines of raw data?",
            self.window_size
        ))? {
            match self.next_window(df) {
                Some(window) => {
                    writeln!(prompter.output(), "{window}")?;
                    shown += 1;
                }
                None => writeln!(prompter.output(), "No more rows to display.")?,
            }
        }
        tracing::debug!("Pager stopped at offset {}", self.offset());
        Ok(shown)
    }
}

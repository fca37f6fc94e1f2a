//! Bikeshare Explorer - Interactive US bikeshare trip statistics
//!
//! Loads one city's trip CSV, filters it by month and weekday, and prints
//! travel-time, station, duration and user summaries.

mod config;
mod console;
mod data;
mod stats;

use anyhow::{Context, Result};
use clap::Parser;
use config::{DatasetRegistry, Settings};
use console::BikeshareApp;
use std::io;

fn main() -> Result<()> {
    let settings = Settings::parse();
    config::setup_logging(&settings.log_level);
    console::configure_table_display();

    let registry = DatasetRegistry::from_settings(&settings);
    tracing::info!(
        "Bikeshare Explorer v{} reading data from {}",
        env!("CARGO_PKG_VERSION"),
        registry.data_dir().display()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut app = BikeshareApp::new(registry, stdin.lock(), stdout.lock());
    app.run().context("bikeshare session ended with an error")?;

    Ok(())
}

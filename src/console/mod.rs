//! Console module - Interactive prompts, raw data paging and the session loop

mod app;
mod pager;
mod prompt;

pub use app::BikeshareApp;
pub use pager::configure_table_display;

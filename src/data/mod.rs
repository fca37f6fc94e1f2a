//! Data module - CSV loading and filtering

pub mod loader;
pub mod processor;

pub use loader::{DataLoader, LoaderError};
pub use processor::{DataProcessor, ProcessorError, TripFilter};

//! Data module - CSV loading and series preparation

mod loader;
mod processor;
mod series;

pub use loader::{DataLoader, LoaderError};
pub use processor::{DataProcessor, DatasetSpec, ProcessorError};
pub use series::{NamedSeries, SeriesCollection};

//! Data Processor Module
//! Sorts result tables by lower bound and shapes them into a series collection.

use super::loader::{DataLoader, LoaderError};
use super::series::{NamedSeries, SeriesCollection};
use crate::config::{ChartVariant, LOWER_BOUND};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error("Failed to prepare {}: {source}", path.display())]
    Polars {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("At least one dataset is required")]
    NoDatasets,
}

/// A labeled input file, as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSpec {
    pub label: String,
    pub path: PathBuf,
}

impl DatasetSpec {
    pub fn new(label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }
}

/// Handles sorting, column extraction and clamping.
pub struct DataProcessor;

impl DataProcessor {
    /// Build the series collection for `variant` from the labeled files.
    ///
    /// Files are processed in input order. The lower-bound series (when the
    /// variant has one) comes from the first file only and leads the
    /// collection.
    pub fn build_collection(
        datasets: &[DatasetSpec],
        axis_label: &str,
        variant: ChartVariant,
    ) -> Result<SeriesCollection, ProcessorError> {
        if datasets.is_empty() {
            return Err(ProcessorError::NoDatasets);
        }

        let metric = variant.metric_column();
        let mut collection = SeriesCollection::new(axis_label);

        for (i, dataset) in datasets.iter().enumerate() {
            let path = dataset.path.as_path();
            let df = DataLoader::load_with_columns(path, &[LOWER_BOUND, metric])?;
            let sorted = Self::sort_by_lower_bound(&df).map_err(|e| polars_error(path, e))?;

            if i == 0 {
                if let Some(label) = variant.baseline_label() {
                    let baseline = Self::column_values(&sorted, LOWER_BOUND)
                        .map_err(|e| polars_error(path, e))?;
                    collection.push(NamedSeries::new(label, baseline));
                }
            }

            let mut values =
                Self::column_values(&sorted, metric).map_err(|e| polars_error(path, e))?;
            if let Some(range) = variant.clamp_range() {
                Self::clamp_values(&mut values, range);
            }

            log::info!(
                "{}: {} rows of '{}' from {}",
                dataset.label,
                values.len(),
                metric,
                path.display()
            );
            collection.push(NamedSeries::new(dataset.label.as_str(), values));
        }

        Ok(collection)
    }

    /// Stable ascending sort on the lower-bound column, missing values last.
    pub fn sort_by_lower_bound(df: &DataFrame) -> PolarsResult<DataFrame> {
        df.sort(
            [LOWER_BOUND],
            SortMultipleOptions::default()
                .with_maintain_order(true)
                .with_nulls_last(true),
        )
    }

    /// Extract a column as `f64` values; missing cells become NaN.
    pub fn column_values(df: &DataFrame, column: &str) -> PolarsResult<Vec<f64>> {
        let value_f64 = df.column(column)?.cast(&DataType::Float64)?;
        let value_ca = value_f64.f64()?;
        Ok(value_ca
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect())
    }

    /// Clamp each value into `[lo, hi]`. Missing values collapse to `lo`.
    pub fn clamp_values(values: &mut [f64], (lo, hi): (f64, f64)) {
        for v in values.iter_mut() {
            *v = if v.is_nan() { lo } else { v.clamp(lo, hi) };
        }
    }
}

fn polars_error(path: &Path, source: PolarsError) -> ProcessorError {
    ProcessorError::Polars {
        path: path.to_path_buf(),
        source,
    }
}

//! CSV Data Loader Module
//! Loads solver result files with Polars and checks the columns a chart needs.

use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Cannot read {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Column '{column}' not found in {}", path.display())]
    Schema { path: PathBuf, column: String },
    #[error("Column '{column}' in {} is not numeric ({dtype})", path.display())]
    NonNumeric {
        path: PathBuf,
        column: String,
        dtype: String,
    },
    #[error("Failed to load CSV {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
}

/// Loads result tables from CSV files.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file with a header row.
    pub fn load_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        // Polars reports a missing file as a generic compute error; check first
        // so the caller gets the path back.
        File::open(path).map_err(|source| LoaderError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(|source| LoaderError::Csv {
                path: path.to_path_buf(),
                source,
            })?;

        log::debug!(
            "Loaded {}: {} rows, {} columns",
            path.display(),
            df.height(),
            df.width()
        );
        Ok(df)
    }

    /// Load a CSV file and require each of `columns` to be present and numeric.
    pub fn load_with_columns(path: &Path, columns: &[&str]) -> Result<DataFrame, LoaderError> {
        let mut df = Self::load_csv(path)?;
        for column in columns {
            Self::require_numeric(&mut df, column, path)?;
        }
        Ok(df)
    }

    /// Fail with a schema error unless `column` exists and holds numbers.
    ///
    /// Schema inference reads a column containing `Infinity` as text. Such a
    /// column is converted to `Float64` in place when every cell parses.
    pub fn require_numeric(
        df: &mut DataFrame,
        column: &str,
        path: &Path,
    ) -> Result<(), LoaderError> {
        let col = df.column(column).map_err(|_| LoaderError::Schema {
            path: path.to_path_buf(),
            column: column.to_string(),
        })?;

        if Self::is_numeric(col.dtype()) {
            return Ok(());
        }

        let non_numeric = || LoaderError::NonNumeric {
            path: path.to_path_buf(),
            column: column.to_string(),
            dtype: col.dtype().to_string(),
        };
        if !matches!(col.dtype(), DataType::String) {
            return Err(non_numeric());
        }

        let parsed = col
            .strict_cast(&DataType::Float64)
            .map_err(|_| non_numeric())?;
        log::debug!("Parsed text column '{}' in {} as floats", column, path.display());
        df.with_column(parsed).map_err(|source| LoaderError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    fn is_numeric(dtype: &DataType) -> bool {
        matches!(
            dtype,
            DataType::Float32
                | DataType::Float64
                | DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::UInt8
                | DataType::UInt16
                | DataType::UInt32
                | DataType::UInt64
        )
    }
}

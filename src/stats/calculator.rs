//! Statistics Calculator Module
//! Descriptive statistics for each series of a comparison.

use crate::data::{NamedSeries, SeriesCollection};
use statrs::statistics::{Data, Distribution, Max, Min, OrderStatistics};

/// Statistics for a single series.
#[derive(Debug, Clone)]
pub struct SeriesStats {
    pub label: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub p05: f64,
    pub p95: f64,
}

impl Default for SeriesStats {
    fn default() -> Self {
        Self {
            label: String::new(),
            count: 0,
            mean: f64::NAN,
            median: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
            p05: f64::NAN,
            p95: f64::NAN,
        }
    }
}

/// Computes and formats summary statistics.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics, ignoring missing values.
    pub fn compute_series_stats(series: &NamedSeries) -> SeriesStats {
        let values = series.present_values();
        let n = values.len();
        if n == 0 {
            return SeriesStats {
                label: series.label.clone(),
                ..SeriesStats::default()
            };
        }

        let mut data = Data::new(values);
        let mean = data.mean().unwrap_or(f64::NAN);
        let std = if n > 1 {
            data.std_dev().unwrap_or(f64::NAN)
        } else {
            0.0
        };

        SeriesStats {
            label: series.label.clone(),
            count: n,
            mean,
            median: data.median(),
            std,
            min: data.min(),
            max: data.max(),
            p05: data.percentile(5),
            p95: data.percentile(95),
        }
    }

    /// Statistics for every series, in input order.
    pub fn compute_all(collection: &SeriesCollection) -> Vec<SeriesStats> {
        collection
            .series
            .iter()
            .map(Self::compute_series_stats)
            .collect()
    }

    /// Render a plain-text table, one row per series.
    pub fn format_table(stats: &[SeriesStats]) -> String {
        let width = stats
            .iter()
            .map(|s| s.label.len())
            .max()
            .unwrap_or(0)
            .max("series".len());

        let mut out = format!(
            "{:<width$} {:>6} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9}\n",
            "series", "n", "mean", "median", "std", "min", "max", "p05", "p95"
        );
        for s in stats {
            out.push_str(&format!(
                "{:<width$} {:>6} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9}\n",
                s.label,
                s.count,
                cell(s.mean),
                cell(s.median),
                cell(s.std),
                cell(s.min),
                cell(s.max),
                cell(s.p05),
                cell(s.p95)
            ));
        }
        out
    }
}

fn cell(value: f64) -> String {
    if value.is_nan() {
        "-".to_string()
    } else {
        format!("{:.3}", value)
    }
}

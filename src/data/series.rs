//! Series Module
//! Labeled value sequences and the ordered collection handed to the renderers.

use crate::config::ChartVariant;
use serde::Serialize;

/// One plotted line or histogram input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedSeries {
    pub label: String,
    pub values: Vec<f64>,
}

impl NamedSeries {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
    /// Values with missing (NaN) and infinite cells removed.
    /// Values with missing cells (NaN) removed.
    pub fn present_values(&self) -> Vec<f64> {
        self.values.iter().copied().filter(|v| v.is_finite()).collect()
    }
}

/// Ordered series plus the axis label they are drawn against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesCollection {
    pub axis_label: String,
    pub series: Vec<NamedSeries>,
}

impl SeriesCollection {
    pub fn new(axis_label: impl Into<String>) -> Self {
        Self {
            axis_label: axis_label.into(),
            series: Vec::new(),
        }
    }

    pub fn push(&mut self, series: NamedSeries) {
        self.series.push(series);
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<&NamedSeries> {
        self.series.iter().find(|s| s.label == label)
    }

    /// Labels in input order.
    pub fn labels(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.label.as_str()).collect()
    }

    /// Series in the order the variant draws them.
    pub fn display_order(&self, variant: ChartVariant) -> Vec<&NamedSeries> {
        if variant.reverse_for_display() {
            self.series.iter().rev().collect()
        } else {
            self.series.iter().collect()
        }
    }

    /// Length of the longest series.
    pub fn max_len(&self) -> usize {
        self.series.iter().map(NamedSeries::len).max().unwrap_or(0)
    }

    /// Smallest and largest present value across all series.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .filter(|v| v.is_finite())
            .fold(None, |range, v| match range {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Pretty JSON; missing values become `null`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

//! Chart Configuration Module
//! Column names, chart variants, and the chart style handed to every renderer.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Sort key and baseline column present in every result file.
pub const LOWER_BOUND: &str = "lower_bound";
/// Pass count reported by the solver.
pub const PASSES: &str = "passes";
/// Transfers per needle reported by the solver.
pub const XFER_PER_NEEDLE: &str = "xfer_per_needle";

/// Display range for clamped pass counts. Anything above lands in the ">10" bin.
pub const HISTOGRAM_CLAMP: (f64, f64) = (0.0, 10.0);
/// First histogram bin edge (inclusive).
pub const HISTOGRAM_FIRST_BIN: u32 = 2;
/// Last histogram bin edge (the final bin is closed: [10, 11]).
pub const HISTOGRAM_LAST_BIN: u32 = 11;

#[derive(Error, Debug)]
pub enum StyleError {
    #[error("Failed to read style file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid style file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid colour '{color}' in style file {path} (expected #RRGGBB)")]
    Color { path: String, color: String },
}

/// The three comparison pipelines. They share loading and sorting and differ
/// only in which column they read and how the result is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartVariant {
    /// Line chart of pass counts against the lower bound.
    Passes,
    /// Stacked histograms of clamped pass counts.
    Histogram,
    /// Line chart of transfers per needle.
    Xfers,
}

impl ChartVariant {
    /// Column holding the compared metric.
    pub fn metric_column(self) -> &'static str {
        match self {
            ChartVariant::Passes | ChartVariant::Histogram => PASSES,
            ChartVariant::Xfers => XFER_PER_NEEDLE,
        }
    }

    /// Label of the shared lower-bound series, if the variant draws one.
    pub fn baseline_label(self) -> Option<&'static str> {
        match self {
            ChartVariant::Passes => Some("lower-bound"),
            ChartVariant::Histogram => Some("lb"),
            ChartVariant::Xfers => None,
        }
    }

    /// Range metric values are clamped into before display.
    pub fn clamp_range(self) -> Option<(f64, f64)> {
        match self {
            ChartVariant::Histogram => Some(HISTOGRAM_CLAMP),
            _ => None,
        }
    }

    /// Whether the collection is drawn last-to-first.
    pub fn reverse_for_display(self) -> bool {
        self == ChartVariant::Histogram
    }

    /// Description of the value axis.
    pub fn value_label(self) -> &'static str {
        match self {
            ChartVariant::Passes | ChartVariant::Histogram => "passes",
            ChartVariant::Xfers => "Transfers per needle",
        }
    }

    pub fn is_histogram(self) -> bool {
        self == ChartVariant::Histogram
    }
}

/// Named colour themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Colorblind,
    Bmh,
}

const COLORBLIND_PALETTE: [(u8, u8, u8); 6] = [
    (0, 114, 178),   // Blue
    (0, 158, 115),   // Green
    (213, 94, 0),    // Vermilion
    (204, 121, 167), // Pink
    (240, 228, 66),  // Yellow
    (86, 180, 233),  // Sky blue
];

const BMH_PALETTE: [(u8, u8, u8); 7] = [
    (52, 138, 189),  // Blue
    (166, 6, 40),    // Red
    (122, 104, 166), // Purple
    (70, 120, 33),   // Green
    (213, 94, 0),    // Orange
    (204, 121, 167), // Pink
    (86, 180, 233),  // Sky blue
];

impl Theme {
    /// Series colours, cycled in series order.
    pub fn palette(self) -> &'static [(u8, u8, u8)] {
        match self {
            Theme::Colorblind => &COLORBLIND_PALETTE,
            Theme::Bmh => &BMH_PALETTE,
        }
    }

    /// Plot area background.
    pub fn background(self) -> (u8, u8, u8) {
        match self {
            Theme::Colorblind => (255, 255, 255),
            Theme::Bmh => (238, 238, 238),
        }
    }

    /// Colour for the series at `index`.
    pub fn color(self, index: usize) -> (u8, u8, u8) {
        let palette = self.palette();
        palette[index % palette.len()]
    }
}

/// Visual settings passed explicitly to the static renderer and the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub theme: Theme,
    pub width: u32,
    pub height: u32,
    pub font_family: String,
    pub font_size: u32,
    pub line_width: u32,
    /// Stroke width of the lower-bound series.
    pub baseline_width: u32,
    /// Alternating fill colours of the histogram panels (hex).
    pub histogram_colors: [String; 2],
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            theme: Theme::Colorblind,
            width: 960,
            height: 640,
            font_family: "sans-serif".to_string(),
            font_size: 18,
            line_width: 1,
            baseline_width: 2,
            histogram_colors: ["#36087F".to_string(), "#AE8BD9".to_string()],
        }
    }
}

impl ChartStyle {
    /// Default style for a variant: histograms use the bmh theme.
    pub fn for_variant(variant: ChartVariant) -> Self {
        let theme = if variant.is_histogram() {
            Theme::Bmh
        } else {
            Theme::Colorblind
        };
        Self {
            theme,
            ..Self::default()
        }
    }

    /// Load a style from a JSON file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, StyleError> {
        let text = std::fs::read_to_string(path).map_err(|source| StyleError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let style: Self = serde_json::from_str(&text).map_err(|source| StyleError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        if let Some(color) = style
            .histogram_colors
            .iter()
            .find(|c| parse_hex_color(c).is_none())
        {
            return Err(StyleError::Color {
                path: path.display().to_string(),
                color: color.clone(),
            });
        }
        Ok(style)
    }

    /// Fill colour of the histogram panel at `index`.
    pub fn histogram_color(&self, index: usize) -> (u8, u8, u8) {
        parse_hex_color(&self.histogram_colors[index % 2]).unwrap_or((0, 0, 0))
    }
}

/// Parse a `#RRGGBB` colour string.
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

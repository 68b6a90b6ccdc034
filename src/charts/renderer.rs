//! Static Chart Renderer
//! Draws a series collection to an SVG or PNG file with plotters.
//!
//! Layout:
//! - Line variants: one line per series against row position, lower bound
//!   drawn thicker, frameless legend.
//! - Histogram: one stacked panel per series in display order, shared bins
//!   and y scale, series label on each panel's y axis.

use crate::config::{
    ChartStyle, ChartVariant, HISTOGRAM_CLAMP, HISTOGRAM_FIRST_BIN, HISTOGRAM_LAST_BIN,
};
use crate::data::{NamedSeries, SeriesCollection};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Unsupported output format '{0}' (expected .svg or .png)")]
    UnsupportedFormat(String),
    #[error("Drawing failed: {0}")]
    Drawing(String),
}

/// File formats the static renderer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "svg" => Ok(OutputFormat::Svg),
            "png" => Ok(OutputFormat::Png),
            other => Err(RenderError::UnsupportedFormat(other.to_string())),
        }
    }
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the collection to `path`, overwriting any existing file.
    pub fn render_to_file(
        collection: &SeriesCollection,
        variant: ChartVariant,
        style: &ChartStyle,
        path: &Path,
    ) -> Result<(), RenderError> {
        let format = OutputFormat::from_path(path)?;
        let size = (style.width, style.height);

        match format {
            OutputFormat::Svg => {
                let root = SVGBackend::new(path, size).into_drawing_area();
                Self::draw(&root, collection, variant, style)?;
                root.present().map_err(drawing)?;
            }
            OutputFormat::Png => {
                let root = BitMapBackend::new(path, size).into_drawing_area();
                Self::draw(&root, collection, variant, style)?;
                root.present().map_err(drawing)?;
            }
        }

        log::info!("Chart written to {}", path.display());
        Ok(())
    }

    fn draw<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        collection: &SeriesCollection,
        variant: ChartVariant,
        style: &ChartStyle,
    ) -> Result<(), RenderError> {
        root.fill(&WHITE).map_err(drawing)?;
        if variant.is_histogram() {
            Self::draw_histograms(root, collection, variant, style)
        } else {
            Self::draw_lines(root, collection, variant, style)
        }
    }

    fn draw_lines<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        collection: &SeriesCollection,
        variant: ChartVariant,
        style: &ChartStyle,
    ) -> Result<(), RenderError> {
        let font = (style.font_family.as_str(), f64::from(style.font_size));
        let x_max = collection.max_len().saturating_sub(1).max(1) as f64;
        let (y_min, y_max) = padded_range(collection.value_range());

        let mut chart = ChartBuilder::on(root)
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(0f64..x_max, y_min..y_max)
            .map_err(drawing)?;

        chart
            .plotting_area()
            .fill(&rgb(style.theme.background()))
            .map_err(drawing)?;

        // Row positions carry no meaning, so the x axis only gets its description.
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_label_formatter(&|_| String::new())
            .x_desc(collection.axis_label.as_str())
            .y_desc(variant.value_label())
            .label_style(font)
            .axis_desc_style(font)
            .draw()
            .map_err(drawing)?;

        let has_baseline = variant.baseline_label().is_some();
        for (idx, series) in collection.series.iter().enumerate() {
            let width = if has_baseline && idx == 0 {
                style.baseline_width
            } else {
                style.line_width
            };
            let line_style = rgb(style.theme.color(idx)).stroke_width(width);

            chart
                .draw_series(LineSeries::new(line_points(series), line_style))
                .map_err(drawing)?
                .label(series.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
        }

        chart
            .configure_series_labels()
            .label_font(font)
            .background_style(&TRANSPARENT)
            .border_style(&TRANSPARENT)
            .position(SeriesLabelPosition::UpperLeft)
            .draw()
            .map_err(drawing)?;

        Ok(())
    }

    fn draw_histograms<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        collection: &SeriesCollection,
        variant: ChartVariant,
        style: &ChartStyle,
    ) -> Result<(), RenderError> {
        let panels_series = collection.display_order(variant);
        if panels_series.is_empty() {
            return Ok(());
        }

        let font = (style.font_family.as_str(), f64::from(style.font_size));
        let counts: Vec<Vec<u32>> = panels_series.iter().map(|s| bin_counts(&s.values)).collect();
        let y_max = counts.iter().flatten().copied().max().unwrap_or(0).max(1);

        let panels = root.split_evenly((panels_series.len(), 1));
        let bottom = panels.len() - 1;

        for (i, ((panel, series), counts)) in panels
            .iter()
            .zip(panels_series.iter())
            .zip(counts.iter())
            .enumerate()
        {
            let is_bottom = i == bottom;
            let mut chart = ChartBuilder::on(panel)
                .margin_left(10)
                .margin_right(20)
                .x_label_area_size(if is_bottom { 40 } else { 0 })
                .y_label_area_size(40)
                .build_cartesian_2d(
                    (HISTOGRAM_FIRST_BIN..HISTOGRAM_LAST_BIN).into_segmented(),
                    0u32..y_max + 1,
                )
                .map_err(drawing)?;

            chart
                .plotting_area()
                .fill(&rgb(style.theme.background()))
                .map_err(drawing)?;

            {
                let mut mesh = chart.configure_mesh();
                // Counts share one scale; only the series label goes on the y axis.
                mesh.disable_mesh()
                    .y_label_formatter(&blank_label)
                    .set_tick_mark_size(LabelAreaPosition::Left, 0)
                    .y_desc(series.label.as_str())
                    .x_label_formatter(&bin_label)
                    .label_style(font)
                    .axis_desc_style(font);
                if is_bottom {
                    mesh.x_desc(collection.axis_label.as_str());
                }
                mesh.draw().map_err(drawing)?;
            }

            chart
                .draw_series(
                    Histogram::vertical(&chart)
                        .style(rgb(style.histogram_color(i)).filled())
                        .margin(0)
                        .data(
                            counts
                                .iter()
                                .enumerate()
                                .map(|(k, count)| (HISTOGRAM_FIRST_BIN + k as u32, *count)),
                        ),
                )
                .map_err(drawing)?;
        }

        Ok(())
    }
}

/// Count values into the bins `[2,3), [3,4), ..., [10,11]`. Values outside
/// the bins and missing values are not counted.
pub fn bin_counts(values: &[f64]) -> Vec<u32> {
    let bins = (HISTOGRAM_LAST_BIN - HISTOGRAM_FIRST_BIN) as usize;
    let lo = f64::from(HISTOGRAM_FIRST_BIN);
    let hi = f64::from(HISTOGRAM_LAST_BIN);

    let mut counts = vec![0u32; bins];
    for &v in values {
        if v.is_nan() || v < lo || v > hi {
            continue;
        }
        // the last bin is closed on the right
        let idx = ((v - lo).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
}

/// Tick labels for the histogram x axis: even bins, with the clamp ceiling as ">10".
fn bin_label(value: &SegmentValue<u32>) -> String {
    let top = HISTOGRAM_CLAMP.1 as u32;
    match value {
        SegmentValue::Exact(v) | SegmentValue::CenterOf(v) if *v == top => format!(">{top}"),
        SegmentValue::Exact(v) | SegmentValue::CenterOf(v) if v % 2 == 0 => v.to_string(),
        _ => String::new(),
    }
}

fn blank_label(_: &u32) -> String {
    String::new()
}

/// Value range with a 5% margin; flat or empty ranges get a unit margin.
fn padded_range(range: Option<(f64, f64)>) -> (f64, f64) {
    match range {
        None => (0.0, 1.0),
        Some((lo, hi)) if lo == hi => (lo - 1.0, hi + 1.0),
        Some((lo, hi)) => {
            let pad = (hi - lo) * 0.05;
            (lo - pad, hi + pad)
        }
    }
}

/// Points of one line, skipping missing values.
fn line_points(series: &NamedSeries) -> Vec<(f64, f64)> {
    series
        .values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, v)| (i as f64, *v))
        .collect()
}

fn rgb((r, g, b): (u8, u8, u8)) -> RGBColor {
    RGBColor(r, g, b)
}

fn drawing<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Drawing(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            OutputFormat::from_path(Path::new("plot.svg")).unwrap(),
            OutputFormat::Svg
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("out/Plot.PNG")).unwrap(),
            OutputFormat::Png
        );
        assert!(matches!(
            OutputFormat::from_path(Path::new("plot.pdf")),
            Err(RenderError::UnsupportedFormat(ref ext)) if ext == "pdf"
        ));
        assert!(OutputFormat::from_path(Path::new("plot")).is_err());
    }

    #[test]
    fn unsupported_format_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.pdf");
        let mut collection = SeriesCollection::new("stitches");
        collection.push(NamedSeries::new("flat", vec![2.0, 9.0, 5.0]));

        let err = StaticChartRenderer::render_to_file(
            &collection,
            ChartVariant::Passes,
            &ChartStyle::default(),
            &path,
        )
        .unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedFormat(_)));
        assert!(!path.exists());
    }

    fn comparison() -> SeriesCollection {
        let mut collection = SeriesCollection::new("stitches");
        collection.push(NamedSeries::new("lb", vec![1.0, 2.0, 3.0, 4.0]));
        collection.push(NamedSeries::new("flat", vec![2.0, 9.0, 5.0, f64::NAN]));
        collection.push(NamedSeries::new("schoolbus", vec![3.0, 10.0, 4.0, 10.0]));
        collection
    }

    fn render(variant: ChartVariant, file_name: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(file_name);
        StaticChartRenderer::render_to_file(
            &comparison(),
            variant,
            &ChartStyle::for_variant(variant),
            &path,
        )
        .unwrap();
        (dir, path)
    }

    #[test]
    fn renders_histogram_svg() {
        let (_dir, path) = render(ChartVariant::Histogram, "histogram.svg");
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("stitches"));
        assert!(svg.contains("schoolbus"));
        assert!(svg.contains("&gt;10") || svg.contains(">10<"));
    }

    #[test]
    fn renders_line_chart_svgs() {
        for variant in [ChartVariant::Passes, ChartVariant::Xfers] {
            let (_dir, path) = render(variant, "lines.svg");
            let svg = std::fs::read_to_string(&path).unwrap();
            assert!(svg.contains("stitches"));
            assert!(svg.contains("flat"));
        }
    }

    #[test]
    fn renders_png_for_every_variant() {
        for variant in [ChartVariant::Passes, ChartVariant::Histogram, ChartVariant::Xfers] {
            let (_dir, path) = render(variant, "plot.png");
            let bytes = std::fs::read(&path).unwrap();
            assert!(bytes.starts_with(b"\x89PNG"));
        }
    }

    #[test]
    fn single_row_histogram_renders() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.svg");
        let mut collection = SeriesCollection::new("laces");
        collection.push(NamedSeries::new("lb", vec![2.0]));
        collection.push(NamedSeries::new("flat", vec![2.0]));

        StaticChartRenderer::render_to_file(
            &collection,
            ChartVariant::Histogram,
            &ChartStyle::for_variant(ChartVariant::Histogram),
            &path,
        )
        .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn bins_cover_two_through_eleven() {
        let values = [2.0, 2.5, 3.0, 10.0, 10.0, 11.0, 1.0, 12.0, f64::NAN, 6.0];
        let counts = bin_counts(&values);
        assert_eq!(counts.len(), 9);
        assert_eq!(counts, vec![2, 1, 0, 0, 1, 0, 0, 0, 3]);
    }

    #[test]
    fn clamped_outliers_land_in_last_bin() {
        let counts = bin_counts(&[10.0, 10.0, 4.0]);
        assert_eq!(counts[8], 2);
        assert_eq!(counts[2], 1);
    }

    #[test]
    fn histogram_tick_labels() {
        assert_eq!(bin_label(&SegmentValue::CenterOf(2)), "2");
        assert_eq!(bin_label(&SegmentValue::CenterOf(3)), "");
        assert_eq!(bin_label(&SegmentValue::Exact(8)), "8");
        assert_eq!(bin_label(&SegmentValue::CenterOf(10)), ">10");
        assert_eq!(bin_label(&SegmentValue::Last), "");
    }

    #[test]
    fn ranges_are_padded() {
        assert_eq!(padded_range(None), (0.0, 1.0));
        assert_eq!(padded_range(Some((3.0, 3.0))), (2.0, 4.0));
        let (lo, hi) = padded_range(Some((0.0, 10.0)));
        assert!(lo < 0.0 && hi > 10.0);
    }

    #[test]
    fn line_points_skip_missing_values() {
        let series = NamedSeries::new("gaps", vec![1.0, f64::NAN, 3.0]);
        assert_eq!(line_points(&series), vec![(0.0, 1.0), (2.0, 3.0)]);
    }
}

//! Chart Plotter Module
//! Draws a series collection in the interactive viewer using egui_plot.

use super::renderer::bin_counts;
use crate::config::{
    ChartStyle, ChartVariant, HISTOGRAM_CLAMP, HISTOGRAM_FIRST_BIN, HISTOGRAM_LAST_BIN,
};
use crate::data::{NamedSeries, SeriesCollection};
use egui::Color32;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

/// Vertical gap between stacked histogram panels.
const PANEL_SPACING: f32 = 4.0;

/// Creates the interactive charts.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn color((r, g, b): (u8, u8, u8)) -> Color32 {
        Color32::from_rgb(r, g, b)
    }

    /// Draw every series as a line against row position.
    pub fn draw_line_chart(
        ui: &mut egui::Ui,
        collection: &SeriesCollection,
        variant: ChartVariant,
        style: &ChartStyle,
    ) {
        let has_baseline = variant.baseline_label().is_some();

        Plot::new("comparison_lines")
            .legend(Legend::default())
            .x_axis_label(collection.axis_label.as_str())
            .y_axis_label(variant.value_label())
            .x_axis_formatter(|_mark, _range| String::new())
            .show(ui, |plot_ui| {
                for (idx, series) in collection.series.iter().enumerate() {
                    let width = if has_baseline && idx == 0 {
                        style.baseline_width
                    } else {
                        style.line_width
                    };

                    plot_ui.line(
                        Line::new(PlotPoints::from(Self::line_points(series)))
                            .color(Self::color(style.theme.color(idx)))
                            .width(width as f32)
                            .name(&series.label),
                    );
                }
            });
    }

    /// Draw one histogram panel per series, stacked top to bottom in display order.
    pub fn draw_histogram_grid(
        ui: &mut egui::Ui,
        collection: &SeriesCollection,
        variant: ChartVariant,
        style: &ChartStyle,
    ) {
        let panels = collection.display_order(variant);
        if panels.is_empty() {
            return;
        }

        let counts: Vec<Vec<u32>> = panels.iter().map(|s| bin_counts(&s.values)).collect();
        let y_max = counts.iter().flatten().copied().max().unwrap_or(0).max(1);
        let panel_height =
            (ui.available_height() / panels.len() as f32 - PANEL_SPACING).max(40.0);
        let bottom = panels.len() - 1;

        for (i, (series, counts)) in panels.iter().zip(counts.iter()).enumerate() {
            let is_bottom = i == bottom;
            let mut plot = Plot::new(format!("histogram_{}", i))
                .height(panel_height)
                .allow_zoom(false)
                .allow_drag(false)
                .allow_scroll(false)
                .show_axes([is_bottom, true])
                .y_axis_label(series.label.as_str())
                .y_axis_formatter(|_mark, _range| String::new())
                .x_axis_formatter(|mark, _range| Self::tick_label(mark.value))
                .include_x(f64::from(HISTOGRAM_FIRST_BIN))
                .include_x(f64::from(HISTOGRAM_LAST_BIN))
                .include_y(0.0)
                .include_y(f64::from(y_max));
            if is_bottom {
                plot = plot.x_axis_label(collection.axis_label.as_str());
            }

            let color = Self::color(style.histogram_color(i));
            plot.show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(Self::histogram_bars(counts))
                        .color(color)
                        .name(&series.label),
                );
            });
            ui.add_space(PANEL_SPACING);
        }
    }

    /// `[x, y]` pairs of one series, skipping missing values.
    pub fn line_points(series: &NamedSeries) -> Vec<[f64; 2]> {
        series
            .values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_finite())
            .map(|(i, v)| [i as f64, *v])
            .collect()
    }

    /// One bar per bin, spanning the bin's full width.
    pub fn histogram_bars(counts: &[u32]) -> Vec<Bar> {
        counts
            .iter()
            .enumerate()
            .map(|(k, count)| {
                let left = f64::from(HISTOGRAM_FIRST_BIN) + k as f64;
                Bar::new(left + 0.5, f64::from(*count)).width(1.0)
            })
            .collect()
    }

    /// Histogram x tick text: even bin edges, the clamp ceiling shown as ">10".
    pub fn tick_label(value: f64) -> String {
        let top = HISTOGRAM_CLAMP.1;
        if value.fract() != 0.0 || value < f64::from(HISTOGRAM_FIRST_BIN) || value > top {
            String::new()
        } else if value == top {
            format!(">{}", top)
        } else if value as u32 % 2 == 0 {
            format!("{}", value as u32)
        } else {
            String::new()
        }
    }
}

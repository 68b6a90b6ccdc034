//! Charts module - Static and interactive chart rendering

mod plotter;
mod renderer;

pub use plotter::ChartPlotter;
pub use renderer::{bin_counts, OutputFormat, RenderError, StaticChartRenderer};

//! Command Line Module
//! Argument definitions and the label/path pairing shared by every chart variant.

use crate::config::ChartVariant;
use crate::data::DatasetSpec;
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use thiserror::Error;

const PASSES_HELP: &str = "\
The label is used for the legend and the CSV is used to pull passes from.
Every CSV needs lower_bound and passes columns; the lower bound of the first
CSV is drawn as its own series.

Examples:
  passplot passes flat flat-results.csv schoolbus schoolbus-results.csv essential-stitch-collection
  passplot passes optimal all-laces-6.csv enum-6";

const HISTOGRAM_HELP: &str = "\
The label is used for the panel and the CSV is used to pull passes from.
Every CSV needs lower_bound and passes columns. Pass counts are clamped into
[0, 10] so outliers collect in the \">10\" bin.

Example:
  passplot histogram flat flat-results.csv schoolbus schoolbus-results.csv essential-stitch-collection";

const XFERS_HELP: &str = "\
The label is used for the legend and the CSV is used to pull transfers from.
Every CSV needs lower_bound and xfer_per_needle columns.

Example:
  passplot xfers flat flat-results.csv schoolbus schoolbus-results.csv essential-stitch-collection";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("expected at least one <label> <csv> pair followed by an axis label")]
    MissingDatasets,
    #[error("'{0}' is unpaired: give <label> <csv> pairs followed by exactly one axis label")]
    MissingAxisLabel(String),
}

#[derive(Debug, Parser)]
#[command(name = "passplot", about, version)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Line chart of pass counts against the lower bound.
    #[command(after_help = PASSES_HELP)]
    Passes(PlotArgs),
    /// Stacked histograms of pass counts.
    #[command(after_help = HISTOGRAM_HELP)]
    Histogram(PlotArgs),
    /// Line chart of transfers per needle.
    #[command(after_help = XFERS_HELP)]
    Xfers(PlotArgs),
}

impl Command {
    pub fn variant(&self) -> ChartVariant {
        match self {
            Command::Passes(_) => ChartVariant::Passes,
            Command::Histogram(_) => ChartVariant::Histogram,
            Command::Xfers(_) => ChartVariant::Xfers,
        }
    }

    pub fn args(&self) -> &PlotArgs {
        match self {
            Command::Passes(args) | Command::Histogram(args) | Command::Xfers(args) => args,
        }
    }

    /// Subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Passes(_) => "passes",
            Command::Histogram(_) => "histogram",
            Command::Xfers(_) => "xfers",
        }
    }
}

#[derive(Debug, Args)]
pub struct PlotArgs {
    /// <label> <csv> pairs followed by the axis label.
    #[arg(value_name = "INPUTS")]
    pub inputs: Vec<String>,

    /// Chart file to write (.svg or .png).
    #[arg(short, long, default_value = "plot.svg")]
    pub output: PathBuf,

    /// Skip writing the chart file.
    #[arg(long)]
    pub no_save: bool,

    /// JSON file overriding the chart style.
    #[arg(long, value_name = "FILE")]
    pub style: Option<PathBuf>,

    /// Show the chart in a window after rendering.
    #[arg(long)]
    pub show: bool,

    /// Open the written chart in the system viewer.
    #[arg(long, conflicts_with = "no_save")]
    pub open: bool,

    /// Print summary statistics for every series.
    #[arg(long)]
    pub summary: bool,

    /// Write the prepared series as JSON.
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,
}

/// Validated positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotRequest {
    pub datasets: Vec<DatasetSpec>,
    pub axis_label: String,
}

impl PlotRequest {
    /// Split `label csv [label csv ...] axis-label` into datasets and the axis label.
    pub fn from_inputs(inputs: &[String]) -> Result<Self, ArgumentError> {
        match inputs.len() {
            0 | 1 => Err(ArgumentError::MissingDatasets),
            n if n % 2 == 0 => Err(ArgumentError::MissingAxisLabel(inputs[n - 1].clone())),
            n => {
                let (pairs, axis_label) = inputs.split_at(n - 1);
                let datasets = pairs
                    .chunks_exact(2)
                    .map(|pair| DatasetSpec::new(pair[0].as_str(), pair[1].as_str()))
                    .collect();
                Ok(Self {
                    datasets,
                    axis_label: axis_label[0].clone(),
                })
            }
        }
    }
}

/// Print help for the tool, or for one subcommand, to stdout.
pub fn print_usage(subcommand: Option<&str>) -> std::io::Result<()> {
    let mut command = Cli::command();
    command.build();
    if let Some(name) = subcommand {
        if let Some(sub) = command.find_subcommand_mut(name) {
            return sub.print_help();
        }
    }
    command.print_help()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn pairs_and_axis_label() {
        let request = PlotRequest::from_inputs(&strings(&[
            "flat",
            "flat.csv",
            "schoolbus",
            "schoolbus.csv",
            "stitches",
        ]))
        .unwrap();

        assert_eq!(request.axis_label, "stitches");
        assert_eq!(
            request.datasets,
            vec![
                DatasetSpec::new("flat", "flat.csv"),
                DatasetSpec::new("schoolbus", "schoolbus.csv"),
            ]
        );
    }

    #[test]
    fn too_few_inputs() {
        assert_eq!(
            PlotRequest::from_inputs(&[]),
            Err(ArgumentError::MissingDatasets)
        );
        assert_eq!(
            PlotRequest::from_inputs(&strings(&["stitches"])),
            Err(ArgumentError::MissingDatasets)
        );
    }

    #[test]
    fn even_inputs_leave_no_axis_label() {
        assert_eq!(
            PlotRequest::from_inputs(&strings(&["flat", "flat.csv"])),
            Err(ArgumentError::MissingAxisLabel("flat.csv".to_string()))
        );
        assert_eq!(
            PlotRequest::from_inputs(&strings(&["a", "a.csv", "b", "b.csv"])),
            Err(ArgumentError::MissingAxisLabel("b.csv".to_string()))
        );
    }

    #[test]
    fn no_subcommand_is_a_help_request() {
        let cli = Cli::try_parse_from(["passplot"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn subcommand_without_inputs_parses() {
        let cli = Cli::try_parse_from(["passplot", "histogram"]).unwrap();
        let command = cli.command.unwrap();
        assert_eq!(command.variant(), ChartVariant::Histogram);
        assert!(command.args().inputs.is_empty());
    }

    #[test]
    fn options_mix_with_positionals() {
        let cli = Cli::try_parse_from([
            "passplot",
            "xfers",
            "flat",
            "flat.csv",
            "--summary",
            "cables",
            "-o",
            "xfers.png",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.log_level, "debug");
        let command = cli.command.unwrap();
        assert_eq!(command.name(), "xfers");
        let args = command.args();
        assert_eq!(args.inputs, strings(&["flat", "flat.csv", "cables"]));
        assert_eq!(args.output, PathBuf::from("xfers.png"));
        assert!(args.summary);
        assert!(!args.show);
    }

    #[test]
    fn open_conflicts_with_no_save() {
        let result = Cli::try_parse_from([
            "passplot", "passes", "a", "a.csv", "x", "--open", "--no-save",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn default_output_is_svg() {
        let cli = Cli::try_parse_from(["passplot", "passes", "a", "a.csv", "x"]).unwrap();
        assert_eq!(
            cli.command.unwrap().args().output,
            PathBuf::from("plot.svg")
        );
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}

//! passplot - Solver result comparison charts
//!
//! Command line entry point: parses arguments, builds the series collection
//! and hands it to the renderers.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use passplot::charts::{OutputFormat, StaticChartRenderer};
use passplot::cli::{self, ArgumentError, Cli, Command, PlotRequest};
use passplot::config::ChartStyle;
use passplot::data::DataProcessor;
use passplot::gui;
use passplot::stats::StatsCalculator;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    // No subcommand or no inputs is a request for help, not an error.
    let Some(command) = cli.command else {
        return print_usage(None);
    };
    if command.args().inputs.is_empty() {
        return print_usage(Some(command.name()));
    }

    match run(&command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("{err:?}");
            eprintln!("error: {err:#}");
            if err.is::<ArgumentError>() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn init_logging(level: &str) {
    env_logger::Builder::new()
        .parse_filters(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn print_usage(subcommand: Option<&str>) -> ExitCode {
    match cli::print_usage(subcommand) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: failed to print usage: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: &Command) -> Result<()> {
    let variant = command.variant();
    let args = command.args();
    let request = PlotRequest::from_inputs(&args.inputs)?;

    // Reject an unusable output path before any file is read.
    if !args.no_save {
        OutputFormat::from_path(&args.output)?;
    }

    let style = match &args.style {
        Some(path) => ChartStyle::from_file(path)?,
        None => ChartStyle::for_variant(variant),
    };

    log::info!(
        "plotting {} dataset(s) against '{}'",
        request.datasets.len(),
        request.axis_label
    );
    let collection =
        DataProcessor::build_collection(&request.datasets, &request.axis_label, variant)?;
    log::info!(
        "series in display order: {:?}",
        collection
            .display_order(variant)
            .iter()
            .map(|s| s.label.as_str())
            .collect::<Vec<_>>()
    );

    if args.summary {
        let stats = StatsCalculator::compute_all(&collection);
        print!("{}", StatsCalculator::format_table(&stats));
    }

    if let Some(path) = &args.export {
        let json = collection.to_json().context("serializing series")?;
        std::fs::write(path, json)
            .with_context(|| format!("writing series to {}", path.display()))?;
        log::info!("Series written to {}", path.display());
    }

    if !args.no_save {
        StaticChartRenderer::render_to_file(&collection, variant, &style, &args.output)?;
        if args.open {
            open::that(&args.output)
                .with_context(|| format!("opening {}", args.output.display()))?;
        }
    }

    if args.show {
        gui::run_viewer(collection, variant, style)
            .map_err(|err| anyhow!("chart window failed: {err}"))?;
    }

    Ok(())
}

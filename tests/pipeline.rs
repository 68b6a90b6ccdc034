use passplot::charts::bin_counts;
use passplot::cli::PlotRequest;
use passplot::config::ChartVariant;
use passplot::data::{DataProcessor, LoaderError, ProcessorError};
use passplot::stats::StatsCalculator;
use std::fs;
use std::path::Path;

fn write(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

fn inputs(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

#[test]
fn flat_versus_schoolbus_histogram() {
    let dir = tempfile::tempdir().unwrap();
    let flat = write(
        dir.path(),
        "flat.csv",
        "id,lower_bound,passes\n0,3,5\n1,1,2\n2,2,9\n",
    );
    let schoolbus = write(
        dir.path(),
        "schoolbus.csv",
        "id,lower_bound,passes\n0,2,15\n1,1,3\n2,3,4\n",
    );

    let request = PlotRequest::from_inputs(&inputs(&[
        "flat",
        &flat,
        "schoolbus",
        &schoolbus,
        "stitches",
    ]))
    .unwrap();
    let collection = DataProcessor::build_collection(
        &request.datasets,
        &request.axis_label,
        ChartVariant::Histogram,
    )
    .unwrap();

    assert_eq!(collection.labels(), vec!["lb", "flat", "schoolbus"]);
    assert_eq!(collection.get("lb").unwrap().values, vec![1.0, 2.0, 3.0]);
    assert_eq!(collection.get("flat").unwrap().values, vec![2.0, 9.0, 5.0]);
    assert_eq!(
        collection.get("schoolbus").unwrap().values,
        vec![3.0, 10.0, 4.0]
    );

    let drawn: Vec<&str> = collection
        .display_order(ChartVariant::Histogram)
        .iter()
        .map(|s| s.label.as_str())
        .collect();
    assert_eq!(drawn, vec!["schoolbus", "flat", "lb"]);

    // the clamped 15 is counted in the ">10" bin
    let counts = bin_counts(&collection.get("schoolbus").unwrap().values);
    assert_eq!(counts[8], 1);
    assert_eq!(counts.iter().sum::<u32>(), 3);
}

#[test]
fn transfers_summary_and_export() {
    let dir = tempfile::tempdir().unwrap();
    let cse = write(
        dir.path(),
        "cse.csv",
        "lower_bound,passes,xfer_per_needle\n4,6,2.0\n2,3,1.0\n3,5,1.5\n",
    );

    let request = PlotRequest::from_inputs(&inputs(&["cse", &cse, "cables"])).unwrap();
    let collection = DataProcessor::build_collection(
        &request.datasets,
        &request.axis_label,
        ChartVariant::Xfers,
    )
    .unwrap();
    assert_eq!(collection.labels(), vec!["cse"]);
    assert_eq!(collection.series[0].values, vec![1.0, 1.5, 2.0]);

    let stats = StatsCalculator::compute_all(&collection);
    assert_eq!(stats[0].count, 3);
    assert!((stats[0].mean - 1.5).abs() < 1e-12);

    let json = collection.to_json().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["axis_label"], "cables");
    assert_eq!(parsed["series"][0]["values"][2], 2.0);
}

#[test]
fn broken_second_file_fails_the_whole_build() {
    let dir = tempfile::tempdir().unwrap();
    let good = write(dir.path(), "good.csv", "lower_bound,passes\n1,2\n");
    let bad = write(dir.path(), "bad.csv", "bound,passes\n1,2\n");

    let request =
        PlotRequest::from_inputs(&inputs(&["good", &good, "bad", &bad, "laces"])).unwrap();
    let err = DataProcessor::build_collection(
        &request.datasets,
        &request.axis_label,
        ChartVariant::Passes,
    )
    .unwrap_err();

    match err {
        ProcessorError::Loader(LoaderError::Schema { path, column }) => {
            assert_eq!(column, "lower_bound");
            assert!(path.ends_with("bad.csv"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_file_is_reported_by_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nowhere.csv");
    let missing = missing.to_string_lossy().into_owned();

    let request = PlotRequest::from_inputs(&inputs(&["x", &missing, "laces"])).unwrap();
    let err = DataProcessor::build_collection(
        &request.datasets,
        &request.axis_label,
        ChartVariant::Passes,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        ProcessorError::Loader(LoaderError::FileAccess { .. })
    ));
    assert!(err.to_string().contains("nowhere.csv"));
}

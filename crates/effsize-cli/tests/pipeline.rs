//! Integration tests for the pipeline module.

use std::fs;

use effsize_cli::pipeline::{OptionOverrides, convert_values, load_options, load_session};
use effsize_model::{PlotScale, RatioKind};

#[test]
fn options_file_is_loaded_before_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("options.json");
    fs::write(
        &path,
        r#"{"ratio_kind": "hazard_ratio", "include_ci": true, "decimals": 2, "scale": "ratio"}"#,
    )
    .unwrap();

    let overrides = OptionOverrides {
        options_file: Some(path),
        include_p_value: true,
        decimals: Some(3),
        ..OptionOverrides::default()
    };
    let options = load_options(&overrides).unwrap();
    assert_eq!(options.ratio_kind, RatioKind::HazardRatio);
    assert!(options.include_ci);
    assert!(options.include_p_value);
    assert_eq!(options.decimals, 3);
    assert_eq!(options.scale, PlotScale::Ratio);
    assert_eq!(options.group_marker, "##");
}

#[test]
fn malformed_options_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("options.json");
    fs::write(&path, "{ not json").unwrap();
    let overrides = OptionOverrides {
        options_file: Some(path),
        ..OptionOverrides::default()
    };
    let error = load_options(&overrides).unwrap_err();
    assert!(format!("{error:#}").contains("load options from"));
}

#[test]
fn csv_file_runs_through_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("outcomes.csv");
    fs::write(
        &path,
        "Outcome,OR,Lower CI,Upper CI\n\
         ## Cardiac,,,\n\
         MI,0.8,0.6,1.1\n\
         Stroke,1.5,1.1,2.0\n\
         ,1.2,,\n",
    )
    .unwrap();

    let overrides = OptionOverrides {
        include_ci: true,
        group_headers: true,
        ..OptionOverrides::default()
    };
    let session = load_session(&path, load_options(&overrides).unwrap()).unwrap();
    assert_eq!(session.table().len(), 4);

    let calculation = session.recalculate();
    assert_eq!(calculation.records.len(), 3);
    let stroke = &calculation.records[2];
    assert_eq!(stroke.outcome_label(), "Stroke");
    assert!((stroke.effect_size().unwrap() - 0.2235).abs() < 1e-4);
    assert_eq!(calculation.plot.rows, 3);
    assert_eq!(calculation.plot.labels[1].text, "    MI");
}

#[test]
fn missing_input_reports_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.csv");
    let error = load_session(&path, Default::default()).unwrap_err();
    assert!(format!("{error:#}").contains("absent.csv"));
}

#[test]
fn convert_keeps_order_and_marks_invalid() {
    let values: Vec<String> = ["1", "-2", "0", "x"].iter().map(ToString::to_string).collect();
    let converted = convert_values(&values, false);
    assert_eq!(converted.len(), 4);
    assert_eq!(converted[0].output, Some(0.0));
    assert!((converted[1].output.unwrap() + 0.3822).abs() < 1e-4);
    assert!(converted[2].output.unwrap().is_infinite());
    assert_eq!(converted[3].output, None);
}

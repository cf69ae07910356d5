//! Rendering of computed results in every table format.

use effsize_core::{OutcomeRecord, OutcomeTable};
use effsize_model::{CalculatorOptions, RatioKind, RawRow};
use effsize_report::{ResultTable, TableFormat, render_csv, render_html, render_markdown};

fn options() -> CalculatorOptions {
    CalculatorOptions::default()
        .with_ci(true)
        .with_p_value(true)
        .with_group_headers(true)
}

fn records(options: &CalculatorOptions) -> Vec<OutcomeRecord> {
    let mut table = OutcomeTable::new(options);
    table.add_or_replace_rows(vec![
        RawRow::new("## Cardiac", None::<f64>),
        RawRow::new("MI", 0.8).with_ci(0.6, 1.1).with_p_value(0.00001),
        RawRow::new("Stroke", 1.5).with_ci(1.1, 2.0).with_p_value(0.01),
        RawRow::new("", 2.0),
        RawRow::new("Renal failure", "abc"),
    ]);
    table.compute_results()
}

#[test]
fn markdown_results() {
    let options = options();
    let table = ResultTable::from_records(&records(&options), &options);
    let markdown = render_markdown(&table);
    insta::assert_snapshot!("markdown_results", markdown);
}

#[test]
fn ratio_kind_names_the_columns() {
    let options = options().with_ratio_kind(RatioKind::HazardRatio);
    let table = ResultTable::from_records(&records(&options), &options);
    assert_eq!(table.columns[1], "Hazard Ratio");
    assert_eq!(table.columns[2], "Lower CI (HR)");
    assert_eq!(table.columns[3], "Upper CI (HR)");
}

#[test]
fn disabled_features_drop_their_columns() {
    let options = CalculatorOptions::default();
    let table = ResultTable::from_records(&records(&options), &options);
    assert_eq!(table.columns, vec!["Outcome", "Odds Ratio", "Effect Size"]);
    // Without group headers the marker row is an ordinary outcome.
    assert_eq!(table.rows[0].label, "## Cardiac");
    assert!(!table.rows[0].header);
    assert_eq!(table.rows.len(), 4);
}

#[test]
fn decimals_control_display_precision() {
    let options = options().with_decimals(2);
    let table = ResultTable::from_records(&records(&options), &options);
    let stroke = &table.rows[2];
    assert_eq!(stroke.label, "Stroke");
    assert_eq!(stroke.values[0].as_deref(), Some("1.50"));
    assert_eq!(stroke.values[3].as_deref(), Some("0.22"));
    let mi = &table.rows[1];
    assert_eq!(mi.values[6].as_deref(), Some("<0.01"));
}

#[test]
fn csv_output_has_one_line_per_row() {
    let options = options();
    let table = ResultTable::from_records(&records(&options), &options);
    let csv = render_csv(&table).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(
        lines[0],
        "Outcome,Odds Ratio,Lower CI (OR),Upper CI (OR),Effect Size,Lower CI (ES),Upper CI (ES),P-Value"
    );
    assert_eq!(lines[1], "Cardiac,,,,,,,");
    assert_eq!(
        lines[3],
        "Stroke,1.5000,1.1000,2.0000,0.2235,0.0525,0.3822,0.0100"
    );
    assert_eq!(lines[4], "Renal failure,,,,,,,");
}

#[test]
fn html_output_marks_groups_and_numbers() {
    let options = options();
    let table = ResultTable::from_records(&records(&options), &options);
    let html = render_html(&table).unwrap();
    assert!(html.contains("<tr class=\"group\">"));
    assert!(html.contains("<th colspan=\"8\" scope=\"rowgroup\">Cardiac</th>"));
    assert!(html.contains("<td class=\"num\">-0.1230</td>"));
    assert!(html.contains("<td class=\"num\">&lt;0.0001</td>"));
    assert!(html.contains("<td class=\"missing\"></td>"));
}

#[test]
fn json_output_keeps_full_precision() {
    let options = options();
    let json = TableFormat::Json.render(&records(&options), &options).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let rows = value.as_array().unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0]["outcome_label"], "Cardiac");
    assert_eq!(rows[0]["header"], true);
    assert_eq!(rows[1]["header"], false);
    let stroke = &rows[2];
    assert_eq!(stroke["outcome_label"], "Stroke");
    let effect = stroke["effect_size"].as_f64().unwrap();
    assert!((effect - 1.5f64.ln() * 3f64.sqrt() / std::f64::consts::PI).abs() < 1e-12);
    assert!(rows[3]["ratio"].is_null());
    assert!(rows[3]["effect_size"].is_null());
}

#[test]
fn json_header_with_values_is_still_a_header() {
    let options = options();
    let mut table = OutcomeTable::new(&options);
    table.add_or_replace_rows(vec![
        RawRow::new("## Neuro", 5.0).with_ci(4.0, 6.0),
        RawRow::new("Seizure", 1.2),
    ]);
    let json = TableFormat::Json.render(&table.compute_results(), &options).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let header = &value[0];
    assert_eq!(header["outcome_label"], "Neuro");
    assert_eq!(header["header"], true);
    for field in ["ratio", "lower_ci_ratio", "upper_ci_ratio", "effect_size", "p_value"] {
        assert!(header[field].is_null(), "{field} should be null");
    }
    assert_eq!(value[1]["outcome_label"], "Seizure");
    assert_eq!(value[1]["ratio"], 1.2);
}

#[test]
fn plain_output_lists_every_outcome() {
    let options = options();
    let plain = TableFormat::Plain.render(&records(&options), &options).unwrap();
    for needle in ["Outcome", "Cardiac", "MI", "Stroke", "Renal", "0.2235"] {
        assert!(plain.contains(needle), "missing {needle}");
    }
}

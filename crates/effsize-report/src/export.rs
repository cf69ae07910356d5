//! CSV and JSON exports.

use anyhow::{Context, Result};
use effsize_core::{ForestPlot, OutcomeRecord};
use effsize_model::CalculatorOptions;
use serde::Serialize;

use crate::table::ResultTable;

/// Render the formatted table as CSV. Missing values are empty fields.
pub fn render_csv(table: &ResultTable) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        let mut record = Vec::with_capacity(row.values.len() + 1);
        record.push(row.label.as_str());
        record.extend(row.values.iter().map(|v| v.as_deref().unwrap_or("")));
        writer.write_record(&record)?;
    }
    let bytes = writer.into_inner().context("flush csv output")?;
    String::from_utf8(bytes).context("csv output is not UTF-8")
}

/// One exported row. Group headers carry `header: true`, the marker-stripped
/// label and no values.
#[derive(Debug, Serialize)]
struct JsonRow<'a> {
    outcome_label: &'a str,
    header: bool,
    ratio: Option<f64>,
    lower_ci_ratio: Option<f64>,
    upper_ci_ratio: Option<f64>,
    p_value: Option<f64>,
    effect_size: Option<f64>,
    lower_ci_effect: Option<f64>,
    upper_ci_effect: Option<f64>,
}

impl<'a> JsonRow<'a> {
    fn from_record(record: &'a OutcomeRecord, options: &CalculatorOptions) -> Self {
        let label = record.outcome_label();
        if options.is_group_header(label) {
            return Self {
                outcome_label: options.header_text(label),
                header: true,
                ratio: None,
                lower_ci_ratio: None,
                upper_ci_ratio: None,
                p_value: None,
                effect_size: None,
                lower_ci_effect: None,
                upper_ci_effect: None,
            };
        }
        Self {
            outcome_label: label.trim(),
            header: false,
            ratio: finite(record.ratio()),
            lower_ci_ratio: finite(record.lower_ci_ratio()),
            upper_ci_ratio: finite(record.upper_ci_ratio()),
            p_value: finite(record.p_value()),
            effect_size: finite(record.effect_size()),
            lower_ci_effect: finite(record.lower_ci_effect()),
            upper_ci_effect: finite(record.upper_ci_effect()),
        }
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Render records as pretty JSON with unrounded values; missing is `null`.
pub fn render_json(records: &[OutcomeRecord], options: &CalculatorOptions) -> Result<String> {
    let rows: Vec<JsonRow<'_>> = records
        .iter()
        .map(|record| JsonRow::from_record(record, options))
        .collect();
    serde_json::to_string_pretty(&rows).context("serialize results")
}

/// Dump a plot layout as pretty JSON for an external renderer.
pub fn render_plot_json(plot: &ForestPlot) -> Result<String> {
    serde_json::to_string_pretty(plot).context("serialize plot layout")
}

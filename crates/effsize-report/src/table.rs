//! Display model for result tables.

use std::str::FromStr;

use anyhow::{Result, anyhow};
use effsize_core::OutcomeRecord;
use effsize_model::CalculatorOptions;

use crate::common::{format_number, format_p_value};
use crate::export::{render_csv, render_json};
use crate::html::render_html;
use crate::text::{render_markdown, render_plain};

/// One formatted row. `values` excludes the label column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub label: String,
    pub values: Vec<Option<String>>,
    /// Section header row; rendered bold with blank values.
    pub header: bool,
}

/// Results formatted at display precision, ready for any renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<ResultRow>,
}

impl ResultTable {
    pub fn from_records(records: &[OutcomeRecord], options: &CalculatorOptions) -> Self {
        let decimals = options.display_decimals();
        let kind = options.ratio_kind;
        let mut columns = vec!["Outcome".to_string(), kind.label().to_string()];
        if options.include_ci {
            columns.push(format!("Lower CI ({})", kind.abbreviation()));
            columns.push(format!("Upper CI ({})", kind.abbreviation()));
        }
        columns.push("Effect Size".to_string());
        if options.include_ci {
            columns.push("Lower CI (ES)".to_string());
            columns.push("Upper CI (ES)".to_string());
        }
        if options.include_p_value {
            columns.push("P-Value".to_string());
        }
        let value_count = columns.len() - 1;

        let rows = records
            .iter()
            .map(|record| {
                let label = record.outcome_label();
                if options.is_group_header(label) {
                    return ResultRow {
                        label: options.header_text(label).to_string(),
                        values: vec![None; value_count],
                        header: true,
                    };
                }
                let mut values = vec![format_number(record.ratio(), decimals)];
                if options.include_ci {
                    values.push(format_number(record.lower_ci_ratio(), decimals));
                    values.push(format_number(record.upper_ci_ratio(), decimals));
                }
                values.push(format_number(record.effect_size(), decimals));
                if options.include_ci {
                    values.push(format_number(record.lower_ci_effect(), decimals));
                    values.push(format_number(record.upper_ci_effect(), decimals));
                }
                if options.include_p_value {
                    values.push(format_p_value(record.p_value(), decimals));
                }
                ResultRow {
                    label: label.trim().to_string(),
                    values,
                    header: false,
                }
            })
            .collect();

        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Output format for result tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    #[default]
    Plain,
    Markdown,
    Html,
    Csv,
    Json,
}

impl TableFormat {
    /// Render records in this format.
    ///
    /// JSON carries the unrounded values; every other format is rounded to
    /// the configured precision.
    pub fn render(self, records: &[OutcomeRecord], options: &CalculatorOptions) -> Result<String> {
        let table = || ResultTable::from_records(records, options);
        match self {
            Self::Plain => Ok(render_plain(&table())),
            Self::Markdown => Ok(render_markdown(&table())),
            Self::Html => render_html(&table()),
            Self::Csv => render_csv(&table()),
            Self::Json => render_json(records, options),
        }
    }
}

impl FromStr for TableFormat {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "plain" | "text" => Ok(Self::Plain),
            "markdown" | "md" => Ok(Self::Markdown),
            "html" => Ok(Self::Html),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(anyhow!("unknown table format '{other}'")),
        }
    }
}

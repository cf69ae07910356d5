//! CSV reading with header aliasing.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use ::csv::{ReaderBuilder, StringRecord, Trim};
use effsize_model::{RawCell, RawRow};
use tracing::{debug, warn};

use crate::error::{IngestError, Result};
use crate::file::{check_file_size, open_error, validate_encoding};

/// Logical input columns an outcome file may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputColumn {
    Label,
    Ratio,
    LowerCi,
    UpperCi,
    PValue,
}

impl InputColumn {
    pub fn name(self) -> &'static str {
        match self {
            Self::Label => "outcome",
            Self::Ratio => "ratio",
            Self::LowerCi => "lower_ci",
            Self::UpperCi => "upper_ci",
            Self::PValue => "p_value",
        }
    }
}

/// Normalizes a header for matching: lowercase ASCII alphanumerics only.
pub fn normalize_header(value: &str) -> String {
    value
        .trim_start_matches('\u{feff}')
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Maps a header to the column it denotes, if any.
pub fn classify_header(value: &str) -> Option<InputColumn> {
    let column = match normalize_header(value).as_str() {
        "outcome" | "outcomes" | "outcomelabel" | "label" | "name" => InputColumn::Label,
        "ratio" | "rr" | "or" | "hr" | "riskratio" | "oddsratio" | "hazardratio" => {
            InputColumn::Ratio
        }
        "lowerci" | "lower" | "lcl" | "cilower" | "lowerciratio" | "lower95ci" => {
            InputColumn::LowerCi
        }
        "upperci" | "upper" | "ucl" | "ciupper" | "upperciratio" | "upper95ci" => {
            InputColumn::UpperCi
        }
        "pvalue" | "p" | "pval" => InputColumn::PValue,
        _ => return None,
    };
    Some(column)
}

/// Header positions resolved from a CSV header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub label: usize,
    pub ratio: Option<usize>,
    pub lower_ci: Option<usize>,
    pub upper_ci: Option<usize>,
    pub p_value: Option<usize>,
}

impl ColumnMap {
    /// Resolve column positions. The first header matching a column wins.
    pub fn from_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let headers: Vec<&str> = headers.into_iter().collect();
        let mut label = None;
        let mut map = Self::default();
        for (index, header) in headers.iter().enumerate() {
            let Some(column) = classify_header(header) else {
                debug!(header = %header, "ignoring unrecognized column");
                continue;
            };
            let slot = match column {
                InputColumn::Label => &mut label,
                InputColumn::Ratio => &mut map.ratio,
                InputColumn::LowerCi => &mut map.lower_ci,
                InputColumn::UpperCi => &mut map.upper_ci,
                InputColumn::PValue => &mut map.p_value,
            };
            if slot.is_some() {
                warn!(header = %header, column = column.name(), "duplicate column ignored");
                continue;
            }
            *slot = Some(index);
        }
        map.label = label.ok_or_else(|| IngestError::MissingColumn {
            column: InputColumn::Label.name(),
            headers: headers.join(", "),
        })?;
        Ok(map)
    }

    fn row(&self, record: &StringRecord) -> RawRow {
        let cell = |index: Option<usize>| {
            index
                .and_then(|i| record.get(i))
                .map_or(RawCell::Missing, RawCell::parse)
        };
        RawRow {
            label: record.get(self.label).unwrap_or_default().to_string(),
            ratio: cell(self.ratio),
            lower_ci: cell(self.lower_ci),
            upper_ci: cell(self.upper_ci),
            p_value: cell(self.p_value),
        }
    }
}

/// Parse outcome rows from any CSV source with a header row.
pub fn parse_csv_rows<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(reader);
    let headers = reader.headers()?.clone();
    let columns = ColumnMap::from_headers(headers.iter())?;
    if columns.ratio.is_none() {
        warn!("no ratio column found; every effect size will be missing");
    }
    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(columns.row(&record?));
    }
    debug!(rows = rows.len(), "parsed CSV rows");
    Ok(rows)
}

/// Read outcome rows from a CSV file.
pub fn read_csv_rows(path: &Path) -> Result<Vec<RawRow>> {
    check_file_size(path)?;
    validate_encoding(path)?;
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    parse_csv_rows(file)
}

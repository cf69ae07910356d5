//! JSON row reading.

use std::fs;
use std::path::Path;

use effsize_model::RawRow;
use tracing::debug;

use crate::error::Result;
use crate::file::{check_file_size, open_error};

/// Parse a JSON array of row objects.
///
/// Keys are `label`, `ratio`, `lower_ci`, `upper_ci` and `p_value`; values
/// may be numbers, strings or null. Absent keys become missing cells.
pub fn parse_json_rows(contents: &str) -> Result<Vec<RawRow>> {
    let rows: Vec<RawRow> = serde_json::from_str(contents)?;
    debug!(rows = rows.len(), "parsed JSON rows");
    Ok(rows)
}

/// Read outcome rows from a JSON file.
pub fn read_json_rows(path: &Path) -> Result<Vec<RawRow>> {
    check_file_size(path)?;
    let contents = fs::read_to_string(path).map_err(|e| open_error(path, e))?;
    parse_json_rows(contents.trim_start_matches('\u{feff}'))
}

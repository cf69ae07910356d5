//! Outcome row ingestion.
//!
//! Reads the rows an editing widget would hand over, from CSV or JSON files.
//! Cells are kept as [`RawCell`](effsize_model::RawCell) values; numeric
//! coercion never fails here, only structural problems (unreadable file,
//! malformed CSV/JSON, no label column) are reported.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use effsize_ingest::read_rows;
//!
//! let rows = read_rows(Path::new("outcomes.csv"))?;
//! ```

mod csv;
mod error;
mod file;
mod json;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use self::csv::{
    ColumnMap, InputColumn, classify_header, normalize_header, parse_csv_rows, read_csv_rows,
};

// === JSON Reading ===
pub use json::{parse_json_rows, read_json_rows};

// === File Dispatch ===
pub use file::{InputFormat, MAX_INPUT_FILE_SIZE, check_file_size, read_rows};

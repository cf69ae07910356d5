//! Input file checks and format dispatch.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use effsize_model::RawRow;
use tracing::info;

use crate::csv::read_csv_rows;
use crate::error::{IngestError, Result};
use crate::json::read_json_rows;

/// Maximum input file size (16 MB).
pub const MAX_INPUT_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Supported input file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    /// Detect the format from the file extension; anything but `.json` is CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}

/// Read outcome rows from a CSV or JSON file.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>> {
    let format = InputFormat::from_path(path);
    let rows = match format {
        InputFormat::Csv => read_csv_rows(path)?,
        InputFormat::Json => read_json_rows(path)?,
    };
    info!(path = %path.display(), ?format, rows = rows.len(), "loaded input rows");
    Ok(rows)
}

pub(crate) fn open_error(path: &Path, error: std::io::Error) -> IngestError {
    if error.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: error,
        }
    }
}

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;
    if metadata.len() > MAX_INPUT_FILE_SIZE {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size: MAX_INPUT_FILE_SIZE,
        });
    }
    Ok(())
}

/// Reject UTF-16 input by its byte order mark.
pub(crate) fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }
    Ok(())
}

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EffsizeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid options file {path}: {source}")]
    OptionsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unknown ratio kind '{0}' (expected rr, or, hr)")]
    UnknownRatioKind(String),
    #[error("unknown plot scale '{0}' (expected effect or ratio)")]
    UnknownScale(String),
}

pub type Result<T> = std::result::Result<T, EffsizeError>;

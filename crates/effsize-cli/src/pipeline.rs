//! Input handling shared by the CLI commands.
//!
//! Stages:
//! 1. **Options**: defaults, then an optional JSON file, then flags
//! 2. **Ingest**: read raw rows from a CSV or JSON file into a [`Session`]
//! 3. **Calculate**: [`Session::recalculate`] produces records and the plot
//!
//! Rendering lives in `effsize-report`; this module only wires it up.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info_span, trace};

use effsize_core::{Session, effect_size, effect_to_ratio};
use effsize_ingest::read_rows;
use effsize_model::{CalculatorOptions, PlotScale, RatioKind, RawCell};

use crate::logging::redact_value;

/// Option values given on the command line.
///
/// Switches only ever turn a feature on; a feature enabled in the options
/// file stays enabled when its flag is absent.
#[derive(Debug, Clone, Default)]
pub struct OptionOverrides {
    pub options_file: Option<PathBuf>,
    pub ratio_kind: Option<RatioKind>,
    pub include_ci: bool,
    pub include_p_value: bool,
    pub group_headers: bool,
    pub group_marker: Option<String>,
    pub decimals: Option<usize>,
    pub scale: Option<PlotScale>,
    pub axis_pad_percent: Option<f64>,
}

/// Resolve calculator options from defaults, the options file and flags.
pub fn load_options(overrides: &OptionOverrides) -> Result<CalculatorOptions> {
    let mut options = match &overrides.options_file {
        Some(path) => CalculatorOptions::from_json_file(path)
            .with_context(|| format!("load options from {}", path.display()))?,
        None => CalculatorOptions::default(),
    };
    if let Some(kind) = overrides.ratio_kind {
        options.ratio_kind = kind;
    }
    options.include_ci |= overrides.include_ci;
    options.include_p_value |= overrides.include_p_value;
    options.group_headers |= overrides.group_headers;
    if let Some(marker) = &overrides.group_marker {
        options.group_marker.clone_from(marker);
    }
    if let Some(decimals) = overrides.decimals {
        options.decimals = decimals;
    }
    if let Some(scale) = overrides.scale {
        options.scale = scale;
    }
    if let Some(percent) = overrides.axis_pad_percent {
        options.axis_pad_percent = percent;
    }
    debug!(?options, "resolved calculator options");
    Ok(options)
}

/// Read an outcome file into a fresh session.
pub fn load_session(input: &Path, options: CalculatorOptions) -> Result<Session> {
    let span = info_span!("ingest", path = %input.display());
    let _guard = span.enter();
    let rows = read_rows(input).with_context(|| format!("read {}", input.display()))?;
    for (index, row) in rows.iter().enumerate() {
        trace!(
            row = index,
            label = redact_value(&row.label),
            ratio = ?row.ratio,
            "input row"
        );
    }
    let mut session = Session::new(options);
    session.add_or_replace_rows(rows);
    Ok(session)
}

/// One value from the `convert` command.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedValue {
    pub input: String,
    pub output: Option<f64>,
}

/// Convert raw command-line values; unreadable input converts to `None`.
pub fn convert_values(values: &[String], inverse: bool) -> Vec<ConvertedValue> {
    values
        .iter()
        .map(|value| {
            let number = RawCell::parse(value).as_number();
            let output = if inverse {
                number.map(effect_to_ratio)
            } else {
                number.map(effect_size)
            };
            ConvertedValue {
                input: value.trim().to_string(),
                output,
            }
        })
        .collect()
}

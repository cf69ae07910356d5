use std::path::PathBuf;

use effsize_core::AxisRange;
use effsize_model::PlotScale;

/// Outcome of the `table` command.
#[derive(Debug)]
pub struct TableRun {
    pub input: PathBuf,
    pub records: usize,
    pub rendered: String,
    /// File the table was written to; printed to stdout when `None`.
    pub output: Option<PathBuf>,
}

/// Outcome of the `plot` command.
#[derive(Debug)]
pub struct PlotRun {
    pub input: PathBuf,
    pub output: PathBuf,
    pub layout_json: Option<PathBuf>,
    pub scale: PlotScale,
    pub rows: usize,
    pub headers: usize,
    pub points: usize,
    pub error_bars: usize,
    pub x_range: Option<AxisRange>,
}

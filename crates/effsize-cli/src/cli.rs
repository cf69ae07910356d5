//! CLI argument definitions for the effect size calculator.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "effsize",
    version,
    about = "Effect size calculator - convert ratios to standardized effect sizes",
    long_about = "Convert risk, odds and hazard ratios to standardized effect sizes\n\
                  using Chinn's (2000) transformation.\n\n\
                  Renders result tables (plain, Markdown, HTML, CSV, JSON) and\n\
                  forest plots (SVG) from CSV or JSON outcome files."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow outcome labels to appear in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert ratios given on the command line.
    Convert(ConvertArgs),

    /// Compute effect sizes for an outcome file and print the result table.
    Table(TableArgs),

    /// Compute effect sizes for an outcome file and draw a forest plot.
    Plot(PlotArgs),
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Ratios to convert (effect sizes with --inverse).
    #[arg(value_name = "RATIO", required = true, allow_hyphen_values = true)]
    pub values: Vec<String>,

    /// Convert effect sizes back to ratios.
    #[arg(long = "inverse")]
    pub inverse: bool,

    /// Ratio kind used for the column header.
    #[arg(long = "kind", value_enum, default_value = "or")]
    pub kind: RatioKindArg,

    /// Decimal places in the output.
    #[arg(long = "decimals", value_name = "N", default_value_t = 4)]
    pub decimals: usize,
}

/// Options shared by every command that reads an outcome file.
#[derive(Args)]
pub struct CalculatorArgs {
    /// JSON file with calculator options; flags given here take precedence.
    #[arg(long = "options", value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Kind of ratio in the input.
    #[arg(long = "kind", value_enum)]
    pub kind: Option<RatioKindArg>,

    /// Read confidence interval bounds and derive their effect sizes.
    #[arg(long = "ci")]
    pub ci: bool,

    /// Carry p-values through to the results.
    #[arg(long = "p-value")]
    pub p_value: bool,

    /// Treat labels starting with the group marker as section headers.
    #[arg(long = "groups")]
    pub groups: bool,

    /// Prefix that marks a section header label.
    #[arg(long = "group-marker", value_name = "PREFIX")]
    pub group_marker: Option<String>,

    /// Decimal places in formatted output.
    #[arg(long = "decimals", value_name = "N")]
    pub decimals: Option<usize>,
}

#[derive(Parser)]
pub struct TableArgs {
    /// Outcome file (.csv or .json).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[command(flatten)]
    pub calculator: CalculatorArgs,

    /// Table output format.
    #[arg(long = "format", value_enum, default_value = "plain")]
    pub format: TableFormatArg,

    /// Write the table to a file instead of stdout.
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct PlotArgs {
    /// Outcome file (.csv or .json).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// SVG file to write.
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: PathBuf,

    #[command(flatten)]
    pub calculator: CalculatorArgs,

    /// Plot effect sizes or the ratios themselves.
    #[arg(long = "scale", value_enum)]
    pub scale: Option<ScaleArg>,

    /// Horizontal axis padding as a percentage of the CI span.
    #[arg(long = "pad", value_name = "PERCENT")]
    pub pad: Option<f64>,

    /// Image width in pixels.
    #[arg(long = "width", default_value_t = 800)]
    pub width: u32,

    /// Image height in pixels (default: derived from the row count).
    #[arg(long = "height")]
    pub height: Option<u32>,

    /// Also write the plot layout as JSON.
    #[arg(long = "layout-json", value_name = "FILE")]
    pub layout_json: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RatioKindArg {
    /// Risk ratio.
    #[value(alias = "risk-ratio")]
    Rr,
    /// Odds ratio.
    #[value(alias = "odds-ratio")]
    Or,
    /// Hazard ratio.
    #[value(alias = "hazard-ratio")]
    Hr,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ScaleArg {
    Effect,
    Ratio,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TableFormatArg {
    Plain,
    #[value(alias = "md")]
    Markdown,
    Html,
    Csv,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

//! Configuration options for the calculator.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EffsizeError, Result};

/// Label prefix that marks a section header row.
pub const DEFAULT_GROUP_MARKER: &str = "##";

/// Largest decimal precision accepted at the presentation boundary.
pub const MAX_DECIMALS: usize = 10;

/// Which association measure the ratios represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioKind {
    RiskRatio,
    #[default]
    OddsRatio,
    HazardRatio,
}

impl RatioKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::RiskRatio => "Risk Ratio",
            Self::OddsRatio => "Odds Ratio",
            Self::HazardRatio => "Hazard Ratio",
        }
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::RiskRatio => "RR",
            Self::OddsRatio => "OR",
            Self::HazardRatio => "HR",
        }
    }
}

impl fmt::Display for RatioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RatioKind {
    type Err = EffsizeError;

    fn from_str(value: &str) -> Result<Self> {
        let key: String = value
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "rr" | "risk" | "riskratio" => Ok(Self::RiskRatio),
            "or" | "odds" | "oddsratio" => Ok(Self::OddsRatio),
            "hr" | "hazard" | "hazardratio" => Ok(Self::HazardRatio),
            _ => Err(EffsizeError::UnknownRatioKind(value.to_string())),
        }
    }
}

/// Which quantity is placed on the horizontal axis of the forest plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotScale {
    /// Effect sizes; the null effect sits at 0.
    #[default]
    EffectSize,
    /// Untransformed ratios; the null effect sits at 1.
    Ratio,
}

impl PlotScale {
    /// X position of the "no effect" reference line.
    pub fn null_effect(self) -> f64 {
        match self {
            Self::EffectSize => 0.0,
            Self::Ratio => 1.0,
        }
    }
}

impl FromStr for PlotScale {
    type Err = EffsizeError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "effect" | "effect_size" | "effect-size" | "es" => Ok(Self::EffectSize),
            "ratio" => Ok(Self::Ratio),
            _ => Err(EffsizeError::UnknownScale(value.to_string())),
        }
    }
}

/// Options controlling table computation, layout and presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorOptions {
    pub ratio_kind: RatioKind,

    /// Read lower/upper CI bounds and derive their effect sizes.
    pub include_ci: bool,

    /// Carry user-supplied p-values through to the results.
    pub include_p_value: bool,

    /// Treat labels starting with `group_marker` as section headers.
    pub group_headers: bool,

    pub group_marker: String,

    pub scale: PlotScale,

    /// Horizontal padding applied to each side of the CI span, in percent.
    pub axis_pad_percent: f64,

    /// Vertical padding beyond the first and last slot, in slot units.
    pub vertical_padding: f64,

    /// Decimal places used when formatting numbers for display.
    pub decimals: usize,

    /// Number of leading spaces for rows nested under a header.
    pub indent: usize,
}

impl Default for CalculatorOptions {
    fn default() -> Self {
        Self {
            ratio_kind: RatioKind::default(),
            include_ci: false,
            include_p_value: false,
            group_headers: false,
            group_marker: DEFAULT_GROUP_MARKER.to_string(),
            scale: PlotScale::default(),
            axis_pad_percent: 10.0,
            vertical_padding: 0.5,
            decimals: 4,
            indent: 4,
        }
    }
}

impl CalculatorOptions {
    /// Load options from a JSON file. Absent fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|source| EffsizeError::OptionsParse {
            path: path.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub fn with_ratio_kind(mut self, kind: RatioKind) -> Self {
        self.ratio_kind = kind;
        self
    }

    #[must_use]
    pub fn with_ci(mut self, enable: bool) -> Self {
        self.include_ci = enable;
        self
    }

    #[must_use]
    pub fn with_p_value(mut self, enable: bool) -> Self {
        self.include_p_value = enable;
        self
    }

    #[must_use]
    pub fn with_group_headers(mut self, enable: bool) -> Self {
        self.group_headers = enable;
        self
    }

    #[must_use]
    pub fn with_group_marker(mut self, marker: impl Into<String>) -> Self {
        self.group_marker = marker.into();
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: PlotScale) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn with_axis_pad_percent(mut self, percent: f64) -> Self {
        self.axis_pad_percent = percent;
        self
    }

    #[must_use]
    pub fn with_vertical_padding(mut self, padding: f64) -> Self {
        self.vertical_padding = padding;
        self
    }

    #[must_use]
    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    /// Decimal places clamped to the supported range.
    pub fn display_decimals(&self) -> usize {
        self.decimals.min(MAX_DECIMALS)
    }

    /// Whether `label` marks a section header under these options.
    pub fn is_group_header(&self, label: &str) -> bool {
        self.group_headers
            && !self.group_marker.is_empty()
            && label.trim_start().starts_with(self.group_marker.as_str())
    }

    /// Header text with the marker removed.
    pub fn header_text<'a>(&self, label: &'a str) -> &'a str {
        let trimmed = label.trim_start();
        trimmed
            .strip_prefix(self.group_marker.as_str())
            .unwrap_or(trimmed)
            .trim()
    }
}

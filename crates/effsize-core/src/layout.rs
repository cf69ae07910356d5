//! Forest plot layout.
//!
//! Turns ordered result records into drawing primitives and axis ranges.
//! No statistic is recomputed here; the layout only reads what the records
//! already carry, on the scale selected in the options.

use effsize_model::{CalculatorOptions, PlotScale};
use serde::Serialize;
use tracing::debug;

use crate::record::OutcomeRecord;

pub const EFFECT_SIZE_TITLE: &str = "Forest Plot of Effect Sizes";
pub const EFFECT_SIZE_AXIS_LABEL: &str = "Effect Size (Chinn 2000)";

/// Kind tag for a [`PlotPrimitive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Header,
    Point,
    ErrorBar,
}

/// One drawable element positioned on a row slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlotPrimitive {
    /// Section header; drawn as a bold label with no marker.
    Header { slot: usize, text: String },
    /// Point estimate.
    Point { slot: usize, x: f64 },
    /// Interval around `center`; `minus` and `plus` are never negative.
    ErrorBar {
        slot: usize,
        center: f64,
        minus: f64,
        plus: f64,
    },
}

impl PlotPrimitive {
    pub fn slot(&self) -> usize {
        match self {
            Self::Header { slot, .. } | Self::Point { slot, .. } | Self::ErrorBar { slot, .. } => {
                *slot
            }
        }
    }

    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Header { .. } => PrimitiveKind::Header,
            Self::Point { .. } => PrimitiveKind::Point,
            Self::ErrorBar { .. } => PrimitiveKind::ErrorBar,
        }
    }
}

/// Tick label shown beside a row slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowLabel {
    pub slot: usize,
    pub text: String,
    pub bold: bool,
}

/// Closed numeric interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// The same interval with `min <= max`.
    #[must_use]
    pub fn ordered(self) -> Self {
        Self::new(self.min.min(self.max), self.min.max(self.max))
    }
}

/// Complete, renderer-independent description of a forest plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForestPlot {
    pub title: String,
    pub x_label: String,
    pub scale: PlotScale,
    pub rows: usize,
    pub labels: Vec<RowLabel>,
    pub primitives: Vec<PlotPrimitive>,
    /// Explicit horizontal range; `None` leaves it to the renderer.
    pub x_range: Option<AxisRange>,
    /// Slot range including padding.
    pub y_range: AxisRange,
    /// Slot 0 is drawn at the top when set.
    pub y_inverted: bool,
    /// X position of the null-effect reference line.
    pub reference_x: f64,
}

impl ForestPlot {
    pub fn count(&self, kind: PrimitiveKind) -> usize {
        self.primitives.iter().filter(|p| p.kind() == kind).count()
    }

    /// All primitives on `slot`, in emission order.
    pub fn primitives_at(&self, slot: usize) -> impl Iterator<Item = &PlotPrimitive> {
        self.primitives.iter().filter(move |p| p.slot() == slot)
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}

/// Builds [`ForestPlot`] values from result records.
pub struct ForestPlotLayout;

impl ForestPlotLayout {
    pub fn build(records: &[OutcomeRecord], options: &CalculatorOptions) -> ForestPlot {
        let scale = options.scale;
        let indent = " ".repeat(options.indent);
        let mut labels = Vec::with_capacity(records.len());
        let mut primitives = Vec::new();
        let mut lower_bounds = Vec::new();
        let mut upper_bounds = Vec::new();
        let mut points = Vec::new();
        // Set by the first header and never cleared.
        let mut indent_mode = false;

        for (slot, record) in records.iter().enumerate() {
            let label = record.outcome_label();
            if options.is_group_header(label) {
                let text = options.header_text(label).to_string();
                labels.push(RowLabel {
                    slot,
                    text: text.clone(),
                    bold: true,
                });
                primitives.push(PlotPrimitive::Header { slot, text });
                indent_mode = true;
                continue;
            }

            let text = if indent_mode {
                format!("{indent}{}", label.trim())
            } else {
                label.trim().to_string()
            };
            labels.push(RowLabel {
                slot,
                text,
                bold: false,
            });

            let (point, bounds) = match scale {
                PlotScale::EffectSize => (record.effect_size_finite(), record.ci_effect_finite()),
                PlotScale::Ratio => (
                    record.ratio().filter(|v| v.is_finite()),
                    record.ci_ratio_finite(),
                ),
            };
            if let Some((lower, upper)) = bounds {
                lower_bounds.push(lower);
                upper_bounds.push(upper);
            }
            let Some(x) = point else {
                continue;
            };
            points.push(x);
            primitives.push(PlotPrimitive::Point { slot, x });
            if let Some((lower, upper)) = bounds {
                primitives.push(PlotPrimitive::ErrorBar {
                    slot,
                    center: x,
                    minus: (x - lower).max(0.0),
                    plus: (upper - x).max(0.0),
                });
            }
        }

        let x_range = padded_range(
            &lower_bounds,
            &upper_bounds,
            &points,
            options.axis_pad_percent,
        );
        let rows = records.len();
        let last_slot = rows.saturating_sub(1) as f64;
        let y_range = AxisRange::new(
            -options.vertical_padding,
            last_slot + options.vertical_padding,
        );
        debug!(
            rows,
            primitives = primitives.len(),
            explicit_x_range = x_range.is_some(),
            "forest plot layout built"
        );

        let (title, x_label) = match scale {
            PlotScale::EffectSize => (
                EFFECT_SIZE_TITLE.to_string(),
                EFFECT_SIZE_AXIS_LABEL.to_string(),
            ),
            PlotScale::Ratio => (
                format!("Forest Plot of {}s", options.ratio_kind.label()),
                options.ratio_kind.label().to_string(),
            ),
        };

        ForestPlot {
            title,
            x_label,
            scale,
            rows,
            labels,
            primitives,
            x_range,
            y_range,
            y_inverted: true,
            reference_x: scale.null_effect(),
        }
    }
}

/// `[min(lower), max(upper)]` widened by `pad_percent` of its span per side.
///
/// Inverted intervals (every lower bound above every upper bound) are
/// swapped first, and the interval is stretched to cover any point lying
/// outside its own CI, so the result always has `min <= max` and holds every
/// point.
fn padded_range(
    lower: &[f64],
    upper: &[f64],
    points: &[f64],
    pad_percent: f64,
) -> Option<AxisRange> {
    let min = lower.iter().copied().reduce(f64::min)?;
    let max = upper.iter().copied().reduce(f64::max)?;
    let range = points
        .iter()
        .fold(AxisRange::new(min, max).ordered(), |range, &x| {
            AxisRange::new(range.min.min(x), range.max.max(x))
        });
    let span = range.span();
    let fraction = pad_percent.max(0.0) / 100.0;
    let pad = if span > 0.0 { span * fraction } else { fraction };
    Some(AxisRange::new(range.min - pad, range.max + pad))
}

//! Numeric core of the effect size calculator.
//!
//! The pipeline is strictly one-directional and pure:
//! raw rows -> [`OutcomeTable::compute_results`] -> [`ForestPlotLayout::build`].
//! Nothing in this crate returns an error; degenerate input becomes missing
//! values that the presentation layer renders as blanks.

pub mod layout;
pub mod record;
pub mod session;
pub mod table;
pub mod transform;

pub use layout::{AxisRange, ForestPlot, ForestPlotLayout, PlotPrimitive, PrimitiveKind, RowLabel};
pub use record::OutcomeRecord;
pub use session::{Calculation, Session};
pub use table::OutcomeTable;
pub use transform::{CHINN_FACTOR, effect_size, effect_to_ratio, finite, transform};

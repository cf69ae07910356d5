//! Shared types for the effect size calculator.
//!
//! Everything here is plain data: raw input cells as they arrive from an
//! editing widget or a file, the calculator options, and the error type used
//! by the outer layers. The numeric core lives in `effsize-core`.

pub mod cell;
pub mod error;
pub mod options;

pub use cell::{RawCell, RawRow};
pub use error::{EffsizeError, Result};
pub use options::{CalculatorOptions, DEFAULT_GROUP_MARKER, MAX_DECIMALS, PlotScale, RatioKind};

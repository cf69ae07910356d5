//! CLI library components for the effect size calculator.

pub mod logging;
pub mod pipeline;
pub mod output;

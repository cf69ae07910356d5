//! Presentation boundary for the effect size calculator.
//!
//! This crate turns computed results into something a person or another tool
//! can read:
//!
//! - **Result tables**: plain text, Markdown, HTML, CSV and JSON
//! - **Forest plots**: SVG documents and JSON layout dumps
//!
//! Rounding to a fixed number of decimals happens here and nowhere else.

mod common;
mod export;
mod html;
mod svg;
mod table;
mod text;

// Re-export public types and functions
pub use common::{format_number, format_p_value};
pub use export::{render_csv, render_json, render_plot_json};
pub use html::render_html;
pub use svg::{SvgOptions, render_forest_svg, write_forest_svg};
pub use table::{ResultRow, ResultTable, TableFormat};
pub use text::{render_markdown, render_plain};

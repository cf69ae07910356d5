//! SVG forest plot rendering.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use tracing::info;

use effsize_core::{AxisRange, ForestPlot, PlotPrimitive};

use crate::common::write_text_element_with;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const MARGIN_TOP: f64 = 56.0;
const MARGIN_BOTTOM: f64 = 64.0;
const MARGIN_RIGHT: f64 = 32.0;
const ROW_HEIGHT: f64 = 28.0;
const CHAR_WIDTH: f64 = 7.0;
const POINT_SIZE: f64 = 8.0;
const CAP_HALF_HEIGHT: f64 = 5.0;
const TICK_TARGET: usize = 6;

/// Canvas options for SVG output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgOptions {
    pub width: u32,
    /// Fixed height; derived from the row count when `None`.
    pub height: Option<u32>,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: None,
        }
    }
}

/// Pixel geometry resolved for one plot.
struct Frame {
    width: f64,
    height: f64,
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
    x_domain: AxisRange,
    y_domain: AxisRange,
    y_inverted: bool,
}

impl Frame {
    fn new(plot: &ForestPlot, options: &SvgOptions) -> Self {
        let longest = plot
            .labels
            .iter()
            .map(|label| label.text.chars().count())
            .max()
            .unwrap_or(0);
        let width = f64::from(options.width.max(200));
        let left = (longest as f64 * CHAR_WIDTH + 24.0).clamp(96.0, width / 2.0);
        let height = options.height.map_or_else(
            || MARGIN_TOP + MARGIN_BOTTOM + ROW_HEIGHT * (plot.rows.max(1) as f64 + 1.0),
            f64::from,
        );
        Self {
            width,
            height,
            left,
            right: width - MARGIN_RIGHT,
            top: MARGIN_TOP,
            bottom: height - MARGIN_BOTTOM,
            x_domain: plot.x_range.unwrap_or_else(|| default_x_domain(plot)).ordered(),
            y_domain: plot.y_range,
            y_inverted: plot.y_inverted,
        }
    }

    fn x(&self, value: f64) -> f64 {
        let span = non_zero(self.x_domain.span());
        self.left + (value - self.x_domain.min) / span * (self.right - self.left)
    }

    fn y(&self, slot: f64) -> f64 {
        let span = non_zero(self.y_domain.span());
        let fraction = (slot - self.y_domain.min) / span;
        let fraction = if self.y_inverted { fraction } else { 1.0 - fraction };
        self.top + fraction * (self.bottom - self.top)
    }
}

fn non_zero(span: f64) -> f64 {
    if span > 0.0 && span.is_finite() { span } else { 1.0 }
}

/// Range used when the layout leaves the x axis to the renderer: every
/// point, bar end and the reference line, padded by 10%.
fn default_x_domain(plot: &ForestPlot) -> AxisRange {
    let mut min = plot.reference_x;
    let mut max = plot.reference_x;
    for primitive in &plot.primitives {
        let (low, high) = match primitive {
            PlotPrimitive::Point { x, .. } => (*x, *x),
            PlotPrimitive::ErrorBar {
                center,
                minus,
                plus,
                ..
            } => (center - minus, center + plus),
            PlotPrimitive::Header { .. } => continue,
        };
        min = min.min(low);
        max = max.max(high);
    }
    let span = max - min;
    let pad = if span > 0.0 { span * 0.1 } else { 1.0 };
    AxisRange::new(min - pad, max + pad)
}

/// Evenly spaced ticks at 1/2/5 multiples of a power of ten.
fn nice_ticks(range: AxisRange, target: usize) -> (Vec<f64>, usize) {
    let span = range.span();
    if !(span > 0.0 && span.is_finite()) {
        return (vec![range.min], 2);
    }
    let raw = span / target.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let multiple = if residual > 5.0 {
        10.0
    } else if residual > 2.0 {
        5.0
    } else if residual > 1.0 {
        2.0
    } else {
        1.0
    };
    let step = multiple * magnitude;
    let decimals = (-step.log10().floor()).max(0.0) as usize;
    let start = (range.min / step).ceil();
    let end = (range.max / step).floor();
    let ticks = (start as i64..=end as i64)
        .map(|i| {
            let value = i as f64 * step;
            if value.abs() < step * 1e-9 { 0.0 } else { value }
        })
        .collect();
    (ticks, decimals)
}

fn px(value: f64) -> String {
    format!("{value:.2}")
}

fn write_line<W: Write>(
    xml: &mut Writer<W>,
    (x1, y1): (f64, f64),
    (x2, y2): (f64, f64),
    class: &str,
) -> Result<()> {
    let mut line = BytesStart::new("line");
    line.push_attribute(("class", class));
    line.push_attribute(("x1", px(x1).as_str()));
    line.push_attribute(("y1", px(y1).as_str()));
    line.push_attribute(("x2", px(x2).as_str()));
    line.push_attribute(("y2", px(y2).as_str()));
    xml.write_event(Event::Empty(line))?;
    Ok(())
}

/// Render a forest plot layout as an SVG document.
pub fn render_forest_svg(plot: &ForestPlot, options: &SvgOptions) -> Result<String> {
    let mut buffer = Vec::new();
    write_svg(&mut buffer, plot, options)?;
    String::from_utf8(buffer).context("svg output is not UTF-8")
}

/// Write a forest plot layout to an SVG file, creating parent directories.
pub fn write_forest_svg(output_path: &Path, plot: &ForestPlot, options: &SvgOptions) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
    }
    let file =
        File::create(output_path).with_context(|| format!("create {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);
    write_svg(&mut writer, plot, options)?;
    writer
        .flush()
        .with_context(|| format!("write {}", output_path.display()))?;
    info!(path = %output_path.display(), rows = plot.rows, "forest plot written");
    Ok(())
}

fn write_svg<W: Write>(out: W, plot: &ForestPlot, options: &SvgOptions) -> Result<()> {
    let frame = Frame::new(plot, options);
    let mut xml = Writer::new_with_indent(out, b' ', 2);
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let width = px(frame.width);
    let height = px(frame.height);
    let view_box = format!("0 0 {width} {height}");
    let mut root = BytesStart::new("svg");
    root.push_attribute(("xmlns", SVG_NS));
    root.push_attribute(("width", width.as_str()));
    root.push_attribute(("height", height.as_str()));
    root.push_attribute(("viewBox", view_box.as_str()));
    root.push_attribute(("font-family", "sans-serif"));
    root.push_attribute(("font-size", "12"));
    xml.write_event(Event::Start(root))?;

    write_text_element_with(
        &mut xml,
        "style",
        &[],
        ".axis{stroke:#333;stroke-width:1}\
         .reference{stroke:#888;stroke-width:1;stroke-dasharray:4 3}\
         .bar{stroke:#1f4e79;stroke-width:1.5}\
         .point{fill:#1f4e79}",
    )?;

    let mut background = BytesStart::new("rect");
    background.push_attribute(("width", "100%"));
    background.push_attribute(("height", "100%"));
    background.push_attribute(("fill", "white"));
    xml.write_event(Event::Empty(background))?;

    let center_x = px(frame.width / 2.0);
    let title_y = px(MARGIN_TOP / 2.0);
    write_text_element_with(
        &mut xml,
        "text",
        &[
            ("class", "title"),
            ("x", center_x.as_str()),
            ("y", title_y.as_str()),
            ("text-anchor", "middle"),
            ("font-size", "16"),
            ("font-weight", "bold"),
        ],
        &plot.title,
    )?;

    // Horizontal axis with ticks.
    write_line(
        &mut xml,
        (frame.left, frame.bottom),
        (frame.right, frame.bottom),
        "axis",
    )?;
    let (ticks, decimals) = nice_ticks(frame.x_domain, TICK_TARGET);
    for tick in ticks {
        let x = frame.x(tick);
        write_line(
            &mut xml,
            (x, frame.bottom),
            (x, frame.bottom + 5.0),
            "axis",
        )?;
        let label = format!("{tick:.decimals$}");
        let label_x = px(x);
        let label_y = px(frame.bottom + 18.0);
        write_text_element_with(
            &mut xml,
            "text",
            &[
                ("class", "tick"),
                ("x", label_x.as_str()),
                ("y", label_y.as_str()),
                ("text-anchor", "middle"),
            ],
            &label,
        )?;
    }
    let x_label_x = px((frame.left + frame.right) / 2.0);
    let x_label_y = px(frame.height - MARGIN_BOTTOM / 4.0);
    write_text_element_with(
        &mut xml,
        "text",
        &[
            ("class", "axis-label"),
            ("x", x_label_x.as_str()),
            ("y", x_label_y.as_str()),
            ("text-anchor", "middle"),
        ],
        &plot.x_label,
    )?;

    // Null-effect reference line.
    if frame.x_domain.contains(plot.reference_x) {
        let x = frame.x(plot.reference_x);
        write_line(&mut xml, (x, frame.top), (x, frame.bottom), "reference")?;
    }

    // Row labels; headers bold, nested rows keep their leading spaces.
    let label_x = px(frame.left - 12.0);
    for label in &plot.labels {
        let y = px(frame.y(label.slot as f64));
        let mut attributes = vec![
            ("class", if label.bold { "header" } else { "row" }),
            ("x", label_x.as_str()),
            ("y", y.as_str()),
            ("text-anchor", "end"),
            ("dominant-baseline", "middle"),
            ("xml:space", "preserve"),
        ];
        if label.bold {
            attributes.push(("font-weight", "bold"));
        }
        write_text_element_with(&mut xml, "text", &attributes, &label.text)?;
    }

    for primitive in &plot.primitives {
        match primitive {
            PlotPrimitive::Header { .. } => {}
            PlotPrimitive::ErrorBar {
                slot,
                center,
                minus,
                plus,
            } => {
                let y = frame.y(*slot as f64);
                let low = frame.x(center - minus);
                let high = frame.x(center + plus);
                write_line(&mut xml, (low, y), (high, y), "bar")?;
                for x in [low, high] {
                    write_line(
                        &mut xml,
                        (x, y - CAP_HALF_HEIGHT),
                        (x, y + CAP_HALF_HEIGHT),
                        "bar",
                    )?;
                }
            }
            PlotPrimitive::Point { slot, x } => {
                let cx = frame.x(*x);
                let cy = frame.y(*slot as f64);
                let mut rect = BytesStart::new("rect");
                let rx = px(cx - POINT_SIZE / 2.0);
                let ry = px(cy - POINT_SIZE / 2.0);
                let size = px(POINT_SIZE);
                rect.push_attribute(("class", "point"));
                rect.push_attribute(("x", rx.as_str()));
                rect.push_attribute(("y", ry.as_str()));
                rect.push_attribute(("width", size.as_str()));
                rect.push_attribute(("height", size.as_str()));
                xml.write_event(Event::Empty(rect))?;
            }
        }
    }

    xml.write_event(Event::End(BytesEnd::new("svg")))?;
    Ok(())
}

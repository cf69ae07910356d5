use std::io::{self, Write};

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use effsize_cli::output::emit_table;
use effsize_cli::pipeline::ConvertedValue;
use effsize_model::{PlotScale, RatioKind};
use effsize_report::format_number;

use crate::types::{PlotRun, TableRun};

pub fn print_conversions(
    values: &[ConvertedValue],
    kind: RatioKind,
    inverse: bool,
    decimals: usize,
) -> io::Result<()> {
    let (from, to) = if inverse {
        ("Effect Size", kind.label())
    } else {
        (kind.label(), "Effect Size")
    };
    let mut table = Table::new();
    table.set_header(vec![header_cell(from), header_cell(to)]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for value in values {
        let output = match format_number(value.output, decimals) {
            Some(text) => Cell::new(text),
            None => dim_cell("-"),
        };
        table.add_row(vec![Cell::new(&value.input), output]);
    }
    let mut out = io::stdout().lock();
    writeln!(out, "{table}")?;
    out.flush()
}

pub fn print_table_run(run: &TableRun) -> io::Result<()> {
    emit_table(
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
        &run.input,
        run.records,
        &run.rendered,
        run.output.as_deref(),
    )
}

pub fn print_plot_summary(run: &PlotRun) -> io::Result<()> {
    if run.rows == 0 {
        eprintln!(
            "No outcomes with a label found in {}; wrote an empty plot.",
            run.input.display()
        );
    }
    let mut out = io::stdout().lock();
    writeln!(out, "Plot: {}", run.output.display())?;
    if let Some(path) = &run.layout_json {
        writeln!(out, "Layout: {}", path.display())?;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Item"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let scale = match run.scale {
        PlotScale::EffectSize => "effect size",
        PlotScale::Ratio => "ratio",
    };
    let x_range = run.x_range.map_or_else(
        || dim_cell("auto"),
        |range| Cell::new(format!("{:.3} to {:.3}", range.min, range.max)),
    );
    table.add_row(vec![Cell::new("Scale"), Cell::new(scale)]);
    table.add_row(vec![Cell::new("Rows"), Cell::new(run.rows)]);
    table.add_row(vec![Cell::new("Headers"), count_cell(run.headers)]);
    table.add_row(vec![Cell::new("Points"), count_cell(run.points)]);
    table.add_row(vec![Cell::new("Error bars"), count_cell(run.error_bars)]);
    table.add_row(vec![Cell::new("X range"), x_range]);
    writeln!(out, "{table}")?;
    out.flush()
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

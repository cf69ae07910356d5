//! Plain-text and Markdown table rendering.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::table::ResultTable;

/// Render a terminal table.
pub fn render_plain(table: &ResultTable) -> String {
    let mut out = Table::new();
    out.set_header(table.columns.iter().map(|title| header_cell(title)));
    out.load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    for index in 1..table.columns.len() {
        if let Some(column) = out.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    for row in &table.rows {
        let mut cells = Vec::with_capacity(row.values.len() + 1);
        if row.header {
            cells.push(
                Cell::new(&row.label)
                    .fg(Color::Blue)
                    .add_attribute(Attribute::Bold),
            );
        } else {
            cells.push(Cell::new(&row.label));
        }
        for value in &row.values {
            cells.push(match value {
                Some(text) => Cell::new(text),
                None if row.header => Cell::new(""),
                None => Cell::new("-").fg(Color::DarkGrey),
            });
        }
        out.add_row(cells);
    }
    out.to_string()
}

/// Render a GitHub-flavored Markdown table.
pub fn render_markdown(table: &ResultTable) -> String {
    let mut lines = Vec::with_capacity(table.rows.len() + 2);
    let header: Vec<String> = table.columns.iter().map(|c| escape_markdown(c)).collect();
    lines.push(markdown_line(&header));
    let separator: Vec<String> = (0..table.columns.len())
        .map(|index| if index == 0 { "---" } else { "---:" }.to_string())
        .collect();
    lines.push(markdown_line(&separator));
    for row in &table.rows {
        let label = if row.header {
            format!("**{}**", escape_markdown(&row.label))
        } else {
            escape_markdown(&row.label)
        };
        let mut cells = vec![label];
        cells.extend(row.values.iter().map(|v| v.clone().unwrap_or_default()));
        lines.push(markdown_line(&cells));
    }
    let mut rendered = lines.join("\n");
    rendered.push('\n');
    rendered
}

fn markdown_line(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

fn escape_markdown(value: &str) -> String {
    value.replace('|', "\\|")
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

//! HTML table rendering.

use anyhow::{Context, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, Event};

use crate::common::{write_text_element, write_text_element_with};
use crate::table::ResultTable;

/// Render the table as a standalone `<table>` fragment.
pub fn render_html(table: &ResultTable) -> Result<String> {
    let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);

    let mut root = BytesStart::new("table");
    root.push_attribute(("class", "effect-sizes"));
    xml.write_event(Event::Start(root))?;

    xml.write_event(Event::Start(BytesStart::new("thead")))?;
    xml.write_event(Event::Start(BytesStart::new("tr")))?;
    for column in &table.columns {
        write_text_element(&mut xml, "th", column)?;
    }
    xml.write_event(Event::End(BytesEnd::new("tr")))?;
    xml.write_event(Event::End(BytesEnd::new("thead")))?;

    xml.write_event(Event::Start(BytesStart::new("tbody")))?;
    let span = table.columns.len().to_string();
    for row in &table.rows {
        if row.header {
            let mut tr = BytesStart::new("tr");
            tr.push_attribute(("class", "group"));
            xml.write_event(Event::Start(tr))?;
            write_text_element_with(
                &mut xml,
                "th",
                &[("colspan", span.as_str()), ("scope", "rowgroup")],
                &row.label,
            )?;
        } else {
            xml.write_event(Event::Start(BytesStart::new("tr")))?;
            write_text_element(&mut xml, "td", &row.label)?;
            for value in &row.values {
                match value {
                    Some(text) => write_text_element_with(&mut xml, "td", &[("class", "num")], text)?,
                    None => write_text_element_with(&mut xml, "td", &[("class", "missing")], "")?,
                }
            }
        }
        xml.write_event(Event::End(BytesEnd::new("tr")))?;
    }
    xml.write_event(Event::End(BytesEnd::new("tbody")))?;
    xml.write_event(Event::End(BytesEnd::new("table")))?;

    String::from_utf8(xml.into_inner()).context("html output is not UTF-8")
}

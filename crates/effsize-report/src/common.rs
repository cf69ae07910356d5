//! Shared formatting and XML helpers.

use std::io::Write;

use anyhow::Result;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use effsize_core::finite;

/// Format a value at fixed precision; missing and non-finite give `None`.
pub fn format_number(value: Option<f64>, decimals: usize) -> Option<String> {
    finite(value).map(|v| format!("{v:.decimals$}"))
}

/// Format a p-value, showing values below display precision as `<0.0001`.
pub fn format_p_value(value: Option<f64>, decimals: usize) -> Option<String> {
    let value = finite(value)?;
    let threshold = 10f64.powi(-(decimals as i32));
    if value >= 0.0 && value < threshold {
        Some(format!("<{threshold:.decimals$}"))
    } else {
        Some(format!("{value:.decimals$}"))
    }
}

/// Write `<name>text</name>`.
pub fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Write `<name attrs...>text</name>`.
pub fn write_text_element_with<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    attributes: &[(&str, &str)],
    text: &str,
) -> Result<()> {
    let mut start = BytesStart::new(name);
    for attribute in attributes {
        start.push_attribute(*attribute);
    }
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_fixed_precision() {
        assert_eq!(format_number(Some(0.223_544_6), 4).as_deref(), Some("0.2235"));
        assert_eq!(format_number(Some(1.0), 2).as_deref(), Some("1.00"));
        assert_eq!(format_number(None, 4), None);
        assert_eq!(format_number(Some(f64::NEG_INFINITY), 4), None);
        assert_eq!(format_number(Some(f64::NAN), 4), None);
    }

    #[test]
    fn tiny_p_values_use_threshold() {
        assert_eq!(format_p_value(Some(0.00001), 4).as_deref(), Some("<0.0001"));
        assert_eq!(format_p_value(Some(0.0312), 4).as_deref(), Some("0.0312"));
        assert_eq!(format_p_value(Some(0.0), 3).as_deref(), Some("<0.001"));
        assert_eq!(format_p_value(None, 4), None);
    }
}

//! Raw input cells and rows.
//!
//! Cells arrive untyped (string, number, or empty). Coercion happens exactly
//! once, when a cell is built: a value either parses as a number, is empty,
//! or is kept verbatim as invalid text. Nothing here ever fails.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single unvalidated scalar from the input widget or file.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "UntypedCell")]
pub enum RawCell {
    /// Value parsed as a number.
    Number(f64),
    /// Empty, whitespace-only, or absent.
    #[default]
    Missing,
    /// Text that could not be read as a number.
    Invalid(String),
}

impl RawCell {
    /// Coerce free text into a cell.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Self::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(number) => Self::Number(number),
            Err(_) => Self::Invalid(value.to_string()),
        }
    }

    /// The numeric value, or `None` for missing and invalid cells.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Missing | Self::Invalid(_) => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

impl From<f64> for RawCell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Option<f64>> for RawCell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Missing, Self::Number)
    }
}

impl From<&str> for RawCell {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for RawCell {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl Serialize for RawCell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Number(value) => serializer.serialize_f64(*value),
            Self::Missing => serializer.serialize_none(),
            Self::Invalid(text) => serializer.serialize_str(text),
        }
    }
}

/// Wire shape of a cell before coercion.
#[derive(Deserialize)]
#[serde(untagged)]
enum UntypedCell {
    Number(f64),
    Text(String),
    Flag(bool),
    Empty(Option<()>),
}

impl From<UntypedCell> for RawCell {
    fn from(value: UntypedCell) -> Self {
        match value {
            UntypedCell::Number(number) => Self::Number(number),
            UntypedCell::Text(text) => Self::parse(&text),
            UntypedCell::Flag(flag) => Self::Invalid(flag.to_string()),
            UntypedCell::Empty(_) => Self::Missing,
        }
    }
}

fn deserialize_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let label = match UntypedCell::deserialize(deserializer)? {
        UntypedCell::Text(text) => text,
        UntypedCell::Number(number) => number.to_string(),
        UntypedCell::Flag(flag) => flag.to_string(),
        UntypedCell::Empty(_) => String::new(),
    };
    Ok(label)
}

/// One edited row as handed over by the input collaborator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawRow {
    #[serde(default, alias = "outcome", deserialize_with = "deserialize_label")]
    pub label: String,
    #[serde(default)]
    pub ratio: RawCell,
    #[serde(default, alias = "lower")]
    pub lower_ci: RawCell,
    #[serde(default, alias = "upper")]
    pub upper_ci: RawCell,
    #[serde(default, alias = "p")]
    pub p_value: RawCell,
}

impl RawRow {
    pub fn new(label: impl Into<String>, ratio: impl Into<RawCell>) -> Self {
        Self {
            label: label.into(),
            ratio: ratio.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_ci(mut self, lower: impl Into<RawCell>, upper: impl Into<RawCell>) -> Self {
        self.lower_ci = lower.into();
        self.upper_ci = upper.into();
        self
    }

    #[must_use]
    pub fn with_p_value(mut self, p_value: impl Into<RawCell>) -> Self {
        self.p_value = p_value.into();
        self
    }
}

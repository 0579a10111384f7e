//! Table component
//!
//! Rows arrive either already structured or as raw JSON mappings straight
//! from a data source. `normalize_rows` turns both into `TableRow` before
//! anything renders, so templates only ever see one row shape.

pub mod generate;

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::component::Component;

pub use generate::generate_user_data;

// ─────────────────────────────────────────────────────────────────────────────
// Columns
// ─────────────────────────────────────────────────────────────────────────────

/// Text alignment options for table columns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl ColumnAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for ColumnAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid column alignment '{0}': expected left, center or right")]
pub struct InvalidAlign(pub String);

impl FromStr for ColumnAlign {
    type Err = InvalidAlign;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            other => Err(InvalidAlign(other.to_string())),
        }
    }
}

/// Simple column definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableColumn {
    /// Display label for the column header
    pub label: String,
    /// Key used to look the value up in each row's data
    pub key: String,
    #[serde(default)]
    pub align: ColumnAlign,
}

impl TableColumn {
    pub fn new(label: impl Into<String>, key: impl Into<String>, align: ColumnAlign) -> Self {
        Self {
            label: label.into(),
            key: key.into(),
            align,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rows
// ─────────────────────────────────────────────────────────────────────────────

/// Row identifier: whatever the source used, or the row's position
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Int(i64),
    Str(String),
}

impl RowId {
    /// Interpret a raw `id` field. `null` counts as absent.
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(Self::Str(s.clone())),
            Value::Number(n) => Some(match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Str(n.to_string()),
            }),
            other => Some(Self::Str(other.to_string())),
        }
    }
}

impl From<i64> for RowId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<&str> for RowId {
    fn from(id: &str) -> Self {
        Self::Str(id.to_string())
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

/// A structured representation of a single table row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub id: RowId,
    /// Every original field, `id` and `class_name` included
    pub data: Map<String, Value>,
    /// Class name to apply to the row
    #[serde(default)]
    pub class_name: String,
}

impl TableRow {
    fn from_raw(position: usize, data: Map<String, Value>) -> Self {
        let id = data
            .get("id")
            .and_then(RowId::from_value)
            .unwrap_or(RowId::Int(position as i64));
        let class_name = data
            .get("class_name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Self {
            id,
            data,
            class_name,
        }
    }
}

/// One element of a heterogeneous row list
#[derive(Debug, Clone, PartialEq)]
pub enum RowInput {
    Row(TableRow),
    Raw(Map<String, Value>),
}

impl From<TableRow> for RowInput {
    fn from(row: TableRow) -> Self {
        Self::Row(row)
    }
}

impl From<Map<String, Value>> for RowInput {
    fn from(data: Map<String, Value>) -> Self {
        Self::Raw(data)
    }
}

/// Coerce rows to `TableRow`, keeping count and order
///
/// Raw mappings without an `id` get their zero-based position in `rows`.
pub fn normalize_rows(rows: Vec<RowInput>) -> Vec<TableRow> {
    rows.into_iter()
        .enumerate()
        .map(|(position, row)| match row {
            RowInput::Row(row) => row,
            RowInput::Raw(data) => TableRow::from_raw(position, data),
        })
        .collect()
}

/// Untyped rows must be a list of mappings; anything else is rejected here
/// rather than left for the template to trip over.
fn deserialize_rows<'de, D>(deserializer: D) -> Result<Vec<TableRow>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Err(D::Error::custom("rows must be a sequence"));
    };

    let inputs = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(data) => Ok(RowInput::Raw(data)),
            other => Err(D::Error::custom(format!(
                "row {i} must be a mapping, got {other}"
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(normalize_rows(inputs))
}

// ─────────────────────────────────────────────────────────────────────────────
// Component
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableComponent {
    pub title: String,
    pub columns: Vec<TableColumn>,
    #[serde(deserialize_with = "deserialize_rows")]
    pub rows: Vec<TableRow>,
}

impl TableComponent {
    pub fn new<I, R>(title: impl Into<String>, columns: Vec<TableColumn>, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<RowInput>,
    {
        Self {
            title: title.into(),
            columns,
            rows: normalize_rows(rows.into_iter().map(Into::into).collect()),
        }
    }
}

impl Component for TableComponent {
    const NAME: &'static str = "TableComponent";
    const SOURCE: &'static str = file!();
}

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};

/// Generated scalar for a single cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(value) => Some(*value as f64),
            CellValue::Float(value) => Some(*value),
            CellValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int(value) => write!(f, "{value}"),
            CellValue::Float(value) => write!(f, "{value}"),
            CellValue::Text(value) => f.write_str(value),
        }
    }
}

/// One generated row: column name to value, in schema order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    fields: Vec<(String, CellValue)>,
}

impl Row {
    pub fn new(fields: Vec<(String, CellValue)>) -> Self {
        Self { fields }
    }

    /// Value for `name`. With duplicate names the last column wins, matching
    /// what a reader of the json export sees.
    pub fn get(&self, name: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn values(&self) -> impl Iterator<Item = &CellValue> {
        self.fields.iter().map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Human-readable mapping rendering used by the txt export, e.g.
/// `{id: 0, name: "aZq"}`.
impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, (key, value)) in self.fields.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            match value {
                CellValue::Text(text) => write!(f, "{key}: {text:?}")?,
                other => write!(f, "{key}: {other}")?,
            }
        }
        f.write_str("}")
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// The full generated table for one generate/preview/save action.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowSet {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl RowSet {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Column names in schema order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All values of one column, top to bottom.
    pub fn column_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a CellValue> + 'a {
        self.rows.iter().filter_map(move |row| row.get(name))
    }
}

impl<'a> IntoIterator for &'a RowSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl Serialize for RowSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}

/// Options for the generation engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Fixed RNG seed; a fresh one is drawn when absent.
    pub seed: Option<u64>,
}

/// Summary of a generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub seed: u64,
    pub rows_requested: u64,
    pub rows_generated: u64,
    pub columns: usize,
    pub duration_ms: u64,
    /// Columns per generator id.
    pub generator_usage: BTreeMap<String, u64>,
}

impl GenerationReport {
    pub fn new(seed: u64, rows_requested: u64) -> Self {
        Self {
            seed,
            rows_requested,
            rows_generated: 0,
            columns: 0,
            duration_ms: 0,
            generator_usage: BTreeMap::new(),
        }
    }

    pub fn record_generator_usage(&mut self, id: &str) {
        *self.generator_usage.entry(id.to_string()).or_insert(0) += 1;
    }
}

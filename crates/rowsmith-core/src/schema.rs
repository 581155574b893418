use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::SCHEMA_VERSION;
use crate::error::{Error, Result};
use crate::types::{ColumnKind, ColumnType, ValueMode};

/// One output field: its name, value mode and typed generation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnDefinition {
    /// Column name; uniqueness is not enforced.
    pub name: String,
    #[serde(default)]
    pub value_mode: ValueMode,
    #[serde(flatten)]
    pub kind: ColumnKind,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, value_mode: ValueMode, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            value_mode,
            kind,
        }
    }

    pub fn column_type(&self) -> ColumnType {
        self.kind.column_type()
    }
}

/// Ordered registry of column definitions.
///
/// Columns are append-only: insertion order is the output column order and a
/// column is never edited or removed once added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Schema {
    /// Contract version of the persisted document.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    #[serde(default)]
    columns: Vec<ColumnDefinition>,
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema {
    pub fn new() -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            columns: Vec::new(),
        }
    }

    /// Append a column. No validation happens here; bad parameters surface
    /// when rows are generated.
    pub fn add_column(&mut self, name: impl Into<String>, value_mode: ValueMode, kind: ColumnKind) {
        let column = ColumnDefinition::new(name, value_mode, kind);
        debug!(
            column = %column.name,
            column_type = %column.column_type(),
            position = self.columns.len(),
            "column added"
        );
        self.columns.push(column);
    }

    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|col| col.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Parse a persisted schema document.
    pub fn from_json(input: &str) -> Result<Self> {
        let schema: Schema = serde_json::from_str(input)?;
        if major(&schema.schema_version) != major(SCHEMA_VERSION) {
            return Err(Error::UnsupportedSchemaVersion(schema.schema_version));
        }
        Ok(schema)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl FromIterator<ColumnDefinition> for Schema {
    fn from_iter<I: IntoIterator<Item = ColumnDefinition>>(iter: I) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            columns: iter.into_iter().collect(),
        }
    }
}

/// JSON Schema describing the persisted schema document.
pub fn schema_json_schema() -> schemars::schema::RootSchema {
    schemars::schema_for!(Schema)
}

fn default_schema_version() -> String {
    SCHEMA_VERSION.to_string()
}

fn major(version: &str) -> &str {
    version.split('.').next().unwrap_or(version)
}

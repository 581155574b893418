use std::collections::BTreeSet;

use crate::schema::Schema;
use crate::types::{ColumnKind, Distribution};

/// Non-fatal schema finding tied to a column position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub code: &'static str,
    pub column: String,
    pub position: usize,
    pub message: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    fn push(&mut self, code: &'static str, column: &str, position: usize, message: String) {
        self.warnings.push(ValidationIssue {
            code,
            column: column.to_string(),
            position,
            message,
        });
    }
}

/// Inspect a schema for problems that will surprise at export or generation time.
///
/// Nothing here blocks generation; the registry accepts any column.
/// This checks:
/// - empty and duplicate column names
/// - custom columns without values
/// - uniform bounds out of order
pub fn validate_schema(schema: &Schema) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut seen = BTreeSet::new();

    for (position, column) in schema.columns().iter().enumerate() {
        let name = column.name.as_str();
        if name.trim().is_empty() {
            report.push(
                "column.empty_name",
                name,
                position,
                "column name is empty".to_string(),
            );
        }
        if !seen.insert(name) {
            report.push(
                "column.duplicate_name",
                name,
                position,
                format!("column name '{name}' is already used; later values shadow earlier ones in json output"),
            );
        }

        match &column.kind {
            ColumnKind::Custom(params) if params.values.is_empty() => report.push(
                "custom.empty_values",
                name,
                position,
                "custom column has no values to choose from".to_string(),
            ),
            ColumnKind::Numeric(params) => {
                if let Distribution::Uniform { start, end, .. } = params.distribution
                    && start > end
                {
                    report.push(
                        "numeric.bounds_order",
                        name,
                        position,
                        format!("uniform start {start} is greater than end {end}"),
                    );
                }
            }
            _ => {}
        }
    }

    report
}

use serde_json::{Map, Value};

use crate::errors::GenerationError;
use crate::model::{CellValue, Row, RowSet};

/// The whole row set as a single array of objects, keys in column order.
pub fn to_bytes(rows: &RowSet) -> Result<Vec<u8>, GenerationError> {
    Ok(serde_json::to_vec(rows)?)
}

/// Parse a json export back into a row set ordered by `columns`.
pub fn read_json(input: &[u8], columns: &[String]) -> Result<RowSet, GenerationError> {
    let objects: Vec<Map<String, Value>> = serde_json::from_slice(input)?;
    let mut rows = Vec::with_capacity(objects.len());

    for (index, object) in objects.into_iter().enumerate() {
        let mut fields = Vec::with_capacity(columns.len());
        for column in columns {
            let value = object.get(column).cloned().ok_or_else(|| {
                GenerationError::MalformedExport(format!("row {index} has no key '{column}'"))
            })?;
            let value: CellValue = serde_json::from_value(value)?;
            fields.push((column.clone(), value));
        }
        if let Some(extra) = object.keys().find(|key| !columns.contains(*key)) {
            return Err(GenerationError::MalformedExport(format!(
                "row {index} has unexpected key '{extra}'"
            )));
        }
        rows.push(Row::new(fields));
    }

    Ok(RowSet::new(columns.to_vec(), rows))
}

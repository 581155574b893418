use std::io::Write;

use crate::errors::GenerationError;
use crate::model::RowSet;

/// One human-readable mapping per line; not meant to be parsed back.
pub fn to_bytes(rows: &RowSet) -> Result<Vec<u8>, GenerationError> {
    let mut out = Vec::new();
    for row in rows {
        writeln!(out, "{row}")?;
    }
    Ok(out)
}

use crate::errors::GenerationError;
use crate::model::RowSet;

/// Header of column names, then one record per row in column order.
pub fn to_bytes(rows: &RowSet) -> Result<Vec<u8>, GenerationError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(rows.columns())?;
    for row in rows {
        let record: Vec<String> = row.values().map(|value| value.to_string()).collect();
        writer.write_record(&record)?;
    }

    writer.flush()?;
    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(bytes)
}

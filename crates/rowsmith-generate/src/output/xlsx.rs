use rust_xlsxwriter::Workbook;

use crate::errors::GenerationError;
use crate::model::{CellValue, RowSet};

/// Single sheet: header in row 1, one spreadsheet row per generated row.
/// Numbers are written as numeric cells, text as string cells.
///
/// Spreadsheet numbers are IEEE doubles, so integers beyond 2^53 in magnitude
/// are rounded to the nearest representable value. Use csv or json for exact
/// large integers.
pub fn to_bytes(rows: &RowSet) -> Result<Vec<u8>, GenerationError> {
    let mut workbook = Workbook::new();
    {
        let worksheet = workbook.add_worksheet();
        for (col, name) in rows.columns().iter().enumerate() {
            worksheet.write_string(0, col_num(col)?, name.as_str())?;
        }

        for (index, row) in rows.iter().enumerate() {
            let row_num = row_num(index + 1)?;
            for (col, value) in row.values().enumerate() {
                let col = col_num(col)?;
                match value {
                    CellValue::Int(value) => {
                        worksheet.write_number(row_num, col, *value as f64)?;
                    }
                    CellValue::Float(value) => {
                        worksheet.write_number(row_num, col, *value)?;
                    }
                    CellValue::Text(value) => {
                        worksheet.write_string(row_num, col, value.as_str())?;
                    }
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn row_num(index: usize) -> Result<u32, GenerationError> {
    u32::try_from(index)
        .map_err(|_| GenerationError::ExportLimit(format!("row {index} exceeds the xlsx limit")))
}

fn col_num(index: usize) -> Result<u16, GenerationError> {
    u16::try_from(index)
        .map_err(|_| GenerationError::ExportLimit(format!("column {index} exceeds the xlsx limit")))
}

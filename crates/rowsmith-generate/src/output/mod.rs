//! Row set exporters.
//!
//! Every exporter renders the whole row set in memory first; [`save`] then
//! replaces the target file in one rename, so a failed export leaves no
//! partial file behind.

pub mod atomic;
pub mod csv;
pub mod json;
pub mod txt;
pub mod xlsx;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing::info;

use crate::errors::GenerationError;
use crate::model::RowSet;

pub use atomic::write_bytes_atomic;
pub use json::read_json;

/// Closed set of export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
    Txt,
    Json,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Csv,
        ExportFormat::Xlsx,
        ExportFormat::Txt,
        ExportFormat::Json,
    ];

    /// Lowercase name, also used as the file extension.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Txt => "txt",
            ExportFormat::Json => "json",
        }
    }

    /// Infer the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, GenerationError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                GenerationError::UnsupportedFormat(format!(
                    "no file extension on '{}'",
                    path.display()
                ))
            })?;
        extension.parse()
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = GenerationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().trim_start_matches('.').to_lowercase();
        ExportFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == normalized)
            .ok_or_else(|| GenerationError::UnsupportedFormat(value.to_string()))
    }
}

/// Render a row set in the requested format.
pub fn serialize(rows: &RowSet, format: ExportFormat) -> Result<Vec<u8>, GenerationError> {
    match format {
        ExportFormat::Csv => csv::to_bytes(rows),
        ExportFormat::Xlsx => xlsx::to_bytes(rows),
        ExportFormat::Txt => txt::to_bytes(rows),
        ExportFormat::Json => json::to_bytes(rows),
    }
}

/// Serialize and write atomically to `path`. Returns the bytes written.
pub fn save(path: &Path, rows: &RowSet, format: ExportFormat) -> Result<u64, GenerationError> {
    let bytes = serialize(rows, format)?;
    write_bytes_atomic(path, &bytes)?;
    info!(
        path = %path.display(),
        format = %format,
        rows = rows.len(),
        bytes = bytes.len(),
        "row set exported"
    );
    Ok(bytes.len() as u64)
}

/// Like [`save`], with the format given by name. Unknown names are rejected
/// before the file system is touched.
pub fn save_as(path: &Path, rows: &RowSet, format: &str) -> Result<u64, GenerationError> {
    let format: ExportFormat = format.parse()?;
    save(path, rows, format)
}

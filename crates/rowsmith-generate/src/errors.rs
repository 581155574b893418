use thiserror::Error;

/// Errors emitted by the generation engine and the exporters.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("row count must be a positive integer, got {0}")]
    InvalidRowCount(u64),
    #[error("column '{column}': {message}")]
    InvalidParams { column: String, message: String },
    #[error("column '{column}': invalid date range: {message}")]
    DateRange { column: String, message: String },
    #[error("column '{column}': no custom values to choose from")]
    EmptyChoices { column: String },
    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),
    #[error("export limit exceeded: {0}")]
    ExportLimit(String),
    #[error("malformed export: {0}")]
    MalformedExport(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

impl GenerationError {
    pub(crate) fn invalid_params(column: &str, message: impl Into<String>) -> Self {
        GenerationError::InvalidParams {
            column: column.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn date_range(column: &str, message: impl Into<String>) -> Self {
        GenerationError::DateRange {
            column: column.to_string(),
            message: message.into(),
        }
    }
}

use thiserror::Error;

/// Core error type shared across rowsmith crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A parameter value could not be parsed or is out of range.
    #[error("invalid value for parameter '{key}': {message}")]
    InvalidParameter { key: String, message: String },
    /// A required parameter was not supplied.
    #[error("missing required parameter '{0}'")]
    MissingParameter(String),
    /// A parameter does not belong to the selected column type.
    #[error("parameter '{key}' is not accepted by {column_type} columns")]
    UnknownParameter { key: String, column_type: String },
    /// The column type tag is not one of the known types.
    #[error("unknown column type: {0}")]
    UnknownColumnType(String),
    /// The value mode tag is not one of the known modes.
    #[error("unknown value mode: {0}")]
    UnknownValueMode(String),
    /// The schema document was written by an incompatible version.
    #[error("unsupported schema version: {0}")]
    UnsupportedSchemaVersion(String),
    /// Schema document (de)serialization failure.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results returned by rowsmith crates.
pub type Result<T> = std::result::Result<T, Error>;

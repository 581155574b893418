//! Row generation engine for rowsmith.
//!
//! This crate turns a column schema plus a row count into a row set, sampling
//! each column independently, and exports row sets as csv, xlsx, txt or json.

pub mod engine;
pub mod errors;
pub mod generators;
pub mod model;
pub mod output;

pub use engine::{GenerationEngine, GenerationResult, generate_rows, generate_rows_at};
pub use errors::GenerationError;
pub use model::{CellValue, GenerateOptions, GenerationReport, Row, RowSet};
pub use output::{ExportFormat, read_json, save, save_as, serialize};

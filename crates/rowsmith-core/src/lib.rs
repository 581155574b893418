//! Core contracts for rowsmith.
//!
//! This crate defines the column type model, the append-only schema registry,
//! the text parameter contract used by input collectors, and schema checks
//! shared by the generator and the CLI.

pub mod error;
pub mod params;
pub mod schema;
pub mod types;
pub mod validation;

pub use error::{Error, Result};
pub use params::{ParamKind, ParamSpec, ParameterBag, Requirement};
pub use schema::{ColumnDefinition, Schema, schema_json_schema};
pub use types::{
    ColumnKind, ColumnType, CustomParams, DateBound, DateParams, Distribution, NumericParams,
    PhoneParams, StringParams, ValueMode,
};
pub use validation::{ValidationIssue, ValidationReport, validate_schema};

/// Current contract version for persisted `schema.json` documents.
pub const SCHEMA_VERSION: &str = "0.1";

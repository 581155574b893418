mod paths;
mod schema_store;
mod settings;

pub use paths::WorkspacePaths;
pub use schema_store::{load_schema, save_schema};
pub use settings::{WorkspaceSettings, load_or_create_settings, load_settings};

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("schema error: {0}")]
    Schema(#[from] rowsmith_core::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("toml encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
}

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

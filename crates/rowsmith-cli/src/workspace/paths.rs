use std::path::{Path, PathBuf};

use super::WorkspaceResult;

const CONFIG_DIR: &str = "config";
const LOGS_DIR: &str = "logs";
const OUT_DIR: &str = "out";

/// Layout of a rowsmith workspace directory.
///
/// ```text
/// <root>/schema.json
/// <root>/config/settings.toml
/// <root>/logs/cli.ndjson
/// <root>/out/
/// ```
#[derive(Debug, Clone)]
pub struct WorkspacePaths {
    root: PathBuf,
}

impl WorkspacePaths {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root.join(CONFIG_DIR)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join(LOGS_DIR)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.config_dir().join("settings.toml")
    }

    pub fn schema_path(&self) -> PathBuf {
        self.root.join("schema.json")
    }

    pub fn cli_log_path(&self) -> PathBuf {
        self.logs_dir().join("cli.ndjson")
    }

    /// Export target used when `save` is given no `--out`; the extension is
    /// filled in once the format is known.
    pub fn default_output(&self) -> PathBuf {
        self.root.join(OUT_DIR).join("rows")
    }

    pub fn ensure_dirs(&self) -> WorkspaceResult<()> {
        for dir in [CONFIG_DIR, LOGS_DIR, OUT_DIR] {
            std::fs::create_dir_all(self.root.join(dir))?;
        }
        Ok(())
    }
}

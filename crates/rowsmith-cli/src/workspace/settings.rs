use rowsmith_generate::output::write_bytes_atomic;
use serde::{Deserialize, Serialize};

use super::{WorkspaceError, WorkspacePaths, WorkspaceResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceSettings {
    pub default_rows: u64,
    pub preview_rows: u64,
    /// One of csv, xlsx, txt, json.
    pub default_format: String,
    /// Fixed seed for every run; a fresh seed is drawn when unset.
    pub seed: Option<u64>,
    pub log_level: String,
    /// Append JSON events to `logs/cli.ndjson`.
    pub json_logs: bool,
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            default_rows: 10,
            preview_rows: 10,
            default_format: "csv".to_string(),
            seed: None,
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Reads `settings.toml`, falling back to defaults without touching disk.
pub fn load_settings(paths: &WorkspacePaths) -> WorkspaceResult<WorkspaceSettings> {
    let path = paths.settings_path();
    if !path.exists() {
        return Ok(WorkspaceSettings::default());
    }
    let content = std::fs::read_to_string(&path)?;
    Ok(toml::from_str(&content)?)
}

pub fn load_or_create_settings(paths: &WorkspacePaths) -> WorkspaceResult<WorkspaceSettings> {
    if paths.settings_path().exists() {
        return load_settings(paths);
    }

    let settings = WorkspaceSettings::default();
    save_settings(paths, &settings)?;
    Ok(settings)
}

pub(super) fn save_settings(
    paths: &WorkspacePaths,
    settings: &WorkspaceSettings,
) -> WorkspaceResult<()> {
    std::fs::create_dir_all(paths.config_dir())?;
    let encoded = toml::to_string_pretty(settings)?;
    write_bytes_atomic(&paths.settings_path(), encoded.as_bytes()).map_err(WorkspaceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_workspace(label: &str) -> WorkspacePaths {
        let mut dir = std::env::temp_dir();
        dir.push(format!("rowsmith_settings_{label}_{}", uuid::Uuid::new_v4()));
        WorkspacePaths::new(dir)
    }

    #[test]
    fn loading_a_missing_workspace_writes_nothing() {
        let paths = temp_workspace("missing");
        let settings = load_settings(&paths).expect("defaults");
        assert_eq!(settings, WorkspaceSettings::default());
        assert!(!paths.root().exists());
    }

    #[test]
    fn load_or_create_persists_defaults_once() {
        let paths = temp_workspace("create");
        let created = load_or_create_settings(&paths).expect("create");
        assert!(paths.settings_path().exists());
        assert_eq!(load_settings(&paths).expect("reload"), created);
    }

    #[test]
    fn partial_settings_fill_defaults() {
        let settings: WorkspaceSettings =
            toml::from_str("default_format = \"json\"\nseed = 7\n").expect("settings");
        assert_eq!(settings.default_format, "json");
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.default_rows, 10);
        assert!(!settings.json_logs);
    }

    #[test]
    fn settings_round_trip_through_toml() {
        let settings = WorkspaceSettings {
            seed: Some(99),
            json_logs: true,
            ..WorkspaceSettings::default()
        };
        let encoded = toml::to_string_pretty(&settings).expect("encode");
        let decoded: WorkspaceSettings = toml::from_str(&encoded).expect("decode");
        assert_eq!(decoded, settings);
    }
}

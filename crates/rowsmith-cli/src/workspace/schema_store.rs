use rowsmith_core::Schema;
use rowsmith_generate::output::write_bytes_atomic;

use super::{WorkspacePaths, WorkspaceResult};

/// Loads the workspace schema; a workspace without `schema.json` has no columns yet.
pub fn load_schema(paths: &WorkspacePaths) -> WorkspaceResult<Schema> {
    let path = paths.schema_path();
    if !path.exists() {
        return Ok(Schema::new());
    }
    let content = std::fs::read_to_string(&path)?;
    Ok(Schema::from_json(&content)?)
}

pub fn save_schema(paths: &WorkspacePaths, schema: &Schema) -> WorkspaceResult<()> {
    std::fs::create_dir_all(paths.root())?;
    let mut encoded = schema.to_json_pretty()?;
    encoded.push('\n');
    write_bytes_atomic(&paths.schema_path(), encoded.as_bytes())?;
    Ok(())
}

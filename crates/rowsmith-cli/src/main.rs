mod logging;
mod preview;
mod workspace;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use rowsmith_core::{
    ColumnKind, ColumnType, Error as CoreError, ParamKind, ParamSpec, ParameterBag, Requirement,
    ValueMode, schema_json_schema, validate_schema,
};
use rowsmith_generate::{ExportFormat, GenerateOptions, GenerationEngine, GenerationError, save};
use thiserror::Error;
use uuid::Uuid;
use workspace::{
    WorkspaceError, WorkspacePaths, WorkspaceSettings, load_or_create_settings, load_schema,
    load_settings, save_schema,
};

#[derive(Debug, Error)]
enum CliError {
    #[error("workspace error: {0}")]
    Workspace(#[from] WorkspaceError),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("logging error: {0}")]
    Logging(#[from] logging::LoggingError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "rowsmith", version, about = "Synthetic tabular data generator")]
struct Cli {
    /// Workspace directory holding settings, schema and logs.
    #[arg(long, global = true, default_value = ".rowsmith")]
    workspace: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the workspace with default settings and an empty schema.
    Init,
    /// Edit or inspect the column schema.
    #[command(subcommand)]
    Column(ColumnCommand),
    /// Generate rows and print one mapping per line.
    Generate(GenerateArgs),
    /// Generate rows and print them as a table.
    Preview(GenerateArgs),
    /// Generate rows and export them to a file.
    Save(SaveArgs),
    #[command(subcommand)]
    Schema(SchemaCommand),
}

#[derive(Subcommand, Debug)]
enum ColumnCommand {
    /// Append a column to the schema.
    Add(AddColumnArgs),
    /// List columns in order.
    List,
    /// Show the parameters accepted by a column type.
    Fields {
        #[arg(value_name = "TYPE")]
        column_type: ColumnType,
    },
}

#[derive(Args, Debug)]
struct AddColumnArgs {
    #[arg(long)]
    name: String,
    /// string, numeric, date, custom, phone, id, country.
    #[arg(long = "type", value_name = "TYPE")]
    column_type: ColumnType,
    #[arg(long, default_value = "random")]
    mode: ValueMode,
    /// Column parameter, repeatable.
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    params: Vec<(String, String)>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Number of rows; defaults to the workspace setting.
    #[arg(long)]
    rows: Option<u64>,
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct SaveArgs {
    /// Output file; defaults to `out/rows.<format>` inside the workspace.
    #[arg(long)]
    out: Option<PathBuf>,
    /// csv, xlsx, txt or json; inferred from the file extension when omitted.
    #[arg(long)]
    format: Option<String>,
    #[command(flatten)]
    generate: GenerateArgs,
}

#[derive(Subcommand, Debug)]
enum SchemaCommand {
    /// Print the JSON Schema of `schema.json`.
    JsonSchema,
    /// Print the workspace schema document.
    Show,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let paths = WorkspacePaths::new(cli.workspace);

    let settings = if matches!(cli.command, Command::Init) {
        paths.ensure_dirs()?;
        load_or_create_settings(&paths)?
    } else {
        load_settings(&paths)?
    };

    let json_log = if settings.json_logs {
        std::fs::create_dir_all(paths.logs_dir()).map_err(WorkspaceError::from)?;
        Some(paths.cli_log_path())
    } else {
        None
    };
    logging::init_logging(&settings.log_level, json_log.as_deref())?;

    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("command", run_id = %run_id);
    let _guard = span.enter();

    match cli.command {
        Command::Init => run_init(&paths),
        Command::Column(command) => run_column(&paths, command),
        Command::Generate(args) => run_generate(&paths, &settings, args),
        Command::Preview(args) => run_preview(&paths, &settings, args),
        Command::Save(args) => run_save(&paths, &settings, args),
        Command::Schema(command) => run_schema(&paths, command),
    }
}

fn run_init(paths: &WorkspacePaths) -> Result<(), CliError> {
    if !paths.schema_path().exists() {
        save_schema(paths, &rowsmith_core::Schema::new())?;
    }
    tracing::info!(event = "workspace_initialized", root = %paths.root().display());
    println!("workspace ready at {}", paths.root().display());
    Ok(())
}

fn run_column(paths: &WorkspacePaths, command: ColumnCommand) -> Result<(), CliError> {
    match command {
        ColumnCommand::Add(args) => {
            let bag: ParameterBag = args.params.into_iter().collect();
            let kind = ColumnKind::from_parameters(args.column_type, &bag)?;
            let mut schema = load_schema(paths)?;
            schema.add_column(args.name.clone(), args.mode, kind);
            save_schema(paths, &schema)?;
            for warning in validate_schema(&schema).warnings {
                tracing::warn!(
                    event = "schema_warning",
                    code = warning.code,
                    column = %warning.column,
                    message = %warning.message
                );
            }
            tracing::info!(
                event = "column_added",
                column = %args.name,
                column_type = %args.column_type,
                position = schema.len() - 1
            );
            println!("added column {} ({})", args.name, args.column_type);
        }
        ColumnCommand::List => {
            let schema = load_schema(paths)?;
            if schema.is_empty() {
                println!("no columns defined");
            }
            for (position, column) in schema.columns().iter().enumerate() {
                println!(
                    "{position}. {} [{}, {}]{}",
                    column.name,
                    column.column_type(),
                    column.value_mode,
                    describe_params(&column.kind)?
                );
            }
        }
        ColumnCommand::Fields { column_type } => {
            let specs = column_type.parameter_specs();
            if specs.is_empty() {
                println!("{column_type} takes no parameters");
            }
            for spec in specs {
                let default = spec.default.unwrap_or("-");
                println!(
                    "{:<16} {:<24} {:<32} default: {default}",
                    spec.key,
                    describe_kind(spec.kind),
                    describe_requirement(spec)
                );
            }
        }
    }
    Ok(())
}

fn run_generate(
    paths: &WorkspacePaths,
    settings: &WorkspaceSettings,
    args: GenerateArgs,
) -> Result<(), CliError> {
    let rows = generate(paths, settings, &args, settings.default_rows)?;
    for row in &rows {
        println!("{row}");
    }
    Ok(())
}

fn run_preview(
    paths: &WorkspacePaths,
    settings: &WorkspaceSettings,
    args: GenerateArgs,
) -> Result<(), CliError> {
    let rows = generate(paths, settings, &args, settings.preview_rows)?;
    print!("{}", preview::render_table(&rows));
    Ok(())
}

fn run_save(
    paths: &WorkspacePaths,
    settings: &WorkspaceSettings,
    args: SaveArgs,
) -> Result<(), CliError> {
    let out = match args.out {
        Some(path) => path,
        None => paths.default_output(),
    };
    let (out, format) = resolve_output(&out, args.format.as_deref(), &settings.default_format)?;

    let rows = generate(paths, settings, &args.generate, settings.default_rows)?;
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(WorkspaceError::from)?;
    }
    let bytes = save(&out, &rows, format)?;
    println!("wrote {} rows to {} ({bytes} bytes)", rows.len(), out.display());
    Ok(())
}

fn run_schema(paths: &WorkspacePaths, command: SchemaCommand) -> Result<(), CliError> {
    match command {
        SchemaCommand::JsonSchema => {
            println!("{}", serde_json::to_string_pretty(&schema_json_schema())?);
        }
        SchemaCommand::Show => {
            println!("{}", load_schema(paths)?.to_json_pretty()?);
        }
    }
    Ok(())
}

fn generate(
    paths: &WorkspacePaths,
    settings: &WorkspaceSettings,
    args: &GenerateArgs,
    default_rows: u64,
) -> Result<rowsmith_generate::RowSet, CliError> {
    let schema = load_schema(paths)?;
    if schema.is_empty() {
        tracing::warn!(event = "empty_schema", "schema has no columns; rows will be empty");
    }
    let engine = GenerationEngine::new(GenerateOptions {
        seed: args.seed.or(settings.seed),
    });
    let result = engine.generate(&schema, args.rows.unwrap_or(default_rows))?;
    Ok(result.rows)
}

/// Picks the export format from the flag, then the extension, then the
/// workspace default, appending the extension when the path has none.
fn resolve_output(
    out: &Path,
    flag: Option<&str>,
    default_format: &str,
) -> Result<(PathBuf, ExportFormat), CliError> {
    let has_extension = out.extension().is_some();
    let format = match flag {
        Some(name) => name.parse::<ExportFormat>()?,
        None if has_extension => ExportFormat::from_path(out)?,
        None => default_format.parse::<ExportFormat>()?,
    };
    if has_extension {
        if flag.is_some() && ExportFormat::from_path(out).ok() != Some(format) {
            tracing::warn!(
                event = "extension_mismatch",
                path = %out.display(),
                format = %format
            );
        }
        return Ok((out.to_path_buf(), format));
    }
    Ok((out.with_extension(format.as_str()), format))
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing parameter name in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn describe_requirement(spec: &ParamSpec) -> String {
    match spec.requirement {
        Requirement::RequiredIf { key, equals } => format!("required if {key}={equals}"),
        _ if spec.is_required() => "required".to_string(),
        _ => "optional".to_string(),
    }
}

fn describe_kind(kind: ParamKind) -> String {
    match kind {
        ParamKind::Bool => "bool".to_string(),
        ParamKind::Count => "count".to_string(),
        ParamKind::Float => "number".to_string(),
        ParamKind::Text => "text".to_string(),
        ParamKind::List => "comma list".to_string(),
        ParamKind::Choice(options) => format!("one of {}", options.join("|")),
    }
}

fn describe_params(kind: &ColumnKind) -> Result<String, CliError> {
    let mut value = serde_json::to_value(kind)?;
    if let Some(object) = value.as_object_mut() {
        object.remove("type");
        if object.is_empty() {
            return Ok(String::new());
        }
    }
    Ok(format!(" {}", serde_json::to_string(&value)?))
}

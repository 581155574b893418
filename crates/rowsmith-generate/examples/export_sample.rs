use std::env;
use std::path::PathBuf;

use rowsmith_core::{ColumnKind, ColumnType, ParameterBag, Schema, ValueMode};
use rowsmith_generate::{ExportFormat, GenerateOptions, GenerationEngine, save};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let mut out: Option<PathBuf> = None;
    let mut rows: u64 = 10;
    let mut seed: Option<u64> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" => out = args.next().map(PathBuf::from),
            "--rows" => rows = args.next().ok_or("missing --rows value")?.parse()?,
            "--seed" => seed = Some(args.next().ok_or("missing --seed value")?.parse()?),
            _ => return Err(format!("unexpected argument '{arg}'").into()),
        }
    }
    let out = out.ok_or("missing --out path")?;

    let mut schema = Schema::new();
    schema.add_column("id", ValueMode::Sequential, ColumnKind::SequentialId);
    schema.add_column(
        "amount",
        ValueMode::Random,
        ColumnKind::from_parameters(
            ColumnType::Numeric,
            &ParameterBag::from([
                ("start".to_string(), "1".to_string()),
                ("end".to_string(), "500".to_string()),
                ("is_float".to_string(), "true".to_string()),
            ]),
        )?,
    );
    schema.add_column("country", ValueMode::Random, ColumnKind::Country);

    let engine = GenerationEngine::new(GenerateOptions { seed });
    let result = engine.generate(&schema, rows)?;
    let format = ExportFormat::from_path(&out)?;
    let bytes = save(&out, &result.rows, format)?;

    println!("path={} bytes={bytes} seed={}", out.display(), result.report.seed);
    Ok(())
}

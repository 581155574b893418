use std::time::Instant;

use chrono::{Local, NaiveDateTime};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use rowsmith_core::{Schema, validate_schema};

use crate::errors::GenerationError;
use crate::generators::{Generator, GeneratorContext, build_generator};
use crate::model::{GenerateOptions, GenerationReport, Row, RowSet};

/// Result of a generation call.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub rows: RowSet,
    pub report: GenerationReport,
}

/// Seeded entry point for generating row sets from a schema.
#[derive(Debug, Clone, Default)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn generate(
        &self,
        schema: &Schema,
        row_count: u64,
    ) -> Result<GenerationResult, GenerationError> {
        check_row_count(row_count)?;
        let start = Instant::now();
        let seed = self.options.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        for issue in validate_schema(schema).warnings {
            warn!(
                code = issue.code,
                column = %issue.column,
                position = issue.position,
                "{}",
                issue.message
            );
        }

        info!(
            seed,
            rows = row_count,
            columns = schema.len(),
            "generation started"
        );

        let mut report = GenerationReport::new(seed, row_count);
        let now = Local::now().naive_local();
        let generators = build_generators(schema, now)?;
        for generator in &generators {
            report.record_generator_usage(generator.id());
        }

        let rows = run(schema, &generators, row_count, &mut rng)?;

        report.rows_generated = rows.len() as u64;
        report.columns = schema.len();
        report.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            seed,
            rows_generated = report.rows_generated,
            duration_ms = report.duration_ms,
            "generation completed"
        );

        Ok(GenerationResult { rows, report })
    }
}

/// Generate `row_count` rows for `schema`, using the local clock for open
/// date ranges.
pub fn generate_rows(
    schema: &Schema,
    row_count: u64,
    rng: &mut dyn RngCore,
) -> Result<RowSet, GenerationError> {
    generate_rows_at(schema, row_count, Local::now().naive_local(), rng)
}

/// Same as [`generate_rows`] with an explicit instant standing in for "now".
///
/// Either every row is produced or an error is returned; a failing column
/// never yields a partial row set.
pub fn generate_rows_at(
    schema: &Schema,
    row_count: u64,
    now: NaiveDateTime,
    rng: &mut dyn RngCore,
) -> Result<RowSet, GenerationError> {
    check_row_count(row_count)?;
    let generators = build_generators(schema, now)?;
    run(schema, &generators, row_count, rng)
}

fn check_row_count(row_count: u64) -> Result<(), GenerationError> {
    if row_count == 0 {
        return Err(GenerationError::InvalidRowCount(row_count));
    }
    Ok(())
}

fn build_generators(
    schema: &Schema,
    now: NaiveDateTime,
) -> Result<Vec<Box<dyn Generator>>, GenerationError> {
    schema
        .columns()
        .iter()
        .map(|column| build_generator(column, now))
        .collect()
}

fn run(
    schema: &Schema,
    generators: &[Box<dyn Generator>],
    row_count: u64,
    rng: &mut dyn RngCore,
) -> Result<RowSet, GenerationError> {
    let mut rows = Vec::new();
    for row_index in 0..row_count {
        let mut fields = Vec::with_capacity(generators.len());
        for (column, generator) in schema.columns().iter().zip(generators) {
            let ctx = GeneratorContext {
                column: &column.name,
                row_index,
            };
            fields.push((column.name.clone(), generator.generate(&ctx, rng)?));
        }
        rows.push(Row::new(fields));
    }

    Ok(RowSet::new(schema.column_names(), rows))
}

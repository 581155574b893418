pub mod primitives;
pub mod semantic;
pub mod temporal;

use chrono::NaiveDateTime;
use rand::RngCore;
use tracing::debug;

use rowsmith_core::{ColumnDefinition, ColumnKind, Distribution};

use crate::errors::GenerationError;
use crate::model::CellValue;

use primitives::{
    ChoiceGenerator, FloatRangeGenerator, IntRangeGenerator, NormalGenerator,
    SequentialIdGenerator, TextGenerator,
};
use semantic::{CountryGenerator, PhoneGenerator};
use temporal::DateRangeGenerator;

/// Per-row inputs shared by every column generator.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorContext<'a> {
    pub column: &'a str,
    /// Zero-based index of the row being generated.
    pub row_index: u64,
}

/// A column value source, built once per generation call.
pub trait Generator: Send + Sync {
    fn id(&self) -> &'static str;

    fn generate(
        &self,
        ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<CellValue, GenerationError>;
}

/// Resolve a column definition into its generator.
///
/// All parameter checks happen here so a bad column fails the call before any
/// row is produced. `now` is the instant date columns use for an open end.
pub fn build_generator(
    column: &ColumnDefinition,
    now: NaiveDateTime,
) -> Result<Box<dyn Generator>, GenerationError> {
    let name = column.name.as_str();
    let generator: Box<dyn Generator> = match &column.kind {
        ColumnKind::String(params) => Box::new(TextGenerator::new(name, params)?),
        ColumnKind::Numeric(params) => match params.distribution {
            Distribution::Uniform {
                start,
                end,
                is_float: true,
            } => Box::new(FloatRangeGenerator::new(name, start, end)?),
            Distribution::Uniform {
                start,
                end,
                is_float: false,
            } => Box::new(IntRangeGenerator::new(name, start, end)?),
            Distribution::Normal { mean, stddev } => {
                Box::new(NormalGenerator::new(name, mean, stddev)?)
            }
        },
        ColumnKind::Date(params) => Box::new(DateRangeGenerator::new(name, params, now)?),
        ColumnKind::Custom(params) => Box::new(ChoiceGenerator::new(name, &params.values)?),
        ColumnKind::SequentialId => Box::new(SequentialIdGenerator),
        ColumnKind::Phone(params) => Box::new(PhoneGenerator::new(name, params)?),
        ColumnKind::Country => Box::new(CountryGenerator),
    };
    debug!(
        column = name,
        value_mode = %column.value_mode,
        generator = generator.id(),
        "generator built"
    );
    Ok(generator)
}

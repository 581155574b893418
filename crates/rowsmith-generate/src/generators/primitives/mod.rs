use rand::distr::{Distribution, Uniform};
use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};
use rand_distr::Normal;

use rowsmith_core::StringParams;

use crate::errors::GenerationError;
use crate::generators::{Generator, GeneratorContext};
use crate::model::CellValue;

const LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Longest value a string or phone column may ask for.
pub const MAX_VALUE_LENGTH: usize = 1 << 16;

/// Fixed-length strings drawn with replacement from an ASCII alphabet.
pub struct TextGenerator {
    alphabet: Vec<char>,
    length: usize,
}

impl TextGenerator {
    pub fn new(column: &str, params: &StringParams) -> Result<Self, GenerationError> {
        check_length(column, "length", params.length)?;
        Ok(Self {
            alphabet: alphabet(params.include_digits, params.include_special),
            length: params.length,
        })
    }
}

/// Letters, plus digits and punctuation when enabled.
pub fn alphabet(include_digits: bool, include_special: bool) -> Vec<char> {
    let mut chars: Vec<char> = LETTERS.chars().collect();
    if include_digits {
        chars.extend(DIGITS.chars());
    }
    if include_special {
        chars.extend(PUNCTUATION.chars());
    }
    chars
}

impl Generator for TextGenerator {
    fn id(&self) -> &'static str {
        "primitive.text"
    }

    fn generate(
        &self,
        _ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<CellValue, GenerationError> {
        let value: String = (0..self.length)
            .map(|_| self.alphabet[rng.random_range(0..self.alphabet.len())])
            .collect();
        Ok(CellValue::Text(value))
    }
}

/// Uniform integers in `[ceil(start), floor(end)]`.
pub struct IntRangeGenerator {
    distribution: Uniform<i64>,
}

impl IntRangeGenerator {
    pub fn new(column: &str, start: f64, end: f64) -> Result<Self, GenerationError> {
        check_bounds(column, start, end)?;
        let (min, max) = (start.ceil(), end.floor());
        if min > max {
            return Err(GenerationError::invalid_params(
                column,
                format!("no integer lies between {start} and {end}"),
            ));
        }
        if min < i64::MIN as f64 || max > i64::MAX as f64 {
            return Err(GenerationError::invalid_params(
                column,
                "integer bounds exceed the 64-bit range",
            ));
        }
        let distribution = Uniform::new_inclusive(min as i64, max as i64)
            .map_err(|err| GenerationError::invalid_params(column, err.to_string()))?;
        Ok(Self { distribution })
    }
}

impl Generator for IntRangeGenerator {
    fn id(&self) -> &'static str {
        "primitive.int.range"
    }

    fn generate(
        &self,
        _ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<CellValue, GenerationError> {
        Ok(CellValue::Int(self.distribution.sample(rng)))
    }
}

/// Uniform floats in `[start, end]`.
pub struct FloatRangeGenerator {
    distribution: Uniform<f64>,
}

impl FloatRangeGenerator {
    pub fn new(column: &str, start: f64, end: f64) -> Result<Self, GenerationError> {
        check_bounds(column, start, end)?;
        let distribution = Uniform::new_inclusive(start, end)
            .map_err(|err| GenerationError::invalid_params(column, err.to_string()))?;
        Ok(Self { distribution })
    }
}

impl Generator for FloatRangeGenerator {
    fn id(&self) -> &'static str {
        "primitive.float.range"
    }

    fn generate(
        &self,
        _ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<CellValue, GenerationError> {
        Ok(CellValue::Float(self.distribution.sample(rng)))
    }
}

/// Gaussian draws, unclamped.
pub struct NormalGenerator {
    distribution: Normal<f64>,
}

impl NormalGenerator {
    pub fn new(column: &str, mean: f64, stddev: f64) -> Result<Self, GenerationError> {
        let distribution = Normal::new(mean, stddev).map_err(|err| {
            GenerationError::invalid_params(column, format!("invalid normal distribution: {err}"))
        })?;
        Ok(Self { distribution })
    }
}

impl Generator for NormalGenerator {
    fn id(&self) -> &'static str {
        "primitive.float.normal"
    }

    fn generate(
        &self,
        ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<CellValue, GenerationError> {
        let value = self.distribution.sample(rng);
        if !value.is_finite() {
            return Err(GenerationError::invalid_params(
                ctx.column,
                format!("normal draw overflowed to {value} at row {}", ctx.row_index),
            ));
        }
        Ok(CellValue::Float(value))
    }
}

/// Uniform pick, with replacement, from user-supplied literals.
pub struct ChoiceGenerator {
    values: Vec<String>,
}

impl ChoiceGenerator {
    pub fn new(column: &str, values: &[String]) -> Result<Self, GenerationError> {
        if values.is_empty() {
            return Err(GenerationError::EmptyChoices {
                column: column.to_string(),
            });
        }
        Ok(Self {
            values: values.to_vec(),
        })
    }
}

impl Generator for ChoiceGenerator {
    fn id(&self) -> &'static str {
        "primitive.choice"
    }

    fn generate(
        &self,
        ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<CellValue, GenerationError> {
        let value = self
            .values
            .choose(rng)
            .ok_or_else(|| GenerationError::EmptyChoices {
                column: ctx.column.to_string(),
            })?;
        Ok(CellValue::Text(value.clone()))
    }
}

/// The row index itself; never random.
pub struct SequentialIdGenerator;

impl Generator for SequentialIdGenerator {
    fn id(&self) -> &'static str {
        "primitive.int.sequence"
    }

    fn generate(
        &self,
        ctx: &GeneratorContext<'_>,
        _rng: &mut dyn RngCore,
    ) -> Result<CellValue, GenerationError> {
        let value = i64::try_from(ctx.row_index).map_err(|_| {
            GenerationError::invalid_params(ctx.column, "row index exceeds the 64-bit range")
        })?;
        Ok(CellValue::Int(value))
    }
}

pub(crate) fn check_length(
    column: &str,
    key: &str,
    length: usize,
) -> Result<(), GenerationError> {
    if length > MAX_VALUE_LENGTH {
        return Err(GenerationError::invalid_params(
            column,
            format!("{key} {length} exceeds the maximum of {MAX_VALUE_LENGTH}"),
        ));
    }
    Ok(())
}

fn check_bounds(column: &str, start: f64, end: f64) -> Result<(), GenerationError> {
    if !start.is_finite() || !end.is_finite() {
        return Err(GenerationError::invalid_params(
            column,
            "uniform bounds must be finite",
        ));
    }
    if start > end {
        return Err(GenerationError::invalid_params(
            column,
            format!("uniform start {start} must be <= end {end}"),
        ));
    }
    Ok(())
}

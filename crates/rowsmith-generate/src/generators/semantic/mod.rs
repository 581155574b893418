use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};

use rowsmith_core::PhoneParams;

use crate::errors::GenerationError;
use crate::generators::primitives::check_length;
use crate::generators::{Generator, GeneratorContext};
use crate::model::CellValue;

pub const COUNTRIES: &[&str] = &[
    "USA",
    "Canada",
    "UK",
    "Germany",
    "France",
    "Australia",
    "India",
    "China",
    "Japan",
    "Brazil",
];

/// Country code followed by uniformly drawn decimal digits.
pub struct PhoneGenerator {
    country_code: String,
    number_length: usize,
}

impl PhoneGenerator {
    pub fn new(column: &str, params: &PhoneParams) -> Result<Self, GenerationError> {
        check_length(column, "number_length", params.number_length)?;
        Ok(Self {
            country_code: params.country_code.clone(),
            number_length: params.number_length,
        })
    }
}

impl Generator for PhoneGenerator {
    fn id(&self) -> &'static str {
        "semantic.phone"
    }

    fn generate(
        &self,
        _ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<CellValue, GenerationError> {
        let capacity = self.country_code.len().saturating_add(self.number_length);
        let mut value = String::with_capacity(capacity);
        value.push_str(&self.country_code);
        value.extend((0..self.number_length).map(|_| char::from(b'0' + rng.random_range(0..10u8))));
        Ok(CellValue::Text(value))
    }
}

pub struct CountryGenerator;

impl Generator for CountryGenerator {
    fn id(&self) -> &'static str {
        "semantic.country"
    }

    fn generate(
        &self,
        _ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<CellValue, GenerationError> {
        let value = COUNTRIES.choose(rng).copied().unwrap_or("USA");
        Ok(CellValue::Text(value.to_string()))
    }
}

use std::fmt::Write as _;

use chrono::format::{Fixed, Item, Numeric, ParseResult, Parsed, StrftimeItems};
use chrono::{Duration, NaiveDateTime};
use rand::{Rng, RngCore};

use rowsmith_core::{DateBound, DateParams};

use crate::errors::GenerationError;
use crate::generators::{Generator, GeneratorContext};
use crate::model::CellValue;

/// Uniform instants, at one-second resolution, between two bounds, rendered
/// with the column's strftime pattern.
pub struct DateRangeGenerator {
    start: NaiveDateTime,
    span_seconds: i64,
    format: String,
}

impl DateRangeGenerator {
    pub fn new(
        column: &str,
        params: &DateParams,
        now: NaiveDateTime,
    ) -> Result<Self, GenerationError> {
        check_format(column, &params.format)?;

        let start = match &params.start_date {
            Some(value) => parse_with_format(column, value, &params.format)?,
            // Default is the Unix epoch.
            None => NaiveDateTime::default(),
        };
        let end = match &params.end_date {
            DateBound::Now => now,
            DateBound::At(value) => parse_with_format(column, value, &params.format)?,
        };
        if end < start {
            return Err(GenerationError::date_range(
                column,
                format!("end {end} precedes start {start}"),
            ));
        }

        let generator = Self {
            start,
            span_seconds: (end - start).num_seconds(),
            format: params.format.clone(),
        };
        // Probe once so patterns that need an offset (%z, %Z) fail up front.
        generator.render(column, start)?;
        Ok(generator)
    }

    fn render(&self, column: &str, value: NaiveDateTime) -> Result<String, GenerationError> {
        let mut out = String::new();
        write!(out, "{}", value.format(&self.format)).map_err(|_| {
            GenerationError::invalid_params(
                column,
                format!("date format '{}' cannot render a local date", self.format),
            )
        })?;
        Ok(out)
    }
}

impl Generator for DateRangeGenerator {
    fn id(&self) -> &'static str {
        "primitive.date.range"
    }

    fn generate(
        &self,
        ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<CellValue, GenerationError> {
        let offset = rng.random_range(0..=self.span_seconds);
        let value = self.start + Duration::seconds(offset);
        Ok(CellValue::Text(self.render(ctx.column, value)?))
    }
}

fn check_format(column: &str, format: &str) -> Result<(), GenerationError> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(GenerationError::invalid_params(
            column,
            format!("invalid date format '{format}'"),
        ));
    }
    Ok(())
}

/// Parse a bound with the column pattern.
///
/// Fields the pattern leaves out take the values of 1900-01-01 00:00:00, so
/// `%Y` or `%H:%M` still yield a full instant.
fn parse_with_format(
    column: &str,
    value: &str,
    format: &str,
) -> Result<NaiveDateTime, GenerationError> {
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    parse_instant(value, &items).map_err(|err| {
        GenerationError::date_range(
            column,
            format!("cannot parse '{value}' with format '{format}': {err}"),
        )
    })
}

fn parse_instant(value: &str, items: &[Item<'_>]) -> ParseResult<NaiveDateTime> {
    let mut parsed = Parsed::new();
    chrono::format::parse(&mut parsed, value, items.iter())?;
    fill_missing_fields(&mut parsed, items)?;
    Ok(parsed.to_naive_date()?.and_time(parsed.to_naive_time()?))
}

fn fill_missing_fields(parsed: &mut Parsed, items: &[Item<'_>]) -> ParseResult<()> {
    let has = |wanted: &[Numeric]| {
        items
            .iter()
            .any(|item| matches!(item, Item::Numeric(numeric, _) if wanted.contains(numeric)))
    };
    let has_fixed = |wanted: &[Fixed]| {
        items
            .iter()
            .any(|item| matches!(item, Item::Fixed(fixed) if wanted.contains(fixed)))
    };

    if has(&[Numeric::Timestamp]) {
        return Ok(());
    }

    let week_based = has(&[
        Numeric::WeekFromSun,
        Numeric::WeekFromMon,
        Numeric::IsoWeek,
        Numeric::IsoYear,
        Numeric::IsoYearDiv100,
        Numeric::IsoYearMod100,
    ]);
    if !week_based {
        if !has(&[Numeric::Year, Numeric::YearDiv100, Numeric::YearMod100]) {
            parsed.set_year(1900)?;
        }
        if !has(&[Numeric::Ordinal]) {
            if !has(&[Numeric::Month]) && !has_fixed(&[Fixed::ShortMonthName, Fixed::LongMonthName])
            {
                parsed.set_month(1)?;
            }
            if !has(&[Numeric::Day]) {
                parsed.set_day(1)?;
            }
        }
    }

    if has(&[Numeric::Hour12]) {
        if !has_fixed(&[Fixed::UpperAmPm, Fixed::LowerAmPm]) {
            parsed.set_ampm(false)?;
        }
    } else if !has(&[Numeric::Hour]) {
        parsed.set_hour(0)?;
    }
    if !has(&[Numeric::Minute]) {
        parsed.set_minute(0)?;
    }
    if !has(&[Numeric::Second]) {
        parsed.set_second(0)?;
    }
    Ok(())
}

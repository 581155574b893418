//! Text parameter contract between input collectors and the schema registry.
//!
//! Input collectors (forms, the CLI) gather raw text per parameter key. The
//! visible parameters for a column type, and which of them are required, are a
//! pure function of the type: [`ColumnType::parameter_specs`].

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::types::{
    ColumnKind, ColumnType, CustomParams, DEFAULT_COUNTRY_CODE, DEFAULT_DATE_FORMAT, DEFAULT_MEAN,
    DEFAULT_PHONE_LENGTH, DEFAULT_STDDEV, DEFAULT_STRING_LENGTH, DateBound, DateParams,
    Distribution, NumericParams, PhoneParams, StringParams,
};

/// Raw parameter text keyed by parameter name.
pub type ParameterBag = BTreeMap<String, String>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    Bool,
    /// Non-negative integer.
    Count,
    Float,
    Text,
    /// Comma-separated list; entries are trimmed and blanks dropped.
    List,
    Choice(&'static [&'static str]),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Requirement {
    Optional,
    Required,
    /// Required when another parameter (or its default) has the given value.
    RequiredIf {
        key: &'static str,
        equals: &'static str,
    },
}

#[derive(Clone, Copy, Debug)]
pub struct ParamSpec {
    pub key: &'static str,
    pub kind: ParamKind,
    pub requirement: Requirement,
    pub default: Option<&'static str>,
}

impl ParamSpec {
    pub const fn new(
        key: &'static str,
        kind: ParamKind,
        requirement: Requirement,
        default: Option<&'static str>,
    ) -> Self {
        Self {
            key,
            kind,
            requirement,
            default,
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self.requirement, Requirement::Optional)
    }
}

const DISTRIBUTIONS: &[&str] = &["uniform", "normal"];

const STRING_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("length", ParamKind::Count, Requirement::Optional, Some("10")),
    ParamSpec::new("include_digits", ParamKind::Bool, Requirement::Optional, Some("false")),
    ParamSpec::new("include_special", ParamKind::Bool, Requirement::Optional, Some("false")),
];
const NUMERIC_PARAMS: &[ParamSpec] = &[
    ParamSpec::new(
        "distribution",
        ParamKind::Choice(DISTRIBUTIONS),
        Requirement::Optional,
        Some("uniform"),
    ),
    ParamSpec::new(
        "start",
        ParamKind::Float,
        Requirement::RequiredIf {
            key: "distribution",
            equals: "uniform",
        },
        None,
    ),
    ParamSpec::new(
        "end",
        ParamKind::Float,
        Requirement::RequiredIf {
            key: "distribution",
            equals: "uniform",
        },
        None,
    ),
    ParamSpec::new("is_float", ParamKind::Bool, Requirement::Optional, Some("false")),
    ParamSpec::new("mean", ParamKind::Float, Requirement::Optional, Some("0")),
    ParamSpec::new("stddev", ParamKind::Float, Requirement::Optional, Some("1")),
];
const DATE_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("start_date", ParamKind::Text, Requirement::Optional, Some("1970-01-01")),
    ParamSpec::new("end_date", ParamKind::Text, Requirement::Optional, Some("now")),
    ParamSpec::new("format", ParamKind::Text, Requirement::Optional, Some(DEFAULT_DATE_FORMAT)),
];
const CUSTOM_PARAMS: &[ParamSpec] = &[ParamSpec::new(
    "values",
    ParamKind::List,
    Requirement::Required,
    None,
)];
const PHONE_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("country_code", ParamKind::Text, Requirement::Optional, Some(DEFAULT_COUNTRY_CODE)),
    ParamSpec::new("number_length", ParamKind::Count, Requirement::Optional, Some("10")),
];

impl ColumnType {
    /// Parameters shown for this type, in display order.
    pub fn parameter_specs(&self) -> &'static [ParamSpec] {
        match self {
            ColumnType::String => STRING_PARAMS,
            ColumnType::Numeric => NUMERIC_PARAMS,
            ColumnType::Date => DATE_PARAMS,
            ColumnType::Custom => CUSTOM_PARAMS,
            ColumnType::Phone => PHONE_PARAMS,
            ColumnType::SequentialId | ColumnType::Country => &[],
        }
    }
}

impl ColumnKind {
    /// Build typed parameters from raw text.
    ///
    /// Blank values count as absent. Optional parameters fall back to their
    /// defaults; required ones are rejected when missing.
    pub fn from_parameters(column_type: ColumnType, bag: &ParameterBag) -> Result<ColumnKind> {
        let params = ParamMap::validate(column_type, bag)?;
        let kind = match column_type {
            ColumnType::String => ColumnKind::String(StringParams {
                length: params.get_count("length")?.unwrap_or(DEFAULT_STRING_LENGTH),
                include_digits: params.get_bool("include_digits")?.unwrap_or(false),
                include_special: params.get_bool("include_special")?.unwrap_or(false),
            }),
            ColumnType::Numeric => {
                let distribution = match params.get_str("distribution").unwrap_or("uniform") {
                    "normal" => Distribution::Normal {
                        mean: params.get_f64("mean")?.unwrap_or(DEFAULT_MEAN),
                        stddev: params.get_f64("stddev")?.unwrap_or(DEFAULT_STDDEV),
                    },
                    _ => Distribution::Uniform {
                        start: params.require_f64("start")?,
                        end: params.require_f64("end")?,
                        is_float: params.get_bool("is_float")?.unwrap_or(false),
                    },
                };
                ColumnKind::Numeric(NumericParams { distribution })
            }
            ColumnType::Date => ColumnKind::Date(DateParams {
                start_date: params.get_str("start_date").map(str::to_string),
                end_date: params
                    .get_str("end_date")
                    .map(|value| DateBound::from(value.to_string()))
                    .unwrap_or_default(),
                format: params
                    .get_str("format")
                    .unwrap_or(DEFAULT_DATE_FORMAT)
                    .to_string(),
            }),
            ColumnType::Custom => ColumnKind::Custom(CustomParams {
                values: params.get_list("values").unwrap_or_default(),
            }),
            ColumnType::SequentialId => ColumnKind::SequentialId,
            ColumnType::Phone => ColumnKind::Phone(PhoneParams {
                country_code: params
                    .get_str("country_code")
                    .unwrap_or(DEFAULT_COUNTRY_CODE)
                    .to_string(),
                number_length: params
                    .get_count("number_length")?
                    .unwrap_or(DEFAULT_PHONE_LENGTH),
            }),
            ColumnType::Country => ColumnKind::Country,
        };
        Ok(kind)
    }
}

struct ParamMap<'a> {
    values: BTreeMap<&'a str, &'a str>,
}

impl<'a> ParamMap<'a> {
    fn validate(column_type: ColumnType, bag: &'a ParameterBag) -> Result<Self> {
        let specs = column_type.parameter_specs();
        let mut values = BTreeMap::new();

        for (key, value) in bag {
            let Some(spec) = specs.iter().find(|spec| spec.key == key.as_str()) else {
                return Err(Error::UnknownParameter {
                    key: key.clone(),
                    column_type: column_type.to_string(),
                });
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            validate_kind(spec, value)?;
            values.insert(spec.key, value);
        }

        for spec in specs {
            let required = match spec.requirement {
                Requirement::Optional => false,
                Requirement::Required => true,
                Requirement::RequiredIf { key, equals } => {
                    let current = values.get(key).copied().or_else(|| {
                        specs
                            .iter()
                            .find(|other| other.key == key)
                            .and_then(|other| other.default)
                    });
                    current == Some(equals)
                }
            };
            if required && !values.contains_key(spec.key) {
                return Err(Error::MissingParameter(spec.key.to_string()));
            }
        }

        Ok(Self { values })
    }

    fn get_str(&self, key: &str) -> Option<&'a str> {
        self.values.get(key).copied()
    }

    fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        self.get_str(key)
            .map(|value| parse_bool(key, value))
            .transpose()
    }

    fn get_count(&self, key: &str) -> Result<Option<usize>> {
        self.get_str(key)
            .map(|value| parse_count(key, value))
            .transpose()
    }

    fn get_f64(&self, key: &str) -> Result<Option<f64>> {
        self.get_str(key)
            .map(|value| parse_float(key, value))
            .transpose()
    }

    fn require_f64(&self, key: &str) -> Result<f64> {
        self.get_f64(key)?
            .ok_or_else(|| Error::MissingParameter(key.to_string()))
    }

    fn get_list(&self, key: &str) -> Option<Vec<String>> {
        self.get_str(key).map(parse_list)
    }
}

fn validate_kind(spec: &ParamSpec, value: &str) -> Result<()> {
    match spec.kind {
        ParamKind::Bool => parse_bool(spec.key, value).map(|_| ()),
        ParamKind::Count => parse_count(spec.key, value).map(|_| ()),
        ParamKind::Float => parse_float(spec.key, value).map(|_| ()),
        ParamKind::Text | ParamKind::List => Ok(()),
        ParamKind::Choice(choices) => {
            if choices.contains(&value) {
                Ok(())
            } else {
                Err(invalid(
                    spec.key,
                    format!("expected one of {}", choices.join(", ")),
                ))
            }
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(invalid(key, format!("'{value}' is not a boolean"))),
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize> {
    value
        .parse::<usize>()
        .map_err(|_| invalid(key, format!("'{value}' is not a non-negative integer")))
}

fn parse_float(key: &str, value: &str) -> Result<f64> {
    let parsed = value
        .parse::<f64>()
        .map_err(|_| invalid(key, format!("'{value}' is not a number")))?;
    if !parsed.is_finite() {
        return Err(invalid(key, "must be finite".to_string()));
    }
    Ok(parsed)
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn invalid(key: &str, message: String) -> Error {
    Error::InvalidParameter {
        key: key.to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_values_are_trimmed_and_blanks_dropped() {
        assert_eq!(parse_list(" a, b ,,c ,"), vec!["a", "b", "c"]);
        assert!(parse_list(" , ").is_empty());
    }

    #[test]
    fn bool_accepts_common_spellings() {
        assert!(parse_bool("flag", "Yes").expect("yes"));
        assert!(!parse_bool("flag", "0").expect("zero"));
        assert!(parse_bool("flag", "maybe").is_err());
    }
}

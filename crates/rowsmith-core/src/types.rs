use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const DEFAULT_STRING_LENGTH: usize = 10;
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_COUNTRY_CODE: &str = "+1";
pub const DEFAULT_PHONE_LENGTH: usize = 10;
pub const DEFAULT_MEAN: f64 = 0.0;
pub const DEFAULT_STDDEV: f64 = 1.0;

/// Closed set of column type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    String,
    Numeric,
    Date,
    Custom,
    SequentialId,
    Phone,
    Country,
}

impl ColumnType {
    pub const ALL: [ColumnType; 7] = [
        ColumnType::String,
        ColumnType::Numeric,
        ColumnType::Date,
        ColumnType::Custom,
        ColumnType::SequentialId,
        ColumnType::Phone,
        ColumnType::Country,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Numeric => "numeric",
            ColumnType::Date => "date",
            ColumnType::Custom => "custom",
            ColumnType::SequentialId => "id",
            ColumnType::Phone => "phone",
            ColumnType::Country => "country",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "string" => Ok(ColumnType::String),
            "numeric" => Ok(ColumnType::Numeric),
            "date" => Ok(ColumnType::Date),
            "custom" => Ok(ColumnType::Custom),
            "id" | "sequential_id" => Ok(ColumnType::SequentialId),
            "phone" => Ok(ColumnType::Phone),
            "country" => Ok(ColumnType::Country),
            other => Err(Error::UnknownColumnType(other.to_string())),
        }
    }
}

/// How values are meant to progress across rows.
///
/// Accepted for every column and persisted, but no generator reads it:
/// sequential ids are always sequential and every other type is sampled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ValueMode {
    #[default]
    Random,
    Sequential,
}

impl fmt::Display for ValueMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueMode::Random => f.write_str("random"),
            ValueMode::Sequential => f.write_str("sequential"),
        }
    }
}

impl FromStr for ValueMode {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "random" => Ok(ValueMode::Random),
            "sequential" => Ok(ValueMode::Sequential),
            other => Err(Error::UnknownValueMode(other.to_string())),
        }
    }
}

/// Type-specific generation parameters, one variant per [`ColumnType`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnKind {
    String(StringParams),
    Numeric(NumericParams),
    Date(DateParams),
    Custom(CustomParams),
    #[serde(rename = "id", alias = "sequential_id")]
    SequentialId,
    Phone(PhoneParams),
    Country,
}

impl ColumnKind {
    pub fn column_type(&self) -> ColumnType {
        match self {
            ColumnKind::String(_) => ColumnType::String,
            ColumnKind::Numeric(_) => ColumnType::Numeric,
            ColumnKind::Date(_) => ColumnType::Date,
            ColumnKind::Custom(_) => ColumnType::Custom,
            ColumnKind::SequentialId => ColumnType::SequentialId,
            ColumnKind::Phone(_) => ColumnType::Phone,
            ColumnKind::Country => ColumnType::Country,
        }
    }
}

/// Random strings drawn from letters plus optional digits and punctuation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StringParams {
    #[serde(default = "default_string_length")]
    pub length: usize,
    #[serde(default)]
    pub include_digits: bool,
    #[serde(default)]
    pub include_special: bool,
}

impl Default for StringParams {
    fn default() -> Self {
        Self {
            length: DEFAULT_STRING_LENGTH,
            include_digits: false,
            include_special: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NumericParams {
    pub distribution: Distribution,
}

/// Sampling mode for numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Distribution {
    /// Flat probability over `[start, end]`.
    Uniform {
        start: f64,
        end: f64,
        #[serde(default)]
        is_float: bool,
    },
    /// Gaussian draw; the result is always floating.
    Normal {
        #[serde(default = "default_mean")]
        mean: f64,
        #[serde(default = "default_stddev")]
        stddev: f64,
    },
}

/// Upper bound of a date range.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DateBound {
    /// The wall clock at generation time.
    #[default]
    Now,
    /// A date string parsed with the column format.
    At(String),
}

impl From<String> for DateBound {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("now") {
            DateBound::Now
        } else {
            DateBound::At(value)
        }
    }
}

impl Serialize for DateBound {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DateBound::Now => serializer.serialize_str("now"),
            DateBound::At(value) => serializer.serialize_str(value),
        }
    }
}

impl<'de> Deserialize<'de> for DateBound {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(DateBound::from)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DateParams {
    /// Lower bound; the Unix epoch when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default)]
    #[schemars(with = "String")]
    pub end_date: DateBound,
    /// strftime pattern used to parse both bounds and to format output.
    #[serde(default = "default_date_format")]
    pub format: String,
}

impl Default for DateParams {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: DateBound::Now,
            format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CustomParams {
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PhoneParams {
    #[serde(default = "default_country_code")]
    pub country_code: String,
    #[serde(default = "default_phone_length")]
    pub number_length: usize,
}

impl Default for PhoneParams {
    fn default() -> Self {
        Self {
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            number_length: DEFAULT_PHONE_LENGTH,
        }
    }
}

fn default_string_length() -> usize {
    DEFAULT_STRING_LENGTH
}

fn default_mean() -> f64 {
    DEFAULT_MEAN
}

fn default_stddev() -> f64 {
    DEFAULT_STDDEV
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_country_code() -> String {
    DEFAULT_COUNTRY_CODE.to_string()
}

fn default_phone_length() -> usize {
    DEFAULT_PHONE_LENGTH
}

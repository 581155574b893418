use chrono::NaiveDate;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use regex::Regex;

use rowsmith_core::{
    ColumnKind, CustomParams, DateBound, DateParams, Distribution, NumericParams, PhoneParams,
    Schema, StringParams, ValueMode,
};
use rowsmith_generate::generators::primitives::alphabet;
use rowsmith_generate::generators::semantic::COUNTRIES;
use rowsmith_generate::{
    CellValue, GenerateOptions, GenerationEngine, GenerationError, generate_rows,
    generate_rows_at,
};

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}

fn uniform(start: f64, end: f64, is_float: bool) -> ColumnKind {
    ColumnKind::Numeric(NumericParams {
        distribution: Distribution::Uniform {
            start,
            end,
            is_float,
        },
    })
}

fn date(start: &str, end: DateBound, format: &str) -> ColumnKind {
    ColumnKind::Date(DateParams {
        start_date: Some(start.to_string()),
        end_date: end,
        format: format.to_string(),
    })
}

fn mixed_schema() -> Schema {
    let mut schema = Schema::new();
    schema.add_column("id", ValueMode::Sequential, ColumnKind::SequentialId);
    schema.add_column(
        "name",
        ValueMode::Random,
        ColumnKind::String(StringParams::default()),
    );
    schema.add_column("age", ValueMode::Random, uniform(18.0, 65.0, false));
    schema.add_column(
        "joined",
        ValueMode::Random,
        date("2020-01-01", DateBound::At("2020-12-31".to_string()), "%Y-%m-%d"),
    );
    schema.add_column(
        "tier",
        ValueMode::Random,
        ColumnKind::Custom(CustomParams {
            values: vec!["gold".to_string(), "silver, plus".to_string()],
        }),
    );
    schema.add_column(
        "phone",
        ValueMode::Random,
        ColumnKind::Phone(PhoneParams::default()),
    );
    schema.add_column("country", ValueMode::Random, ColumnKind::Country);
    schema
}

#[test]
fn generates_requested_rows_in_schema_order() {
    let schema = mixed_schema();
    let rows = generate_rows(&schema, 25, &mut rng()).expect("generate rows");

    assert_eq!(rows.len(), 25);
    assert_eq!(rows.columns(), schema.column_names().as_slice());
    for row in &rows {
        let keys: Vec<&str> = row.iter().map(|(key, _)| key).collect();
        assert_eq!(
            keys,
            vec!["id", "name", "age", "joined", "tier", "phone", "country"]
        );
    }
}

#[test]
fn string_values_respect_length_and_alphabet() {
    for (include_digits, include_special) in [(false, false), (true, false), (true, true)] {
        let mut schema = Schema::new();
        schema.add_column(
            "code",
            ValueMode::Random,
            ColumnKind::String(StringParams {
                length: 12,
                include_digits,
                include_special,
            }),
        );
        let allowed = alphabet(include_digits, include_special);

        let rows = generate_rows(&schema, 50, &mut rng()).expect("generate rows");
        for value in rows.column_values("code") {
            let text = value.as_str().expect("text value");
            assert_eq!(text.chars().count(), 12);
            assert!(text.chars().all(|ch| allowed.contains(&ch)), "{text}");
        }
    }
}

#[test]
fn letters_only_strings_have_no_digits() {
    let mut schema = Schema::new();
    schema.add_column(
        "word",
        ValueMode::Random,
        ColumnKind::String(StringParams {
            length: 64,
            include_digits: false,
            include_special: false,
        }),
    );

    let rows = generate_rows(&schema, 20, &mut rng()).expect("generate rows");
    for value in rows.column_values("word") {
        let text = value.as_str().expect("text value");
        assert!(text.chars().all(|ch| ch.is_ascii_alphabetic()));
    }
}

#[test]
fn uniform_integer_with_equal_bounds_is_constant() {
    let mut schema = Schema::new();
    schema.add_column("five", ValueMode::Random, uniform(5.0, 5.0, false));

    let rows = generate_rows(&schema, 30, &mut rng()).expect("generate rows");
    assert!(rows.column_values("five").all(|value| *value == CellValue::Int(5)));
}

#[test]
fn uniform_float_stays_in_range() {
    let mut schema = Schema::new();
    schema.add_column("ratio", ValueMode::Random, uniform(0.0, 1.0, true));

    let rows = generate_rows(&schema, 200, &mut rng()).expect("generate rows");
    for value in rows.column_values("ratio") {
        let CellValue::Float(value) = value else {
            panic!("expected float, got {value:?}");
        };
        assert!((0.0..=1.0).contains(value));
    }
}

#[test]
fn uniform_integer_stays_in_range() {
    let mut schema = Schema::new();
    schema.add_column("dice", ValueMode::Sequential, uniform(1.0, 6.0, false));

    let rows = generate_rows(&schema, 200, &mut rng()).expect("generate rows");
    for value in rows.column_values("dice") {
        let value = value.as_i64().expect("integer value");
        assert!((1..=6).contains(&value));
    }
}

#[test]
fn normal_with_zero_stddev_returns_mean() {
    let mut schema = Schema::new();
    schema.add_column(
        "score",
        ValueMode::Random,
        ColumnKind::Numeric(NumericParams {
            distribution: Distribution::Normal {
                mean: 100.0,
                stddev: 0.0,
            },
        }),
    );

    let rows = generate_rows(&schema, 10, &mut rng()).expect("generate rows");
    assert!(rows
        .column_values("score")
        .all(|value| *value == CellValue::Float(100.0)));
}

#[test]
fn normal_rejects_negative_stddev() {
    let mut schema = Schema::new();
    schema.add_column(
        "score",
        ValueMode::Random,
        ColumnKind::Numeric(NumericParams {
            distribution: Distribution::Normal {
                mean: 0.0,
                stddev: -1.0,
            },
        }),
    );

    let result = generate_rows(&schema, 10, &mut rng());
    assert!(matches!(result, Err(GenerationError::InvalidParams { column, .. }) if column == "score"));
}

#[test]
fn normal_draws_that_overflow_fail_instead_of_yielding_infinity() {
    let mut schema = Schema::new();
    schema.add_column(
        "huge",
        ValueMode::Random,
        ColumnKind::Numeric(NumericParams {
            distribution: Distribution::Normal {
                mean: 1e308,
                stddev: 1e308,
            },
        }),
    );

    let result = generate_rows(&schema, 200, &mut rng());
    assert!(matches!(result, Err(GenerationError::InvalidParams { column, .. }) if column == "huge"));
}

#[test]
fn single_day_date_range_is_constant() {
    let mut schema = Schema::new();
    schema.add_column(
        "day",
        ValueMode::Random,
        date("2020-01-01", DateBound::At("2020-01-01".to_string()), "%Y-%m-%d"),
    );

    let rows = generate_rows(&schema, 20, &mut rng()).expect("generate rows");
    assert!(rows
        .column_values("day")
        .all(|value| value.as_str() == Some("2020-01-01")));
}

#[test]
fn dates_fall_within_bounds_and_use_format() {
    let mut schema = Schema::new();
    schema.add_column(
        "day",
        ValueMode::Random,
        date("01-03-2021", DateBound::At("31-03-2021".to_string()), "%d-%m-%Y"),
    );

    let rows = generate_rows(&schema, 100, &mut rng()).expect("generate rows");
    let first = NaiveDate::from_ymd_opt(2021, 3, 1).expect("start");
    let last = NaiveDate::from_ymd_opt(2021, 3, 31).expect("end");
    for value in rows.column_values("day") {
        let text = value.as_str().expect("text value");
        let parsed = NaiveDate::parse_from_str(text, "%d-%m-%Y").expect("formatted date");
        assert!(parsed >= first && parsed <= last, "{text}");
    }
}

#[test]
fn open_date_range_ends_at_now() {
    let mut schema = Schema::new();
    schema.add_column(
        "day",
        ValueMode::Random,
        date("2024-05-06", DateBound::Now, "%Y-%m-%d"),
    );
    let now = NaiveDate::from_ymd_opt(2024, 5, 6)
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .expect("now");

    let rows = generate_rows_at(&schema, 5, now, &mut rng()).expect("generate rows");
    assert!(rows
        .column_values("day")
        .all(|value| value.as_str() == Some("2024-05-06")));
}

#[test]
fn missing_start_date_defaults_to_epoch() {
    let mut schema = Schema::new();
    schema.add_column(
        "day",
        ValueMode::Random,
        ColumnKind::Date(DateParams {
            start_date: None,
            end_date: DateBound::At("1970-01-01".to_string()),
            format: "%Y-%m-%d".to_string(),
        }),
    );

    let rows = generate_rows(&schema, 3, &mut rng()).expect("generate rows");
    assert!(rows
        .column_values("day")
        .all(|value| value.as_str() == Some("1970-01-01")));
}

#[test]
fn year_only_format_draws_whole_years() {
    let mut schema = Schema::new();
    schema.add_column(
        "year",
        ValueMode::Random,
        date("2000", DateBound::At("2005".to_string()), "%Y"),
    );

    let rows = generate_rows(&schema, 50, &mut rng()).expect("generate rows");
    for value in rows.column_values("year") {
        let year: i32 = value.as_str().expect("text").parse().expect("year");
        assert!((2000..=2005).contains(&year), "{year}");
    }
}

#[test]
fn inverted_or_unparsable_dates_fail() {
    let mut schema = Schema::new();
    schema.add_column(
        "day",
        ValueMode::Random,
        date("2021-01-02", DateBound::At("2021-01-01".to_string()), "%Y-%m-%d"),
    );
    let result = generate_rows(&schema, 3, &mut rng());
    assert!(matches!(result, Err(GenerationError::DateRange { column, .. }) if column == "day"));

    let mut schema = Schema::new();
    schema.add_column(
        "day",
        ValueMode::Random,
        date("January first", DateBound::Now, "%Y-%m-%d"),
    );
    let result = generate_rows(&schema, 3, &mut rng());
    assert!(matches!(result, Err(GenerationError::DateRange { .. })));
}

#[test]
fn sequential_ids_ignore_value_mode() {
    for mode in [ValueMode::Random, ValueMode::Sequential] {
        let mut schema = Schema::new();
        schema.add_column("id", mode, ColumnKind::SequentialId);
        schema.add_column("country", ValueMode::Random, ColumnKind::Country);

        let rows = generate_rows(&schema, 5, &mut rng()).expect("generate rows");
        let ids: Vec<i64> = rows
            .column_values("id")
            .map(|value| value.as_i64().expect("integer id"))
            .collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }
}

#[test]
fn phone_numbers_follow_country_code_and_length() {
    let mut schema = Schema::new();
    schema.add_column(
        "phone",
        ValueMode::Random,
        ColumnKind::Phone(PhoneParams {
            country_code: "+44".to_string(),
            number_length: 7,
        }),
    );
    let pattern = Regex::new(r"^\+44[0-9]{7}$").expect("regex");

    let rows = generate_rows(&schema, 50, &mut rng()).expect("generate rows");
    for value in rows.column_values("phone") {
        let text = value.as_str().expect("text value");
        assert!(pattern.is_match(text), "{text}");
    }
}

#[test]
fn oversized_lengths_fail_before_generation() {
    let mut schema = Schema::new();
    schema.add_column(
        "phone",
        ValueMode::Random,
        ColumnKind::Phone(PhoneParams {
            country_code: "+1".to_string(),
            number_length: usize::MAX,
        }),
    );
    let result = generate_rows(&schema, 1, &mut rng());
    assert!(matches!(result, Err(GenerationError::InvalidParams { column, .. }) if column == "phone"));

    let mut schema = Schema::new();
    schema.add_column(
        "label",
        ValueMode::Random,
        ColumnKind::String(StringParams {
            length: usize::MAX,
            ..StringParams::default()
        }),
    );
    let result = generate_rows(&schema, 1, &mut rng());
    assert!(matches!(result, Err(GenerationError::InvalidParams { column, .. }) if column == "label"));
}

#[test]
fn countries_and_custom_values_come_from_their_lists() {
    let schema = mixed_schema();
    let rows = generate_rows(&schema, 100, &mut rng()).expect("generate rows");

    for value in rows.column_values("country") {
        let text = value.as_str().expect("text value");
        assert!(COUNTRIES.contains(&text), "{text}");
    }
    for value in rows.column_values("tier") {
        let text = value.as_str().expect("text value");
        assert!(text == "gold" || text == "silver, plus", "{text}");
    }
}

#[test]
fn empty_custom_values_fail() {
    let mut schema = Schema::new();
    schema.add_column("id", ValueMode::Random, ColumnKind::SequentialId);
    schema.add_column(
        "choice",
        ValueMode::Random,
        ColumnKind::Custom(CustomParams { values: Vec::new() }),
    );

    let result = generate_rows(&schema, 5, &mut rng());
    assert!(matches!(result, Err(GenerationError::EmptyChoices { column }) if column == "choice"));
}

#[test]
fn zero_rows_are_rejected() {
    let schema = mixed_schema();
    let result = generate_rows(&schema, 0, &mut rng());
    assert!(matches!(result, Err(GenerationError::InvalidRowCount(0))));
}

#[test]
fn inverted_uniform_bounds_fail() {
    let mut schema = Schema::new();
    schema.add_column("n", ValueMode::Random, uniform(10.0, 1.0, true));

    let result = generate_rows(&schema, 1, &mut rng());
    assert!(matches!(result, Err(GenerationError::InvalidParams { .. })));
}

#[test]
fn seeded_engine_is_deterministic() {
    let schema = mixed_schema();
    let engine = GenerationEngine::new(GenerateOptions { seed: Some(7) });

    let first = engine.generate(&schema, 40).expect("first run");
    let second = engine.generate(&schema, 40).expect("second run");

    assert_eq!(first.rows, second.rows);
    assert_eq!(first.report.seed, 7);
    assert_eq!(first.report.rows_generated, 40);
    assert_eq!(first.report.columns, 7);
    assert_eq!(first.report.generator_usage.get("semantic.country"), Some(&1));
}

#[test]
fn engine_reports_drawn_seed() {
    let schema = mixed_schema();
    let engine = GenerationEngine::default();

    let result = engine.generate(&schema, 3).expect("generate");
    let replay = GenerationEngine::new(GenerateOptions {
        seed: Some(result.report.seed),
    })
    .generate(&schema, 3)
    .expect("replay");

    assert_eq!(result.rows, replay.rows);
}

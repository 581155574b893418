use rowsmith_core::{
    ColumnKind, ColumnType, CustomParams, DateBound, DateParams, Distribution, Error,
    NumericParams, ParameterBag, PhoneParams, Requirement, StringParams,
};

fn bag(pairs: &[(&str, &str)]) -> ParameterBag {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

#[test]
fn string_parameters_default_optional_values() {
    let kind = ColumnKind::from_parameters(ColumnType::String, &bag(&[])).expect("string kind");
    assert_eq!(kind, ColumnKind::String(StringParams::default()));

    let kind = ColumnKind::from_parameters(
        ColumnType::String,
        &bag(&[("length", "4"), ("include_digits", "true")]),
    )
    .expect("string kind");
    assert_eq!(
        kind,
        ColumnKind::String(StringParams {
            length: 4,
            include_digits: true,
            include_special: false,
        })
    );
}

#[test]
fn uniform_numeric_requires_bounds() {
    let result = ColumnKind::from_parameters(ColumnType::Numeric, &bag(&[("start", "1")]));
    assert!(matches!(result, Err(Error::MissingParameter(key)) if key == "end"));

    let kind = ColumnKind::from_parameters(
        ColumnType::Numeric,
        &bag(&[("start", "1"), ("end", "9.5"), ("is_float", "yes")]),
    )
    .expect("numeric kind");
    assert_eq!(
        kind,
        ColumnKind::Numeric(NumericParams {
            distribution: Distribution::Uniform {
                start: 1.0,
                end: 9.5,
                is_float: true,
            },
        })
    );
}

#[test]
fn normal_numeric_defaults_mean_and_stddev() {
    let kind = ColumnKind::from_parameters(
        ColumnType::Numeric,
        &bag(&[("distribution", "normal"), ("mean", "")]),
    )
    .expect("numeric kind");
    assert_eq!(
        kind,
        ColumnKind::Numeric(NumericParams {
            distribution: Distribution::Normal {
                mean: 0.0,
                stddev: 1.0,
            },
        })
    );
}

#[test]
fn non_numeric_text_is_rejected() {
    let result = ColumnKind::from_parameters(
        ColumnType::Numeric,
        &bag(&[("start", "ten"), ("end", "20")]),
    );
    assert!(matches!(result, Err(Error::InvalidParameter { key, .. }) if key == "start"));

    let result = ColumnKind::from_parameters(ColumnType::String, &bag(&[("length", "-3")]));
    assert!(matches!(result, Err(Error::InvalidParameter { key, .. }) if key == "length"));

    let result = ColumnKind::from_parameters(
        ColumnType::Numeric,
        &bag(&[("distribution", "poisson")]),
    );
    assert!(matches!(result, Err(Error::InvalidParameter { key, .. }) if key == "distribution"));
}

#[test]
fn parameters_from_other_types_are_rejected() {
    let result = ColumnKind::from_parameters(ColumnType::Phone, &bag(&[("length", "5")]));
    assert!(matches!(
        result,
        Err(Error::UnknownParameter { key, column_type }) if key == "length" && column_type == "phone"
    ));

    let result = ColumnKind::from_parameters(ColumnType::Country, &bag(&[("values", "a")]));
    assert!(matches!(result, Err(Error::UnknownParameter { .. })));
}

#[test]
fn date_custom_and_phone_parameters() {
    let kind = ColumnKind::from_parameters(
        ColumnType::Date,
        &bag(&[("start_date", "01-01-2020"), ("end_date", "NOW"), ("format", "%d-%m-%Y")]),
    )
    .expect("date kind");
    assert_eq!(
        kind,
        ColumnKind::Date(DateParams {
            start_date: Some("01-01-2020".to_string()),
            end_date: DateBound::Now,
            format: "%d-%m-%Y".to_string(),
        })
    );

    let kind = ColumnKind::from_parameters(ColumnType::Custom, &bag(&[("values", "red, green ,blue")]))
        .expect("custom kind");
    assert_eq!(
        kind,
        ColumnKind::Custom(CustomParams {
            values: vec!["red".to_string(), "green".to_string(), "blue".to_string()],
        })
    );

    let result = ColumnKind::from_parameters(ColumnType::Custom, &bag(&[]));
    assert!(matches!(result, Err(Error::MissingParameter(key)) if key == "values"));

    let kind = ColumnKind::from_parameters(ColumnType::Phone, &bag(&[("country_code", "+44")]))
        .expect("phone kind");
    assert_eq!(
        kind,
        ColumnKind::Phone(PhoneParams {
            country_code: "+44".to_string(),
            number_length: 10,
        })
    );
}

#[test]
fn visible_parameters_follow_column_type() {
    let keys = |column_type: ColumnType| -> Vec<&'static str> {
        column_type
            .parameter_specs()
            .iter()
            .map(|spec| spec.key)
            .collect()
    };

    assert_eq!(
        keys(ColumnType::String),
        vec!["length", "include_digits", "include_special"]
    );
    assert_eq!(keys(ColumnType::Date), vec!["start_date", "end_date", "format"]);
    assert_eq!(keys(ColumnType::Phone), vec!["country_code", "number_length"]);
    assert!(keys(ColumnType::SequentialId).is_empty());
    assert!(keys(ColumnType::Country).is_empty());

    let required: Vec<&str> = ColumnType::Custom
        .parameter_specs()
        .iter()
        .filter(|spec| spec.requirement == Requirement::Required)
        .map(|spec| spec.key)
        .collect();
    assert_eq!(required, vec!["values"]);
}

#[test]
fn column_type_tags_parse() {
    assert_eq!("id".parse::<ColumnType>().expect("id"), ColumnType::SequentialId);
    assert_eq!(
        "Sequential_Id".parse::<ColumnType>().expect("alias"),
        ColumnType::SequentialId
    );
    assert!(matches!(
        "blob".parse::<ColumnType>(),
        Err(Error::UnknownColumnType(tag)) if tag == "blob"
    ));
    for column_type in ColumnType::ALL {
        assert_eq!(
            column_type.to_string().parse::<ColumnType>().expect("round trip"),
            column_type
        );
    }
}

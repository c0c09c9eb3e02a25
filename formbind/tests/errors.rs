use std::collections::HashMap;

use formbind::{Decoder, DecodeErrorKind, FormBind};

type Input<'a> = [(&'a str, &'a [&'a str])];

#[cfg(feature = "time")]
mod every_kind {
    use super::*;
    use formbind::{ConversionKind, OrderedFloat};
    use time::OffsetDateTime;

    #[derive(FormBind, Debug, Default)]
    struct TestError {
        #[formbind(form = "bool")]
        truthy: bool,
        int: i64,
        int8: i8,
        int16: i16,
        int32: i32,
        uint: u64,
        uint8: u8,
        uint16: u16,
        uint32: u32,
        float32: f32,
        float64: f64,
        string: String,
        time: Option<OffsetDateTime>,
        map_bad_int_key: HashMap<i64, i64>,
        map_bad_int8_key: HashMap<i8, i8>,
        map_bad_int16_key: HashMap<i16, i16>,
        map_bad_int32_key: HashMap<i32, i32>,
        map_bad_uint_key: HashMap<u64, u64>,
        map_bad_uint8_key: HashMap<u8, u8>,
        map_bad_uint16_key: HashMap<u16, u16>,
        map_bad_uint32_key: HashMap<u32, u32>,
        map_bad_float32_key: HashMap<OrderedFloat<f32>, f32>,
        map_bad_float64_key: HashMap<OrderedFloat<f64>, f64>,
        map_bad_bool_key: HashMap<bool, bool>,
        map_bad_key_type: HashMap<Vec<i32>, i32>,
        bad_array_value: Vec<i64>,
        bad_map_key: HashMap<OffsetDateTime, String>,
        overflow_nil_array: Vec<i64>,
        overflow_existing_array: Vec<i64>,
        bad_array_index: Vec<i64>,
    }

    #[test]
    fn every_failing_key_is_reported() {
        formbind_testhelpers::setup();

        let input: &Input = &[
            ("bool", &["uh-huh"]),
            ("int", &["bad"]),
            ("int8", &["bad"]),
            ("int16", &["bad"]),
            ("int32", &["bad"]),
            ("uint", &["bad"]),
            ("uint8", &["bad"]),
            ("uint16", &["bad"]),
            ("uint32", &["bad"]),
            ("float32", &["bad"]),
            ("float64", &["bad"]),
            ("string", &["str bad return val"]),
            ("time", &["bad"]),
            ("map_bad_int_key[key]", &["1"]),
            ("map_bad_int8_key[key]", &["1"]),
            ("map_bad_int16_key[key]", &["1"]),
            ("map_bad_int32_key[key]", &["1"]),
            ("map_bad_uint_key[key]", &["1"]),
            ("map_bad_uint8_key[key]", &["1"]),
            ("map_bad_uint16_key[key]", &["1"]),
            ("map_bad_uint32_key[key]", &["1"]),
            ("map_bad_float32_key[key]", &["1.1"]),
            ("map_bad_float64_key[key]", &["1.1"]),
            ("map_bad_bool_key[uh-huh]", &["true"]),
            ("map_bad_key_type[1.4]", &["5"]),
            ("bad_array_value[0]", &["badintval"]),
            ("bad_map_key[badtime]", &["badtime"]),
            ("overflow_nil_array[999]", &["idx 1000"]),
            ("overflow_existing_array[999]", &["idx 1000"]),
            ("bad_array_index[bad index]", &["bad idx"]),
        ];

        let mut test = TestError {
            overflow_existing_array: vec![0; 2],
            ..Default::default()
        };
        let decoder = Decoder::new()
            .with_tag_name("form")
            .with_max_array_size(4)
            .with_custom_type_func(|_: &[String]| Err::<String, _>("Bad Type Conversion"));

        let errors = decoder.decode(&mut test, input).unwrap_err();
        assert_eq!(errors.len(), 30);

        let text = |ns: &str| errors.get(ns).map(ToString::to_string).unwrap_or_default();
        assert_eq!(
            text("bool"),
            "Invalid Boolean Value 'uh-huh' Type 'bool' Namespace 'bool'"
        );
        assert_eq!(
            text("int"),
            "Invalid Integer Value 'bad' Type 'i64' Namespace 'int'"
        );
        assert_eq!(
            text("int8"),
            "Invalid Integer Value 'bad' Type 'i8' Namespace 'int8'"
        );
        assert_eq!(
            text("uint16"),
            "Invalid Unsigned Integer Value 'bad' Type 'u16' Namespace 'uint16'"
        );
        assert_eq!(
            text("float32"),
            "Invalid Float Value 'bad' Type 'f32' Namespace 'float32'"
        );
        assert_eq!(text("string"), "Bad Type Conversion");
        assert_eq!(
            text("time"),
            "Invalid Time Value 'bad' Type 'OffsetDateTime' Namespace 'time'"
        );
        assert_eq!(
            text("map_bad_int_key"),
            "Invalid Integer Value 'key' Type 'i64' Namespace 'map_bad_int_key'"
        );
        assert_eq!(
            text("map_bad_uint32_key"),
            "Invalid Unsigned Integer Value 'key' Type 'u32' Namespace 'map_bad_uint32_key'"
        );
        assert_eq!(
            text("map_bad_float64_key"),
            "Invalid Float Value 'key' Type 'OrderedFloat<f64>' Namespace 'map_bad_float64_key'"
        );
        assert_eq!(
            text("map_bad_bool_key"),
            "Invalid Boolean Value 'uh-huh' Type 'bool' Namespace 'map_bad_bool_key'"
        );
        assert_eq!(
            text("map_bad_key_type"),
            "Unsupported Map Key '1.4', Type 'Vec' Namespace 'map_bad_key_type'"
        );
        assert_eq!(
            text("bad_array_value[0]"),
            "Invalid Integer Value 'badintval' Type 'i64' Namespace 'bad_array_value[0]'"
        );
        assert_eq!(
            text("bad_map_key"),
            "Invalid Time Value 'badtime' Type 'OffsetDateTime' Namespace 'bad_map_key'"
        );
        insta::assert_snapshot!(
            text("overflow_nil_array"),
            @"Array size of '1000' is larger than the maximum currently set on the decoder of '4'. To increase this limit please see, set_max_array_size(size)"
        );
        assert_eq!(
            text("overflow_existing_array"),
            text("overflow_nil_array")
        );
        assert_eq!(text("bad_array_index"), "Invalid Array index 'bad index'");

        assert!(matches!(
            errors.get("int32").map(|e| e.kind()),
            Some(DecodeErrorKind::Conversion {
                kind: ConversionKind::Integer,
                type_name: "i32",
                ..
            })
        ));
        assert!(matches!(
            errors.get("string").map(|e| e.kind()),
            Some(DecodeErrorKind::Custom(_))
        ));

        // failed keys leave their destinations alone
        assert!(!test.truthy);
        assert_eq!(test.string, "");
        assert_eq!(test.time, None);
        assert!(test.overflow_nil_array.is_empty());
        assert_eq!(test.overflow_existing_array, [0, 0]);
        assert!(test.bad_map_key.is_empty());
        assert!(test.bad_array_value.is_empty());
    }
}

#[derive(FormBind, Debug, Default, PartialEq)]
struct Phone {
    number: String,
}

#[derive(FormBind, Debug, Default)]
struct Person {
    name: String,
    phone: Vec<Phone>,
    age: u8,
}

#[test]
fn malformed_keys_abort_the_whole_decode() {
    formbind_testhelpers::setup();

    let input: &Input = &[
        ("name", &["untouched"]),
        ("phone[0.number", &["1"]),
        ("phone[[0.number", &["2"]),
        ("phone0].number", &["3"]),
        ("phone0]].number", &["4"]),
        ("age", &["12"]),
    ];
    let mut person = Person::default();
    let errors = Decoder::new().decode(&mut person, input).unwrap_err();

    insta::assert_snapshot!(errors, @r"
    Invalid formatting for key 'phone0].number' missing '[' bracket
    Invalid formatting for key 'phone0]].number' missing '[' bracket
    Invalid formatting for key 'phone[0.number' missing ']' bracket
    Invalid formatting for key 'phone[[0.number' missing ']' bracket
    ");
    for (ns, err) in errors.iter() {
        assert_eq!(ns, err.namespace());
        assert_eq!(err.kind().code(), "formbind::malformed_path");
    }
    assert_eq!(person.name, "");
    assert!(person.phone.is_empty());
    assert_eq!(person.age, 0);
}

#[test]
fn other_keys_still_decode_when_some_fail() {
    formbind_testhelpers::setup();

    let input: &Input = &[
        ("name", &["Ann"]),
        ("age", &["old"]),
        ("phone[0].number", &["1"]),
        ("phone[x].number", &["2"]),
    ];
    let mut person = Person::default();
    let errors = Decoder::new().decode(&mut person, input).unwrap_err();

    assert_eq!(errors.len(), 2);
    assert!(errors.get("age").is_some());
    assert!(errors.get("phone").is_some());
    assert_eq!(person.name, "Ann");
    assert_eq!(
        person.phone,
        [Phone {
            number: "1".into()
        }]
    );
}

#[test]
fn roots_must_be_records_or_sequences() {
    formbind_testhelpers::setup();

    let input: &Input = &[("a", &["1"])];

    let mut scalar = 5i32;
    let errors = Decoder::new().decode(&mut scalar, input).unwrap_err();
    insta::assert_snapshot!(errors, @"Unsupported Type 'i32' Namespace ''");
    assert_eq!(scalar, 5);

    let mut map: HashMap<String, String> = HashMap::new();
    let errors = Decoder::new().decode(&mut map, input).unwrap_err();
    assert!(matches!(
        errors.get("").map(|e| e.kind()),
        Some(DecodeErrorKind::UnsupportedDestinationKind {
            type_name: "HashMap"
        })
    ));
    assert!(map.is_empty());

    let mut option: Option<Person> = None;
    let errors = Decoder::new().decode(&mut option, input).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(option.is_none());
}

#[test]
fn empty_input_is_a_no_op() {
    formbind_testhelpers::setup();

    let input: &Input = &[];
    let mut person = Person {
        name: "kept".into(),
        ..Default::default()
    };
    assert!(Decoder::new().decode(&mut person, input).is_ok());
    assert_eq!(person.name, "kept");

    // the empty key names nothing
    let input: &Input = &[("", &["ignored"])];
    assert!(Decoder::new().decode(&mut person, input).is_ok());
    assert_eq!(person.name, "kept");
}

#[test]
fn results_do_not_depend_on_input_order() {
    formbind_testhelpers::setup();

    let forward: Vec<(&str, Vec<&str>)> = vec![
        ("phone[1].number", vec!["b"]),
        ("phone[0].number", vec!["a"]),
        ("age", vec!["x"]),
        ("name", vec!["n"]),
    ];
    let backward: Vec<(&str, Vec<&str>)> = forward.iter().rev().cloned().collect();
    let hashed: HashMap<&str, Vec<&str>> = forward.iter().cloned().collect();

    let decoder = Decoder::new();
    let mut outcomes = Vec::new();
    for run in 0..3 {
        let mut person = Person::default();
        let errors = match run {
            0 => decoder.decode(&mut person, &forward),
            1 => decoder.decode(&mut person, &backward),
            _ => decoder.decode(&mut person, &hashed),
        }
        .unwrap_err();
        outcomes.push((format!("{person:?}"), errors.to_string()));
    }
    assert_eq!(outcomes[0], outcomes[1]);
    assert_eq!(outcomes[1], outcomes[2]);
}

#[test]
fn errors_are_std_errors() {
    formbind_testhelpers::setup();

    fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}

    let input: &Input = &[("age", &["-1"])];
    let mut person = Person::default();
    let errors = Decoder::new().decode(&mut person, input).unwrap_err();
    assert_error(&errors);

    let err = errors.get("age").unwrap();
    assert_error(err);
    assert_eq!(err.namespace(), "age");
    assert_eq!(err.kind().code(), "formbind::conversion");
    assert!(std::error::Error::source(err).is_none());
}

#[cfg(feature = "miette")]
mod diagnostics {
    use miette::Diagnostic;

    use super::*;

    #[test]
    fn malformed_keys_point_at_the_offending_bracket() {
        formbind_testhelpers::setup();

        let input: &Input = &[("phone[0.number", &["1"])];
        let mut person = Person::default();
        let errors = Decoder::new().decode(&mut person, input).unwrap_err();

        assert_eq!(
            errors.code().map(|c| c.to_string()).as_deref(),
            Some("formbind::decode")
        );
        assert_eq!(errors.related().map(Iterator::count), Some(1));

        let err = errors.get("phone[0.number").unwrap();
        assert_eq!(
            err.code().map(|c| c.to_string()).as_deref(),
            Some("formbind::malformed_path")
        );
        assert!(err.source_code().is_some());
        let labels: Vec<_> = err.labels().into_iter().flatten().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 5);
        assert_eq!(labels[0].label(), Some("this `[` is never closed"));
    }

    #[test]
    fn limits_come_with_help() {
        formbind_testhelpers::setup();

        let input: &Input = &[("phone[9]", &["1"])];
        let mut person = Person::default();
        let errors = Decoder::new()
            .with_max_array_size(2)
            .decode(&mut person, input)
            .unwrap_err();
        let help = errors
            .get("phone")
            .and_then(|e| e.help())
            .map(|h| h.to_string());
        assert_eq!(
            help.as_deref(),
            Some("raise the limit with Decoder::set_max_array_size")
        );
    }
}

use std::collections::{BTreeMap, HashMap};

use formbind::{Decoder, DecodeErrorKind, FormBind, OrderedFloat};
use formbind_testhelpers::IPanic;

type Input<'a> = [(&'a str, &'a [&'a str])];

#[derive(FormBind, Debug, Default)]
struct Keys {
    map_int: HashMap<i64, i32>,
    map_int8: HashMap<i8, u8>,
    map_uint: HashMap<u32, String>,
    map_float: HashMap<OrderedFloat<f64>, f32>,
    map_bool: BTreeMap<bool, String>,
    map_char: BTreeMap<char, i8>,
    map_string: HashMap<String, String>,
    map_nested: HashMap<i32, HashMap<i32, String>>,
    map_ptr: HashMap<String, Option<i32>>,
}

#[test]
fn every_scalar_can_key_a_map() -> Result<(), IPanic> {
    formbind_testhelpers::setup();

    let input: &Input = &[
        ("map_int[-3]", &["3"]),
        ("map_int8[3]", &["3"]),
        ("map_uint[3]", &["3"]),
        ("map_float[1.1]", &["1.1"]),
        ("map_bool[true]", &["yes"]),
        ("map_char[z]", &["-1"]),
        ("map_string[2016-01-02]", &["time"]),
        ("map_string[a.b]", &["dotted"]),
        ("map_string[0]", &["index-shaped"]),
        ("map_nested[1][2]", &["nested"]),
        ("map_ptr[key]", &["7"]),
    ];
    let mut keys = Keys::default();
    Decoder::new().decode(&mut keys, input)?;

    assert_eq!(keys.map_int, HashMap::from([(-3, 3)]));
    assert_eq!(keys.map_int8, HashMap::from([(3, 3)]));
    assert_eq!(keys.map_uint.get(&3).map(String::as_str), Some("3"));
    assert_eq!(keys.map_float, HashMap::from([(OrderedFloat(1.1), 1.1)]));
    assert_eq!(keys.map_bool.get(&true).map(String::as_str), Some("yes"));
    assert_eq!(keys.map_char, BTreeMap::from([('z', -1)]));
    assert_eq!(keys.map_string.len(), 3);
    assert_eq!(keys.map_string["2016-01-02"], "time");
    assert_eq!(keys.map_string["a.b"], "dotted");
    assert_eq!(keys.map_string["0"], "index-shaped");
    assert_eq!(keys.map_nested[&1][&2], "nested");
    assert_eq!(keys.map_ptr.get("key"), Some(&Some(7)));
    Ok(())
}

#[derive(FormBind, Debug, Default, Clone, PartialEq)]
struct Contact {
    email: String,
    phones: Vec<String>,
}

#[derive(FormBind, Debug, Default)]
struct Directory {
    people: BTreeMap<String, Contact>,
}

#[test]
fn maps_of_records_reuse_entries() -> Result<(), IPanic> {
    formbind_testhelpers::setup();

    let mut dir = Directory {
        people: BTreeMap::from([(
            "ann".to_string(),
            Contact {
                email: "ann@old".into(),
                phones: vec!["1".into()],
            },
        )]),
    };
    let input: &Input = &[
        ("people[ann].email", &["ann@new"]),
        ("people[bob].phones[1]", &["2"]),
    ];
    Decoder::new().decode(&mut dir, input)?;

    assert_eq!(
        dir.people["ann"],
        Contact {
            email: "ann@new".into(),
            phones: vec!["1".into()],
        }
    );
    assert_eq!(dir.people["bob"].phones, ["", "2"]);
    assert_eq!(dir.people.len(), 2);
    Ok(())
}

#[test]
fn a_key_that_ends_at_a_map_is_ignored() -> Result<(), IPanic> {
    formbind_testhelpers::setup();

    let input: &Input = &[("people", &["nothing to key by"]), ("people.ann", &["x"])];
    let mut dir = Directory::default();
    Decoder::new().decode(&mut dir, input)?;
    assert!(dir.people.is_empty());
    Ok(())
}

#[derive(FormBind, Debug, Default)]
struct BadKeys {
    map_bad_int_key: HashMap<i32, i32>,
    map_bad_uint_key: HashMap<u16, i32>,
    map_bad_float_key: HashMap<OrderedFloat<f32>, i32>,
    map_bad_bool_key: HashMap<bool, i32>,
    map_bad_char_key: HashMap<char, i32>,
    map_bad_value: HashMap<String, i32>,
    map_vec_key: HashMap<Vec<u8>, i32>,
}

#[test]
fn bad_map_keys_are_reported_at_the_map() {
    formbind_testhelpers::setup();

    let input: &Input = &[
        ("map_bad_int_key[key]", &["1"]),
        ("map_bad_uint_key[-1]", &["1"]),
        ("map_bad_float_key[key]", &["1"]),
        ("map_bad_bool_key[uh-huh]", &["1"]),
        ("map_bad_char_key[ab]", &["1"]),
        ("map_bad_value[key]", &["x"]),
        ("map_vec_key[1.4]", &["1"]),
    ];
    let mut keys = BadKeys::default();
    let errors = Decoder::new().decode(&mut keys, input).unwrap_err();

    insta::assert_snapshot!(errors, @r"
    Invalid Boolean Value 'uh-huh' Type 'bool' Namespace 'map_bad_bool_key'
    Invalid Character Value 'ab' Type 'char' Namespace 'map_bad_char_key'
    Invalid Float Value 'key' Type 'OrderedFloat<f32>' Namespace 'map_bad_float_key'
    Invalid Integer Value 'key' Type 'i32' Namespace 'map_bad_int_key'
    Invalid Unsigned Integer Value '-1' Type 'u16' Namespace 'map_bad_uint_key'
    Invalid Integer Value 'x' Type 'i32' Namespace 'map_bad_value[key]'
    Unsupported Map Key '1.4', Type 'Vec' Namespace 'map_vec_key'
    ");
    assert!(matches!(
        errors.get("map_vec_key").map(|e| e.kind()),
        Some(DecodeErrorKind::UnsupportedMapKeyType { .. })
    ));

    assert!(keys.map_bad_int_key.is_empty());
    assert!(keys.map_vec_key.is_empty());
    // the entry exists; only its value failed to parse
    assert_eq!(keys.map_bad_value.get("key"), Some(&0));
}

#[cfg(feature = "indexmap")]
mod insertion_ordered {
    use super::*;
    use indexmap::IndexMap;

    #[derive(FormBind, Debug, Default)]
    struct Ordered {
        fields: IndexMap<String, u8>,
    }

    #[test]
    fn index_maps_decode_in_key_order() -> Result<(), IPanic> {
        formbind_testhelpers::setup();

        let input: IndexMap<&str, Vec<&str>> = IndexMap::from([
            ("fields[b]", vec!["2"]),
            ("fields[a]", vec!["1"]),
        ]);
        let mut dst = Ordered::default();
        Decoder::new().decode(&mut dst, &input)?;
        let keys: Vec<&str> = dst.fields.keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "b"]);
        Ok(())
    }
}

#[test]
fn a_bad_bool_key_creates_no_entry() {
    formbind_testhelpers::setup();

    let input: &Input = &[("map_bad_bool_key[uh-huh]", &["true"])];
    let mut keys = BadKeys::default();
    let errors = Decoder::new().decode(&mut keys, input).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(keys.map_bad_bool_key.is_empty());
}

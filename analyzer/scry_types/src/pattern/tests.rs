use pretty_assertions::assert_eq;
use scry_collections::FrozenBag;
use scry_ir::{Datum, Real};

use super::*;

fn ok<T, E: std::fmt::Display>(result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("unexpected error: {err}"),
    }
}

fn int_pattern(values: impl IntoIterator<Item = i64>) -> Int {
    ok(Int::new(values.into_iter().collect()))
}

fn float_pattern(values: impl IntoIterator<Item = f64>) -> Float {
    ok(Float::new(values.into_iter().map(Real::new).collect()))
}

fn bool_pattern(values: impl IntoIterator<Item = bool>) -> Bool {
    ok(Bool::new(values.into_iter().collect()))
}

fn str_pattern<'a>(values: impl IntoIterator<Item = &'a str>) -> Str {
    ok(Str::new(values.into_iter().map(Box::from).collect()))
}

fn strings<'a>(values: impl IntoIterator<Item = &'a str>) -> FrozenBag<&'a str> {
    values.into_iter().collect()
}

#[test]
fn numeric_tower_compares() {
    let b = Pattern::Bool(bool_pattern([true, false]));
    let i = Pattern::Int(int_pattern(0..10));
    let f = Pattern::Float(float_pattern([0.5, 1.5]));
    assert!(b.compare(&i));
    assert!(i.compare(&b));
    assert!(i.compare(&f));
    assert!(b.compare(&f));
    assert!(!i.compare(&Pattern::Str(str_pattern(["x"]))));
    assert!(!i.compare(&Pattern::Value));
}

#[test]
fn merge_promotes_to_wider_kind() {
    let b = Pattern::Bool(bool_pattern([true, true, false]));
    let i = Pattern::Int(int_pattern([5, 9]));
    let merged = match b.merge(&i) {
        Some(Pattern::Int(int)) => int,
        other => panic!("expected Int, got {other:?}"),
    };
    assert_eq!(*merged.values.min(), 0);
    assert_eq!(*merged.values.max(), 9);
    assert_eq!(merged.values.card(), 5);

    let f = Pattern::Float(float_pattern([2.5]));
    let merged = match Pattern::Int(int_pattern([1, 2])).merge(&f) {
        Some(Pattern::Float(float)) => float,
        other => panic!("expected Float, got {other:?}"),
    };
    assert_eq!(merged.values.min().get(), 1.0);
    assert_eq!(merged.values.max().get(), 2.5);
}

#[test]
fn merge_self_doubles_sample() {
    let i = Pattern::Int(int_pattern(0..10));
    let merged = match i.merge(&i) {
        Some(Pattern::Int(int)) => int,
        other => panic!("expected Int, got {other:?}"),
    };
    assert_eq!(*merged.values.min(), 0);
    assert_eq!(*merged.values.max(), 9);
    assert_eq!(merged.values.card(), 20);
    assert_eq!(merged.values.sample().count(&3), 2);
}

#[test]
fn merge_is_commutative_across_kinds() {
    let i = Pattern::Int(int_pattern([1, 5]));
    let f = Pattern::Float(float_pattern([0.5]));
    assert_eq!(i.merge(&f), f.merge(&i));
}

#[test]
fn incompatible_merge_is_none() {
    let i = Pattern::Int(int_pattern([1]));
    let s = Pattern::Str(str_pattern(["a"]));
    assert_eq!(i.merge(&s), None);
}

#[test]
fn str_merge_unions_equal_width_templates() {
    let a = str_pattern(["ab"]).with_template(vec![
        scry_chars::CharClass::singleton('a'),
        scry_chars::CharClass::singleton('b'),
    ]);
    let b = str_pattern(["cb"]).with_template(vec![
        scry_chars::CharClass::singleton('c'),
        scry_chars::CharClass::singleton('b'),
    ]);
    let merged = a.merge(&b);
    assert_eq!(
        merged.template,
        Some(vec![
            scry_chars::CharClass::from_chars("ac"),
            scry_chars::CharClass::singleton('b'),
        ])
    );

    let ragged = str_pattern(["xyz"]);
    assert_eq!(a.merge(&ragged).template, None);
}

#[test]
fn url_is_a_sub_kind_of_str() {
    let url = Pattern::Url(Url::new(str_pattern(["http://a", "https://b"])));
    let plain = Pattern::Str(str_pattern(["not a url"]));
    assert!(url.compare(&plain));
    match url.merge(&plain) {
        Some(Pattern::Str(_)) => {}
        other => panic!("expected Str, got {other:?}"),
    }
    match url.merge(&url) {
        Some(Pattern::Url(_)) => {}
        other => panic!("expected Url, got {other:?}"),
    }
}

#[test]
fn str_repr_compare_matrix() {
    let budget = 0;
    let bool01 = ok(Bool::from_strings(&strings(["0", "1"]), "0|1", budget));
    let bool_ft = ok(Bool::from_strings(&strings(["f", "t"]), "f|t", budget));
    let int_d = ok(Int::from_strings(&strings(["3", "12"]), "d", budget));
    let int_x = ok(Int::from_strings(&strings(["a0", "3e"]), "x", budget));
    let float_f = ok(Float::from_strings(&strings(["2.5"]), budget));

    assert!(bool01.compare(&int_d));
    assert!(!bool_ft.compare(&int_d));
    assert!(bool01.compare(&float_f));
    assert!(int_d.compare(&int_x));
    assert!(int_d.compare(&float_f));
    assert!(!int_x.compare(&float_f));
    assert!(!bool01.compare(&bool_ft));
    assert!(bool01.compare(&bool01));
}

#[test]
fn str_repr_merge_widens_int_base() {
    let budget = 0;
    let int_o = ok(Int::from_strings(&strings(["17", "20"]), "o", budget));
    let int_x = ok(Int::from_strings(&strings(["ff"]), "x", budget));
    let merged = match int_o.merge(&int_x) {
        Some(repr) => repr,
        None => panic!("expected merge"),
    };
    assert_eq!(merged.format, "x");
    // 0o17 = 15, 0o20 = 16, 0xff = 255
    match &*merged.inner {
        Pattern::Int(int) => {
            assert_eq!(*int.values.min(), 15);
            assert_eq!(*int.values.max(), 255);
        }
        other => panic!("expected Int inner, got {other:?}"),
    }
}

#[test]
fn str_repr_datetime_requires_equal_formats() {
    let budget = 0;
    let iso = ok(DateTime::from_strings(
        &strings(["2021-01-01 00:00:00"]),
        "%Y-%m-%d %H:%M:%S",
        budget,
    ));
    let tee = ok(DateTime::from_strings(
        &strings(["2021-01-01T00:00:00"]),
        "%Y-%m-%dT%H:%M:%S",
        budget,
    ));
    assert!(iso.compare(&iso));
    assert!(!iso.compare(&tee));
}

#[test]
fn str_repr_validates_by_parsing() {
    let budget = 0;
    let iso = ok(DateTime::from_strings(
        &strings(["2021-01-01 00:00:00", "2021-06-01 12:30:00"]),
        "%Y-%m-%d %H:%M:%S",
        budget,
    ));
    let repr = Pattern::StrRepr(iso);
    assert!(repr.validate(&Datum::from("2021-03-15 08:00:00")));
    // parses but out of the observed range
    assert!(!repr.validate(&Datum::from("2022-01-01 00:00:00")));
    // does not parse
    assert!(!repr.validate(&Datum::from("2020-02-31 00:00:00")));
    assert!(!repr.validate(&Datum::from(3)));
}

#[test]
fn field_compare_ignores_optional() {
    let mandatory = Pattern::Field(Field::new("foo", false));
    let optional = Pattern::Field(Field::new("foo", true));
    assert!(mandatory.compare(&optional));
    match mandatory.merge(&optional) {
        Some(Pattern::Field(field)) => assert!(field.optional),
        other => panic!("expected Field, got {other:?}"),
    }
    assert!(!mandatory.compare(&Pattern::Field(Field::new("bar", false))));
}

#[test]
fn fields_sort_and_dedup() {
    let fields = Fields::new([
        Field::new("foo", false),
        Field::new("bar", false),
        Field::new("foo", true),
    ]);
    assert_eq!(fields.len(), 2);
    assert_eq!(fields.members()[0].value, Datum::from("bar"));
    assert_eq!(fields.members()[1].value, Datum::from("foo"));
    // duplicate literal merged its optionality
    assert!(fields.members()[1].optional);
    assert!(fields.validate(&Datum::from("bar")));
    assert!(!fields.validate(&Datum::from("baz")));
}

fn lengths(values: impl IntoIterator<Item = u64>) -> scry_collections::Stats<u64> {
    ok(scry_collections::Stats::from_lengths_iter(values))
}

#[test]
fn dict_merge_aligns_fields_by_literal() {
    let a = Dict::new(lengths([2])).with_content(vec![
        DictField::new(Field::new("code", false), Pattern::Int(int_pattern([1]))),
        DictField::new(Field::new("terminals", false), Pattern::Int(int_pattern([2]))),
    ]);
    let b = Dict::new(lengths([1])).with_content(vec![DictField::new(
        Field::new("code", false),
        Pattern::Int(int_pattern([7])),
    )]);
    assert!(Pattern::Dict(a.clone()).compare(&Pattern::Dict(b.clone())));
    let merged = match a.merge(&b) {
        Some(dict) => dict,
        None => panic!("expected merge"),
    };
    let content = match &merged.content {
        Some(content) => content,
        None => panic!("expected content"),
    };
    assert_eq!(content.len(), 2);
    // sorted by literal: code before terminals
    match &content[0].key {
        Pattern::Field(field) => {
            assert_eq!(field.value, Datum::from("code"));
            assert!(!field.optional);
        }
        other => panic!("expected Field, got {other:?}"),
    }
    match &content[1].key {
        Pattern::Field(field) => {
            assert_eq!(field.value, Datum::from("terminals"));
            assert!(field.optional, "one-sided fields merge as optional");
        }
        other => panic!("expected Field, got {other:?}"),
    }
}

#[test]
fn dicts_with_disjoint_fields_do_not_compare() {
    let a = Dict::new(lengths([1])).with_content(vec![DictField::new(
        Field::new("x", false),
        Pattern::Int(int_pattern([1])),
    )]);
    let b = Dict::new(lengths([1])).with_content(vec![DictField::new(
        Field::new("y", false),
        Pattern::Int(int_pattern([1])),
    )]);
    assert!(!Pattern::Dict(a).compare(&Pattern::Dict(b)));
}

#[test]
fn dict_compare_rejects_mismatched_values() {
    let a = Dict::new(lengths([1])).with_content(vec![DictField::new(
        Field::new("x", false),
        Pattern::Int(int_pattern([1])),
    )]);
    let b = Dict::new(lengths([1])).with_content(vec![DictField::new(
        Field::new("x", false),
        Pattern::Str(str_pattern(["s"])),
    )]);
    assert!(!Pattern::Dict(a).compare(&Pattern::Dict(b)));
}

#[test]
fn list_merge_merges_item_patterns() {
    let a = List::new(lengths([3])).with_content(Pattern::Int(int_pattern([1, 2])));
    let b = List::new(lengths([5])).with_content(Pattern::Int(int_pattern([10])));
    let merged = match a.merge(&b) {
        Some(list) => list,
        None => panic!("expected merge"),
    };
    assert_eq!(*merged.lengths.min(), 3);
    assert_eq!(*merged.lengths.max(), 5);
    match merged.content.as_deref() {
        Some(Pattern::Int(int)) => assert_eq!(*int.values.max(), 10),
        other => panic!("expected Int content, got {other:?}"),
    }
}

#[test]
fn validate_over_samples() {
    let int = Pattern::Int(int_pattern(0..100));
    for n in 0..100 {
        assert!(int.validate(&Datum::from(n)));
    }
    assert!(!int.validate(&Datum::from(100)));
    assert!(!int.validate(&Datum::from(-1)));
    assert!(!int.validate(&Datum::from("0")));

    let bools = Pattern::Bool(bool_pattern([true]));
    assert!(bools.validate(&Datum::from(true)));
    assert!(bools.validate(&Datum::from(1)));
    assert!(!bools.validate(&Datum::from(2)));

    let floats = Pattern::Float(float_pattern([0.5, 9.5]));
    assert!(floats.validate(&Datum::from(1.0)));
    assert!(floats.validate(&Datum::from(5)));
    assert!(!floats.validate(&Datum::from(10.0)));
}

#[test]
fn str_template_validation() {
    let template = vec![
        scry_chars::CharClass::singleton('m'),
        scry_chars::oct_digit(),
        scry_chars::oct_digit(),
    ];
    let pattern = Pattern::Str(str_pattern(["m00", "m77"]).with_template(template));
    assert!(pattern.validate(&Datum::from("m07")));
    assert!(!pattern.validate(&Datum::from("m08")));
    assert!(!pattern.validate(&Datum::from("m0")));
    assert!(!pattern.validate(&Datum::from("x07")));
}

#[test]
fn num_repr_validates_timestamps() {
    let int = int_pattern([1_600_000_000, 1_650_000_000]);
    let repr = match NumRepr::from_int(&int) {
        Some(repr) => repr,
        None => panic!("expected promotion"),
    };
    assert_eq!(repr.format, NumberKind::Int);
    let pattern = Pattern::NumRepr(repr);
    assert!(pattern.validate(&Datum::from(1_620_000_000)));
    assert!(!pattern.validate(&Datum::from(1_000)));
    assert!(!pattern.validate(&Datum::from("x")));
}

#[test]
fn num_repr_merge_prefers_float() {
    let a = match NumRepr::from_int(&int_pattern([1_600_000_000])) {
        Some(repr) => repr,
        None => panic!("expected promotion"),
    };
    let b = match NumRepr::from_float(&float_pattern([1_650_000_000.5])) {
        Some(repr) => repr,
        None => panic!("expected promotion"),
    };
    assert_eq!(a.merge(&b).format, NumberKind::Float);
    assert_eq!(b.merge(&a).format, NumberKind::Float);
    assert_eq!(a.merge(&a).format, NumberKind::Int);
}

#[test]
fn empty_and_value_extremes() {
    assert!(!Pattern::Empty.validate(&Datum::Null));
    assert!(Pattern::Value.validate(&Datum::Null));
    assert!(Pattern::Value.validate(&Datum::list([Datum::from(1)])));
    assert_eq!(Pattern::Empty.merge(&Pattern::Empty), Some(Pattern::Empty));
    assert_eq!(Pattern::Value.merge(&Pattern::Value), Some(Pattern::Value));
    assert_eq!(Pattern::Empty.merge(&Pattern::Value), None);
}

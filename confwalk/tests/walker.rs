//! Behavioural tests for the tag walker.
//!
//! Structs use the tag names `tag` for default literals and `map` for rename
//! directives, so the walker is configured with `TagWalker::new("tag", "map", ..)`.

mod common;

use std::collections::{BTreeMap, HashMap};

use anyhow::{Result, anyhow, ensure};
use common::{reg, walk};
use confwalk::{Value, Walkable};
use num_complex::Complex;
use rstest::rstest;
use serde_json::{Value as Json, json};

#[derive(Default, Walkable)]
struct Empty {}

#[derive(Default, Walkable)]
struct AnyTag {
    #[confwalk(tag = "any")]
    a: Json,
}

fn any_tag(value: &str) -> AnyTag {
    AnyTag { a: json!(value) }
}

#[derive(Default, Walkable)]
struct BoolTags {
    #[confwalk(tag = true)]
    b: bool,
    #[confwalk(tag = true)]
    pb: Option<bool>,
    #[confwalk(tag = "[true, false]")]
    sb: Vec<bool>,
}

#[derive(Default, Walkable)]
struct IntTags {
    #[confwalk(tag = 1)]
    i: i64,
    #[confwalk(tag = 2)]
    pi: Option<i64>,
    #[confwalk(tag = "[1,2,3]")]
    si: Vec<i64>,
    #[confwalk(tag = "[1,2,3]")]
    psi: Option<Vec<i64>>,
    #[confwalk(tag = 8)]
    i8: i8,
    #[confwalk(tag = 16)]
    i16: i16,
    #[confwalk(tag = 32)]
    i32: i32,
    #[confwalk(tag = 64)]
    i64: i64,
}

#[derive(Default, Walkable)]
struct UintTags {
    #[confwalk(tag = 1)]
    u: u64,
    #[confwalk(tag = 2)]
    pu: Option<u64>,
    #[confwalk(tag = "[1,2,3]")]
    su: Vec<usize>,
    #[confwalk(tag = 8)]
    u8: u8,
    #[confwalk(tag = 16)]
    u16: u16,
    #[confwalk(tag = 32)]
    u32: u32,
    #[confwalk(tag = 64)]
    u64: u64,
}

#[derive(Default, Walkable)]
struct FloatTags {
    #[confwalk(tag = 32e-1)]
    f32: f32,
    #[confwalk(tag = "64e-1")]
    pf64: Option<f64>,
    #[confwalk(tag = "[32e-1, 64e-1]")]
    sf64: Vec<f64>,
}

#[derive(Default, Walkable)]
struct ComplexTags {
    #[confwalk(tag = "64+2i")]
    c64: Complex<f32>,
    #[confwalk(tag = "128+4i")]
    pc128: Option<Complex<f64>>,
    #[confwalk(tag = "[64+2i, 32+1i]")]
    sc64: Vec<Complex<f32>>,
    #[confwalk(tag = "[128+4i, 64+2i]")]
    psc128: Option<Vec<Complex<f64>>>,
}

#[derive(Default, Walkable)]
struct StringTags {
    #[confwalk(tag = "string")]
    s: String,
    #[confwalk(tag = "string")]
    ps: Option<String>,
    #[confwalk(tag = 117)]
    b: u8,
    #[confwalk(tag = 42)]
    pb: Option<u8>,
    #[confwalk(tag = "[117,105,110,116,56]")]
    sb: Vec<u8>,
    #[confwalk(tag = 105)]
    r: char,
    #[confwalk(tag = 42)]
    pr: Option<char>,
    #[confwalk(tag = "[105,110,116,51,50]")]
    sr: Vec<char>,
}

#[derive(Walkable)]
struct AllValues {
    #[confwalk(map = "bool", tag = false)]
    flag: bool,
    #[confwalk(map = "int", tag = 1)]
    int: i64,
    #[confwalk(map = "uint", tag = 2)]
    uint: u64,
    #[confwalk(map = "float", tag = 3.0)]
    float: f64,
    #[confwalk(map = "string", tag = "x")]
    text: String,
    #[confwalk(map = "byte", tag = 'A')]
    byte: u8,
    #[confwalk(map = "rune", tag = 'B')]
    rune: char,
    #[confwalk(map = "any", tag = "other")]
    any: Json,
}

fn all_values() -> AllValues {
    AllValues {
        flag: true,
        int: -1,
        uint: 1,
        float: 2.0,
        text: "string".to_owned(),
        byte: b'a',
        rune: 'b',
        any: json!({"key": "value"}),
    }
}

#[derive(Default, Walkable)]
struct StructStruct {
    s: AnyTag,
}

#[derive(Default, Walkable)]
struct StructPtrStruct {
    s: Option<AnyTag>,
}

#[derive(Default, Walkable)]
struct PtrStructTags {
    #[confwalk(tag = "{a: any}")]
    s: Option<AnyTag>,
}

#[derive(Default, Walkable)]
struct PtrStructPtrStructTags {
    s: Option<PtrStructTags>,
}

#[derive(Default, Walkable)]
struct SliceTags {
    #[confwalk(tag = "[any,all]")]
    s: Vec<Json>,
}

#[derive(Default, Walkable)]
struct SliceStructTags {
    #[confwalk(tag = "[{a: any},{a: all}]")]
    s: Vec<AnyTag>,
}

#[derive(Default, Walkable)]
struct SlicePtrStructTags {
    #[confwalk(tag = "[{a: any},{a: all}]")]
    s: Vec<Option<AnyTag>>,
}

#[derive(Default, Walkable)]
struct PtrSlicePtrStructTags {
    #[confwalk(tag = "[{a: any},{a: all}]")]
    s: Option<Vec<Option<AnyTag>>>,
}

#[derive(Default, Walkable)]
struct SliceValues {
    s: Vec<Json>,
}

#[derive(Default, Walkable)]
struct SliceStructValues {
    s: Vec<AnyTag>,
}

#[derive(Default, Walkable)]
struct PtrSlicePtrStructValues {
    s: Option<Vec<Option<AnyTag>>>,
}

#[derive(Default, Walkable)]
struct MapTags {
    #[confwalk(tag = "{a: any, b: {a: all}}")]
    m: BTreeMap<String, Json>,
}

#[derive(Default, Walkable)]
struct PtrMapTags {
    #[confwalk(tag = "{a: any, b: {a: all}}")]
    m: Option<BTreeMap<String, Json>>,
}

#[derive(Default, Walkable)]
struct MapStructTags {
    #[confwalk(tag = "{a: {a: any}, b: {a: all}}")]
    m: BTreeMap<String, AnyTag>,
}

#[derive(Default, Walkable)]
struct MapPtrStructTags {
    #[confwalk(tag = "{a: {a: any}, b: {a: all}}")]
    m: BTreeMap<String, Option<AnyTag>>,
}

#[derive(Default, Walkable)]
struct MapValues {
    m: BTreeMap<String, Json>,
}

#[derive(Default, Walkable)]
struct HashMapStructValues {
    m: HashMap<String, AnyTag>,
}

#[derive(Default, Walkable)]
struct NoTags {
    s: String,
}

#[derive(Default, Walkable)]
struct EmptyTag {
    #[confwalk(tag = "")]
    s: String,
}

#[derive(Default, Walkable)]
struct Squash {
    #[confwalk(map = ",squash")]
    s: AnyTag,
}

#[derive(Default, Walkable)]
struct Remain {
    #[confwalk(map = ",remain", tag = "any")]
    field: Json,
}

#[derive(Default, Walkable)]
struct TagYamlSlice {
    #[confwalk(tag = "[a,b]")]
    s: Vec<String>,
}

#[derive(Default, Walkable)]
struct Abc {
    #[confwalk(tag = "v")]
    a: String,
    b: Vec<String>,
    c: String,
}

#[derive(Default, Walkable)]
struct TagYamlMap {
    #[confwalk(tag = "{a: a, b: [a,b], c: c}")]
    s: Abc,
}

#[derive(Default, Walkable)]
struct Calibration {
    #[confwalk(tag = 1)]
    i: i64,
    #[confwalk(tag = "[1,2,3]")]
    s: Vec<i64>,
}

#[derive(Default, Walkable)]
#[expect(non_snake_case, reason = "exercises lower-casing of field names")]
struct MixedCase {
    #[confwalk(tag = 1)]
    MyField: i64,
    #[confwalk(map = "MyField", tag = 2)]
    renamed: i64,
    #[confwalk(map = ",omitempty", tag = 3)]
    Directive: i64,
}

#[rstest]
#[case::bool(true.to_value(), vec![reg("", &true)])]
#[case::int(1_i64.to_value(), vec![reg("", &1_i64)])]
#[case::uint(1_u64.to_value(), vec![reg("", &1_u64)])]
#[case::float(1.0_f64.to_value(), vec![reg("", &1.0_f64)])]
#[case::complex(Complex::new(1.0_f64, 1.0).to_value(), vec![reg("", &Complex::new(1.0_f64, 1.0))])]
#[case::string("test".to_owned().to_value(), vec![reg("", &"test".to_owned())])]
#[case::byte(b'a'.to_value(), vec![reg("", &b'a')])]
#[case::rune('a'.to_value(), vec![reg("", &'a')])]
#[case::any(json!(1).to_value(), vec![reg("", &json!(1))])]
#[case::ptr_zero_bool(Some(false).to_value(), vec![])]
#[case::ptr_zero_int(Some(0_i64).to_value(), vec![])]
#[case::ptr_absent_string(None::<String>.to_value(), vec![])]
#[case::ptr_empty_slice(Some(Vec::<Json>::new()).to_value(), vec![])]
#[case::empty_struct(Empty::default().to_value(), vec![])]
fn builtin_values(#[case] value: Value, #[case] expected: Vec<(String, Value)>) {
    let (registrations, outcome) = walk(&value, false);
    assert!(outcome.is_ok());
    assert_eq!(registrations, expected);
}

#[rstest]
#[case::bools(vec![true, false].to_value(), vec![reg("0", &true), reg("1", &false)])]
#[case::ints(vec![1_i64, 0].to_value(), vec![reg("0", &1_i64), reg("1", &0_i64)])]
#[case::floats(vec![1.0_f64, 0.0].to_value(), vec![reg("0", &1.0_f64), reg("1", &0.0_f64)])]
#[case::strings(
    vec!["test".to_owned(), String::new()].to_value(),
    vec![reg("0", &"test".to_owned()), reg("1", &String::new())],
)]
fn slices_report_zero_elements_when_asked(
    #[case] value: Value,
    #[case] expected: Vec<(String, Value)>,
) {
    let (registrations, outcome) = walk(&value, true);
    assert!(outcome.is_ok());
    assert_eq!(registrations, expected);
}

#[rstest]
#[case::bytes(vec![b'a', b'b'].to_value(), vec![reg("0", &b'a'), reg("1", &b'b')])]
#[case::any(
    vec![json!(0), json!("test")].to_value(),
    vec![reg("0", &json!(0)), reg("1", &json!("test"))],
)]
#[case::bools_skip_zero(vec![true, false].to_value(), vec![reg("0", &true)])]
#[case::absent_struct_pointer(vec![None::<AnyTag>].to_value(), vec![reg("0.a", &json!("any"))])]
fn slice_elements(#[case] value: Value, #[case] expected: Vec<(String, Value)>) {
    let (registrations, outcome) = walk(&value, false);
    assert!(outcome.is_ok());
    assert_eq!(registrations, expected);
}

#[rstest]
#[case::bool_tags(BoolTags::default().to_value(), vec![
    reg("b", &true),
    reg("pb", &Some(true)),
    reg("sb", &vec![true, false]),
])]
#[case::int_tags(IntTags::default().to_value(), vec![
    reg("i", &1_i64),
    reg("pi", &Some(2_i64)),
    reg("si", &vec![1_i64, 2, 3]),
    reg("psi", &Some(vec![1_i64, 2, 3])),
    reg("i8", &8_i8),
    reg("i16", &16_i16),
    reg("i32", &32_i32),
    reg("i64", &64_i64),
])]
#[case::uint_tags(UintTags::default().to_value(), vec![
    reg("u", &1_u64),
    reg("pu", &Some(2_u64)),
    reg("su", &vec![1_usize, 2, 3]),
    reg("u8", &8_u8),
    reg("u16", &16_u16),
    reg("u32", &32_u32),
    reg("u64", &64_u64),
])]
#[case::float_tags(FloatTags::default().to_value(), vec![
    reg("f32", &3.2_f32),
    reg("pf64", &Some(6.4_f64)),
    reg("sf64", &vec![3.2_f64, 6.4]),
])]
#[case::complex_tags(ComplexTags::default().to_value(), vec![
    reg("c64", &Complex::new(64.0_f32, 2.0)),
    reg("pc128", &Some(Complex::new(128.0_f64, 4.0))),
    reg("sc64", &vec![Complex::new(64.0_f32, 2.0), Complex::new(32.0, 1.0)]),
    reg("psc128", &Some(vec![Complex::new(128.0_f64, 4.0), Complex::new(64.0, 2.0)])),
])]
#[case::string_tags(StringTags::default().to_value(), vec![
    reg("s", &"string".to_owned()),
    reg("ps", &Some("string".to_owned())),
    reg("b", &117_u8),
    reg("pb", &Some(42_u8)),
    reg("sb", &b"uint8".to_vec()),
    reg("r", &'i'),
    reg("pr", &Some('*')),
    reg("sr", &"int32".chars().collect::<Vec<_>>()),
])]
#[case::all_values(all_values().to_value(), vec![
    reg("bool", &true),
    reg("int", &-1_i64),
    reg("uint", &1_u64),
    reg("float", &2.0_f64),
    reg("string", &"string".to_owned()),
    reg("byte", &b'a'),
    reg("rune", &'b'),
    reg("any", &json!({"key": "value"})),
])]
fn scalar_tags(#[case] value: Value, #[case] expected: Vec<(String, Value)>) {
    let (registrations, outcome) = walk(&value, false);
    assert!(outcome.is_ok());
    assert_eq!(registrations, expected);
}

#[rstest]
#[case::struct_struct(StructStruct::default().to_value(), vec![reg("s.a", &json!("any"))])]
#[case::struct_ptr_struct(StructPtrStruct::default().to_value(), vec![reg("s.a", &json!("any"))])]
#[case::struct_ptr_struct_value(
    StructPtrStruct { s: Some(any_tag("set")) }.to_value(),
    vec![reg("s.a", &json!("set"))],
)]
#[case::ptr_struct_tags(
    PtrStructTags::default().to_value(),
    vec![reg("s", &Some(any_tag("any")))],
)]
#[case::ptr_struct_ptr_struct_tags(
    PtrStructPtrStructTags::default().to_value(),
    vec![reg("s.s", &Some(any_tag("any")))],
)]
#[case::slice_tags(
    SliceTags::default().to_value(),
    vec![reg("s", &vec![json!("any"), json!("all")])],
)]
#[case::slice_struct_tags(
    SliceStructTags::default().to_value(),
    vec![reg("s", &vec![any_tag("any"), any_tag("all")])],
)]
#[case::slice_ptr_struct_tags(
    SlicePtrStructTags::default().to_value(),
    vec![reg("s", &vec![Some(any_tag("any")), Some(any_tag("all"))])],
)]
#[case::ptr_slice_ptr_struct_tags(
    PtrSlicePtrStructTags::default().to_value(),
    vec![reg("s", &Some(vec![Some(any_tag("any")), Some(any_tag("all"))]))],
)]
#[case::slice_values(
    SliceValues { s: vec![json!(1), json!(2)] }.to_value(),
    vec![reg("s.0", &json!(1)), reg("s.1", &json!(2))],
)]
#[case::slice_struct_values(
    SliceStructValues { s: vec![AnyTag { a: json!(1) }, AnyTag { a: json!(2) }] }.to_value(),
    vec![reg("s.0.a", &json!(1)), reg("s.1.a", &json!(2))],
)]
#[case::ptr_slice_ptr_struct_values(
    PtrSlicePtrStructValues { s: Some(vec![Some(AnyTag { a: json!(1) }), None]) }.to_value(),
    vec![reg("s.0.a", &json!(1)), reg("s.1.a", &json!("any"))],
)]
fn nested_structs_and_slices(#[case] value: Value, #[case] expected: Vec<(String, Value)>) {
    let (registrations, outcome) = walk(&value, false);
    assert!(outcome.is_ok());
    assert_eq!(registrations, expected);
}

fn json_map(entries: &[(&str, Json)]) -> BTreeMap<String, Json> {
    entries
        .iter()
        .map(|(key, value)| ((*key).to_owned(), value.clone()))
        .collect()
}

fn struct_map<T>(entries: Vec<(&str, T)>) -> BTreeMap<String, T> {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value))
        .collect()
}

#[rstest]
#[case::map_tags(
    MapTags::default().to_value(),
    vec![reg("m", &json_map(&[("a", json!("any")), ("b", json!({"a": "all"}))]))],
)]
#[case::ptr_map_tags(
    PtrMapTags::default().to_value(),
    vec![reg("m", &Some(json_map(&[("a", json!("any")), ("b", json!({"a": "all"}))])))],
)]
#[case::map_struct_tags(
    MapStructTags::default().to_value(),
    vec![reg("m", &struct_map(vec![("a", any_tag("any")), ("b", any_tag("all"))]))],
)]
#[case::map_ptr_struct_tags(
    MapPtrStructTags::default().to_value(),
    vec![reg("m", &struct_map(vec![("a", Some(any_tag("any"))), ("b", Some(any_tag("all")))]))],
)]
#[case::map_values(
    MapValues { m: json_map(&[("Key", json!("value"))]) }.to_value(),
    vec![reg("m.key", &json!("value"))],
)]
#[case::hash_map_struct_values(
    HashMapStructValues {
        m: [("key-1", AnyTag { a: json!(2) }), ("key-0", AnyTag { a: json!(1) })]
            .into_iter()
            .map(|(key, value)| (key.to_owned(), value))
            .collect(),
    }
    .to_value(),
    vec![reg("m.key-0.a", &json!(1)), reg("m.key-1.a", &json!(2))],
)]
fn maps(#[case] value: Value, #[case] expected: Vec<(String, Value)>) {
    let (registrations, outcome) = walk(&value, false);
    assert!(outcome.is_ok());
    assert_eq!(registrations, expected);
}

#[rstest]
#[case::no_tags(NoTags::default().to_value(), false, vec![])]
#[case::no_tags_zero(NoTags::default().to_value(), true, vec![reg("s", &String::new())])]
#[case::empty_tag(EmptyTag::default().to_value(), false, vec![])]
#[case::empty_tag_zero(EmptyTag::default().to_value(), true, vec![reg("s", &String::new())])]
#[case::squash(Squash::default().to_value(), false, vec![reg("a", &json!("any"))])]
#[case::remain(Remain::default().to_value(), false, vec![reg("field", &json!("any"))])]
#[case::tag_yaml_slice(
    TagYamlSlice::default().to_value(),
    false,
    vec![reg("s", &vec!["a".to_owned(), "b".to_owned()])],
)]
#[case::tag_yaml_map(
    TagYamlMap::default().to_value(),
    false,
    vec![reg("s", &Abc {
        a: "a".to_owned(),
        b: vec!["a".to_owned(), "b".to_owned()],
        c: "c".to_owned(),
    })],
)]
#[case::calibration(
    Calibration::default().to_value(),
    false,
    vec![reg("i", &1_i64), reg("s", &vec![1_i64, 2, 3])],
)]
#[case::field_case(
    MixedCase::default().to_value(),
    false,
    vec![reg("myfield", &1_i64), reg("MyField", &2_i64), reg("directive", &3_i64)],
)]
fn special_tags(
    #[case] value: Value,
    #[case] zero: bool,
    #[case] expected: Vec<(String, Value)>,
) {
    let (registrations, outcome) = walk(&value, zero);
    assert!(outcome.is_ok());
    assert_eq!(registrations, expected);
}

#[rstest]
fn explicit_values_win_over_tags() {
    let value = Calibration {
        i: 7,
        s: vec![9],
    }
    .to_value();
    let (registrations, outcome) = walk(&value, false);
    assert!(outcome.is_ok());
    assert_eq!(
        registrations,
        vec![reg("i", &7_i64), reg("s.0", &9_i64), reg("s", &vec![1_i64, 2, 3])]
    );
}

#[rstest]
fn repeated_walks_are_identical() {
    let value = IntTags::default().to_value();
    let (first, first_outcome) = walk(&value, false);
    let (second, second_outcome) = walk(&value, false);
    assert!(first_outcome.is_ok() && second_outcome.is_ok());
    assert_eq!(first, second);
}

#[derive(Default, Walkable)]
struct YamlError {
    #[confwalk(tag = "a,b")]
    s: Vec<String>,
}

#[derive(Default, Walkable)]
struct ComplexInvalid {
    #[confwalk(tag = "invalid")]
    c: Complex<f32>,
}

#[derive(Default, Walkable)]
struct ComplexSliceInvalid {
    #[confwalk(tag = "[invalid, 1+2i]")]
    sc: Vec<Complex<f32>>,
}

#[derive(Default, Walkable)]
struct PtrComplexSliceInvalid {
    #[confwalk(tag = "[1+2i, invalid]")]
    psc: Option<Vec<Complex<f64>>>,
}

#[derive(Default, Walkable)]
struct ComplexArrayOverflow {
    #[confwalk(tag = "[1+1i, 2+2i, 3+3i]")]
    ca: [Complex<f32>; 2],
}

#[rstest]
#[case::yaml(
    YamlError::default().to_value(),
    reg("s", &"a,b".to_owned()),
    "tag walker - yaml parsing [s=\"a,b\"]: cannot unmarshal !!str `a,b` into []string",
)]
#[case::complex(
    ComplexInvalid::default().to_value(),
    reg("c", &"invalid".to_owned()),
    "tag walker - complex parsing [c=\"invalid\"]: invalid complex number",
)]
#[case::complex_slice(
    ComplexSliceInvalid::default().to_value(),
    reg("sc", &vec!["invalid".to_owned(), "1+2i".to_owned()]),
    "tag walker - complex parsing [sc=\"[invalid, 1+2i]\"]",
)]
#[case::ptr_complex_slice(
    PtrComplexSliceInvalid::default().to_value(),
    reg("psc", &vec!["1+2i".to_owned(), "invalid".to_owned()]),
    "tag walker - complex parsing [psc=\"[1+2i, invalid]\"]",
)]
#[case::complex_array_overflow(
    ComplexArrayOverflow::default().to_value(),
    reg("ca", &"[1+1i, 2+2i, 3+3i]".to_owned()),
    "tag walker - yaml parsing [ca=\"[1+1i, 2+2i, 3+3i]\"]",
)]
fn failed_literals_register_fallbacks(
    #[case] value: Value,
    #[case] fallback: (String, Value),
    #[case] message: &str,
) -> Result<()> {
    let (registrations, outcome) = walk(&value, false);
    ensure!(registrations == vec![fallback], "unexpected registrations: {registrations:?}");
    let err = outcome.err().ok_or_else(|| anyhow!("expected a walk error"))?;
    ensure!(err.len() == 1, "expected one error, got {}", err.len());
    let text = err.to_string();
    ensure!(text.starts_with(message), "unexpected message: {text}");
    Ok(())
}

#[rstest]
fn all_failures_are_reported_in_walk_order() -> Result<()> {
    #[derive(Default, Walkable)]
    struct Failures {
        first: YamlError,
        second: ComplexInvalid,
    }

    let (registrations, outcome) = walk(&Failures::default().to_value(), false);
    ensure!(registrations.len() == 2, "fallbacks missing: {registrations:?}");
    let err = outcome.err().ok_or_else(|| anyhow!("expected a walk error"))?;
    let paths: Vec<_> = err.iter().map(|entry| entry.path.as_str()).collect();
    ensure!(paths == ["first.s", "second.c"], "unexpected order: {paths:?}");
    ensure!(err.to_string().lines().count() == 2, "errors not newline joined");
    Ok(())
}

#[derive(Default, Walkable)]
struct NullTags {
    #[confwalk(tag = "null")]
    pi: Option<i32>,
    #[confwalk(tag = "~")]
    ps: Option<Calibration>,
    #[confwalk(tag = "[1, ~]")]
    spi: Vec<Option<i32>>,
}

#[rstest]
fn null_literals_register_absent_pointers() -> Result<()> {
    let (registrations, outcome) = walk(&NullTags::default().to_value(), false);
    ensure!(outcome.is_ok(), "unexpected errors: {outcome:?}");
    let expected = vec![
        reg("pi", &None::<i32>),
        reg("ps", &None::<Calibration>),
        reg("spi", &vec![Some(1), None::<i32>]),
    ];
    ensure!(registrations == expected, "unexpected registrations: {registrations:?}");
    Ok(())
}

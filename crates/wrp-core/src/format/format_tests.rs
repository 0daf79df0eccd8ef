#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test]
fn Format___default___is_json() {
    assert_eq!(Format::default(), Format::Json);
}

#[test]
fn Format___equality___distinguishes_variants() {
    assert_ne!(Format::Json, Format::Bincode);
    assert_eq!(Format::Bincode, Format::Bincode);
}

#[test_case("application/json", Some(Format::Json))]
#[test_case("application/json; charset=utf-8", Some(Format::Json))]
#[test_case("APPLICATION/OCTET-STREAM", Some(Format::Bincode))]
#[test_case("text/plain", None)]
#[test_case("", None)]
fn Format___from_content_type___matches_essence(input: &str, expected: Option<Format>) {
    assert_eq!(Format::from_content_type(input), expected);
}

#[test_case("json", Format::Json)]
#[test_case("Bincode", Format::Bincode)]
fn Format___from_str___parses_name(input: &str, expected: Format) {
    let format: Format = input.parse().unwrap();

    assert_eq!(format, expected);
}

#[test]
fn Format___from_str___unknown_name_is_unsupported() {
    let result = "msgpack".parse::<Format>();

    assert!(matches!(result, Err(WrpError::UnsupportedFormat(name)) if name == "msgpack"));
}

#[test]
fn Format___serde___uses_snake_case_names() {
    let json = serde_json::to_string(&Format::Bincode).unwrap();

    assert_eq!(json, r#""bincode""#);
    assert_eq!(serde_json::from_str::<Format>(r#""json""#).unwrap(), Format::Json);
}

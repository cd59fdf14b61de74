//! Validator catalogue behavior through the public API.

use envguard::{
    array, boolean, bytes, custom, duration, email, host, json, matches, num, one_of, port,
    string, url, uuid, ByteUnit, DurationUnit, ParseError, RawEnv, Validator, Value,
};

fn source() -> RawEnv {
    RawEnv::new()
}

/// Every catalogue entry reports its discriminator tag.
#[test]
fn kinds_are_stable() {
    assert_eq!(string().kind(), "string");
    assert_eq!(num().kind(), "number");
    assert_eq!(boolean().kind(), "boolean");
    assert_eq!(email().kind(), "email");
    assert_eq!(url().kind(), "url");
    assert_eq!(host().kind(), "host");
    assert_eq!(port().kind(), "port");
    assert_eq!(json().kind(), "json");
    assert_eq!(array().kind(), "array");
    assert_eq!(uuid().kind(), "uuid");
    assert_eq!(matches(regex::Regex::new("x").unwrap()).kind(), "regex");
    assert_eq!(one_of(["a"]).kind(), "choice");
    assert_eq!(duration().kind(), "duration");
    assert_eq!(bytes().kind(), "bytes");
}

/// Valid input parses deterministically: same input, same output.
#[test]
fn parsing_is_deterministic() {
    let validator = duration().unit(DurationUnit::Seconds);
    let first = validator.parse(Some("90s"), "T", &source()).unwrap();
    let second = validator.parse(Some("90s"), "T", &source()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, Value::Num(90.0));
}

/// Duration round trip from the unit table: 5s is 5000ms, or 5 seconds.
#[test]
fn duration_round_trip() {
    assert_eq!(
        duration().parse(Some("5s"), "T", &source()).unwrap(),
        Value::Num(5000.0)
    );
    assert_eq!(
        duration()
            .unit(DurationUnit::Seconds)
            .parse(Some("5s"), "T", &source())
            .unwrap(),
        Value::Num(5.0)
    );
    assert_eq!(
        duration()
            .unit(DurationUnit::Seconds)
            .parse(Some("500ms"), "T", &source())
            .unwrap(),
        Value::Num(0.5)
    );
}

/// Byte-size round trip: 2MB is 2097152 bytes, or 2 mebibytes.
#[test]
fn bytes_round_trip() {
    assert_eq!(
        bytes().parse(Some("2MB"), "S", &source()).unwrap(),
        Value::Num(2_097_152.0)
    );
    assert_eq!(
        bytes()
            .unit(ByteUnit::Mb)
            .parse(Some("2MB"), "S", &source())
            .unwrap(),
        Value::Num(2.0)
    );
}

/// Trim and uppercase compose, and the output is a fixed point.
#[test]
fn string_transforms_are_idempotent() {
    let validator = string().trim().uppercase();
    let once = validator.parse(Some("  hi  "), "S", &source()).unwrap();
    assert_eq!(once, Value::Str("HI".to_string()));

    let twice = validator.parse(once.as_str(), "S", &source()).unwrap();
    assert_eq!(once, twice);
}

/// Port boundaries at the default [1, 65535] range.
#[test]
fn port_boundaries() {
    assert!(port().parse(Some("0"), "P", &source()).is_err());
    assert!(port().parse(Some("1"), "P", &source()).is_ok());
    assert!(port().parse(Some("65535"), "P", &source()).is_ok());
    assert!(port().parse(Some("65536"), "P", &source()).is_err());
}

/// Unique arrays reject duplicates and pass distinct items through.
#[test]
fn array_uniqueness() {
    assert!(array().unique().parse(Some("a,b,a"), "A", &source()).is_err());
    assert_eq!(
        array().unique().parse(Some("a,b,c"), "A", &source()).unwrap(),
        Value::from(vec!["a", "b", "c"])
    );
}

/// A sub-validated array converts every item and keeps the item index in
/// failures.
#[test]
fn array_item_validation() {
    let validator = array().items(port());
    assert_eq!(
        validator.parse(Some("80,443"), "PORTS", &source()).unwrap(),
        Value::List(vec![Value::Num(80.0), Value::Num(443.0)])
    );

    let err = validator
        .parse(Some("80,99999"), "PORTS", &source())
        .unwrap_err();
    match err {
        ParseError::Invalid { expected, .. } => assert!(expected.contains("(item 1)")),
        other => panic!("unexpected error: {other:?}"),
    }
}

/// Choices run against the transformed value, after parsing.
#[test]
fn choices_see_final_values() {
    let validator = string().lowercase().choices(["info", "debug"]);
    assert!(validator.parse(Some("INFO"), "L", &source()).is_ok());
    assert!(validator.parse(Some("TRACE"), "L", &source()).is_err());

    // Numeric choices compare converted numbers, not raw text.
    let numeric = num().choices([1.0, 2.0]);
    assert!(numeric.parse(Some("2"), "N", &source()).is_ok());
    assert!(numeric.parse(Some("3"), "N", &source()).is_err());
}

/// A custom validator plugs into the same option surface as built-ins.
#[test]
fn custom_validators_share_the_contract() {
    let validator = custom(|raw: &str, field: &str| {
        raw.strip_prefix("v")
            .and_then(|rest| rest.parse::<f64>().ok())
            .ok_or_else(|| ParseError::invalid(field, raw, "a version like 'v2'"))
    })
    .default(1.0);

    assert_eq!(
        validator.parse(Some("v2"), "V", &source()).unwrap(),
        Value::Num(2.0)
    );
    assert_eq!(validator.parse(None, "V", &source()).unwrap(), Value::Num(1.0));
    assert!(validator.parse(Some("two"), "V", &source()).is_err());
}

/// Hosts accept all three shapes: DNS name, IPv4, IPv6 with zone.
#[test]
fn host_shapes() {
    for raw in ["db.internal", "10.0.0.1", "fe80::1%eth0"] {
        assert!(host().parse(Some(raw), "H", &source()).is_ok(), "{raw}");
    }
    assert!(host().parse(Some("not a host"), "H", &source()).is_err());
}

/// Email and URL validators reject near-misses.
#[test]
fn email_and_url_reject_near_misses() {
    assert!(email().parse(Some("user@example.com"), "E", &source()).is_ok());
    assert!(email().parse(Some("user@example"), "E", &source()).is_err());

    assert!(url().parse(Some("https://example.com"), "U", &source()).is_ok());
    assert!(url().parse(Some("ftp://example.com"), "U", &source()).is_err());
}

/// UUIDs normalize to lowercase on the way through.
#[test]
fn uuid_normalization() {
    let value = uuid()
        .parse(Some("550E8400-E29B-41D4-A716-446655440000"), "ID", &source())
        .unwrap();
    assert_eq!(
        value,
        Value::Str("550e8400-e29b-41d4-a716-446655440000".to_string())
    );
}

/// JSON schema predicates turn into the schema-mismatch variant.
#[test]
fn json_schema_predicate_failure_is_typed() {
    let validator = json().schema(|doc| doc.get("version").is_some());
    assert!(validator.parse(Some(r#"{"version": 1}"#), "J", &source()).is_ok());

    let err = validator.parse(Some("{}"), "J", &source()).unwrap_err();
    assert!(matches!(err, ParseError::SchemaMismatch { .. }));
}

//! Detection and parsing of every record id form.

mod common;

use common::packed_database_id;
use sierra_record_id::{
    detect, ApiRecordType, Detection, RecordId, RecordIdError, RecordIdKind, RecordIdParts,
};

fn detected(input: &str) -> Option<RecordIdKind> {
    detect(input).and_then(Detection::kind)
}

#[test]
fn test_detects_each_form() {
    let cases = [
        ("1234567", RecordIdKind::RecordNumber),
        ("123456@abc", RecordIdKind::RecordNumber),
        ("b123456", RecordIdKind::WeakRecordKey),
        (".o123456@north", RecordIdKind::WeakRecordKey),
        ("b12345672", RecordIdKind::StrongRecordKey),
        (".i1000001x", RecordIdKind::StrongRecordKey),
        ("420908029575", RecordIdKind::DatabaseId),
        ("/v4/bibs/1234567", RecordIdKind::RelativeV4ApiUrl),
        ("/v5/patrons/123456@abc", RecordIdKind::RelativeV5ApiUrl),
        (
            "https://lib.example.edu/iii/sierra-api/v4/items/1234567",
            RecordIdKind::AbsoluteV4ApiUrl,
        ),
        (
            "https://lib.example.edu/iii/sierra-api/v5/authorities/1234567",
            RecordIdKind::AbsoluteV5ApiUrl,
        ),
    ];
    for (input, kind) in cases {
        assert_eq!(detected(input), Some(kind), "detecting {input}");
        let id: RecordId = input.parse().unwrap_or_else(|e| panic!("parsing {input}: {e}"));
        assert_eq!(id.kind(), kind);
        assert_eq!(id.as_str(), input);
    }
}

#[test]
fn test_seven_character_key_bodies_are_ambiguous() {
    for input in ["b1234567", ".b1234567", "p1234567@abc", ".a9999999@z9"] {
        assert_eq!(detect(input), Some(Detection::AmbiguousRecordKey), "{input}");
        let err = input.parse::<RecordId>().unwrap_err();
        assert!(matches!(err, RecordIdError::AmbiguousForm(_)), "{input}");
    }
    // A trailing x settles it.
    assert_eq!(detected("b123456x"), Some(RecordIdKind::StrongRecordKey));
}

#[test]
fn test_ambiguous_key_parses_both_ways_when_named() {
    let weak = RecordId::parse(RecordIdKind::WeakRecordKey, "b1234567").unwrap();
    assert_eq!(weak.rec_num(), 1_234_567);

    let strong = RecordId::parse(RecordIdKind::StrongRecordKey, "b1234567").unwrap();
    assert_eq!(strong.rec_num(), 123_456);
    assert_ne!(weak, strong);
}

#[test]
fn test_surrounding_whitespace_is_ignored() {
    let id: RecordId = "\t b12345672 \n".parse().unwrap();
    assert_eq!(id.as_str(), "b12345672");
    assert_eq!(detected("  /v4/bibs/1234567"), Some(RecordIdKind::RelativeV4ApiUrl));
}

#[test]
fn test_rejects_malformed_ids() {
    for input in ["", "B1234567", "0123456", "12345", "b12345", "z1234567x", "#b123456"] {
        let err = input.parse::<RecordId>().unwrap_err();
        assert!(err.is_parse_error(), "{input} gave {err}");
    }
    // Upper case campus codes and campus codes longer than five characters.
    assert!("1234567@ABC".parse::<RecordId>().is_err());
    assert!("b123456@abcdef".parse::<RecordId>().is_err());
    // API URLs for record types the API does not serve.
    assert!("/v5/checkins/1234567".parse::<RecordId>().is_err());
    assert!("https://lib.example.edu/iii/sierra-api/v6/bibs/1234567"
        .parse::<RecordId>()
        .is_err());
}

#[test]
fn test_database_ids() {
    let packed = packed_database_id(42, 'i', 1_234_567);
    let id: RecordId = packed.to_string().parse().unwrap();
    assert_eq!(id.kind(), RecordIdKind::DatabaseId);
    assert_eq!(id.record_type_code(), Some('i'));
    assert_eq!(id.rec_num(), 1_234_567);
    assert_eq!(id.campus_id(), Some(42));
    assert!(id.is_virtual());

    // Larger than a u64.
    assert!("99999999999999999999".parse::<RecordId>().is_err());
}

#[test]
fn test_absolute_url_keeps_host_and_path() {
    let id: RecordId = "https://sierra.example.org/api/sierra/v5/orders/1234567@abc"
        .parse()
        .unwrap();
    match id.parts() {
        RecordIdParts::AbsoluteV5ApiUrl(url) => {
            assert_eq!(url.api_host, "sierra.example.org");
            assert_eq!(url.api_path, "/api/sierra/");
            assert_eq!(url.url.api_record_type, ApiRecordType::Orders);
            assert_eq!(url.url.campus_code.as_deref(), Some("abc"));
        },
        other => panic!("unexpected parts: {other:?}"),
    }
    // Ports are not part of the host grammar.
    assert!("https://sierra.example.org:443/iii/sierra-api/v5/bibs/1234567"
        .parse::<RecordId>()
        .is_err());
}

//! Property tests for detection, check digits and conversion.

mod common;

use common::packed_database_id;
use proptest::prelude::*;
use sierra_record_id::check_digit::is_valid_check_digit;
use sierra_record_id::record_type::{API_RECORD_TYPE_CODES, RECORD_TYPE_CODES};
use sierra_record_id::format::format;
use sierra_record_id::parse::parse;
use sierra_record_id::{
    check_digit, convert, detect, AbsoluteApiUrl, ApiRecordType, ApiUrl, ConvertOptions,
    DatabaseId, Detection, RecordId, RecordIdKind, RecordIdParts, RecordNumber, StrongRecordKey,
    ValidationOptions, WeakRecordKey,
};

fn rec_num_strategy() -> impl Strategy<Value = u32> {
    100_000u32..=9_999_999
}

fn campus_strategy() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[a-z0-9]{1,5}")
}

fn weak_key_strategy() -> impl Strategy<Value = WeakRecordKey> {
    (
        any::<bool>(),
        prop::sample::select(RECORD_TYPE_CODES.to_vec()),
        rec_num_strategy(),
        campus_strategy(),
    )
        .prop_map(|(initial_period, record_type_code, rec_num, campus_code)| WeakRecordKey {
            initial_period,
            record_type_code,
            rec_num,
            campus_code,
        })
}

fn api_url_strategy() -> impl Strategy<Value = ApiUrl> {
    (
        prop::sample::select(ApiRecordType::ALL.to_vec()),
        rec_num_strategy(),
        campus_strategy(),
    )
        .prop_map(|(api_record_type, rec_num, campus_code)| ApiUrl {
            api_record_type,
            rec_num,
            campus_code,
        })
}

fn absolute_api_url_strategy() -> impl Strategy<Value = AbsoluteApiUrl> {
    (
        "[a-z][a-z0-9-]{0,9}(\\.[a-z]{2,6}){1,2}",
        "(/[a-z][a-z0-9._-]{0,9}){1,3}/",
        api_url_strategy(),
    )
        .prop_map(|(api_host, api_path, url)| AbsoluteApiUrl {
            api_host,
            api_path,
            url,
        })
}

/// Any value of any of the eight forms.
fn record_id_parts_strategy() -> impl Strategy<Value = RecordIdParts> {
    prop_oneof![
        (rec_num_strategy(), campus_strategy()).prop_map(|(rec_num, campus_code)| {
            RecordIdParts::RecordNumber(RecordNumber {
                rec_num,
                campus_code,
            })
        }),
        weak_key_strategy().prop_map(RecordIdParts::WeakRecordKey),
        weak_key_strategy()
            .prop_map(|key| RecordIdParts::StrongRecordKey(StrongRecordKey::from_weak(key))),
        (
            prop::sample::select(RECORD_TYPE_CODES.to_vec()),
            rec_num_strategy(),
            any::<u16>(),
        )
            .prop_map(|(record_type_code, rec_num, campus_id)| {
                RecordIdParts::DatabaseId(DatabaseId {
                    record_type_code,
                    rec_num,
                    campus_id,
                })
            }),
        api_url_strategy().prop_map(RecordIdParts::RelativeV4ApiUrl),
        api_url_strategy().prop_map(RecordIdParts::RelativeV5ApiUrl),
        absolute_api_url_strategy().prop_map(RecordIdParts::AbsoluteV4ApiUrl),
        absolute_api_url_strategy().prop_map(RecordIdParts::AbsoluteV5ApiUrl),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

    #[test]
    fn check_digit_is_in_alphabet(rec_num in rec_num_strategy()) {
        let digit = check_digit(rec_num);
        prop_assert!(digit == 'x' || digit.is_ascii_digit());
        prop_assert!(is_valid_check_digit(rec_num, digit));
    }

    #[test]
    fn generated_strong_keys_validate(key in weak_key_strategy()) {
        let options = ConvertOptions::new().with_strong_keys_for_virtual_records(true);
        let weak = RecordId::new(RecordIdParts::WeakRecordKey(key));
        let strong = weak.convert_to(RecordIdKind::StrongRecordKey, &options)
            .unwrap_or_else(|e| panic!("convert failed: {e}"));
        prop_assert_eq!(strong.kind(), RecordIdKind::StrongRecordKey);
        prop_assert!(strong.validate(&ValidationOptions::default()).is_ok());
    }

    #[test]
    fn detection_follows_key_body_length(key in weak_key_strategy()) {
        let weak = RecordId::new(RecordIdParts::WeakRecordKey(key.clone()));
        let expected = if key.rec_num < 1_000_000 {
            Detection::Kind(RecordIdKind::WeakRecordKey)
        } else {
            Detection::AmbiguousRecordKey
        };
        prop_assert_eq!(detect(weak.as_str()), Some(expected));

        let digit = check_digit(key.rec_num);
        let options = ConvertOptions::new().with_strong_keys_for_virtual_records(true);
        let strong = weak.convert_to(RecordIdKind::StrongRecordKey, &options)
            .unwrap_or_else(|e| panic!("convert failed: {e}"));
        let expected = if key.rec_num >= 1_000_000 || digit == 'x' {
            Detection::Kind(RecordIdKind::StrongRecordKey)
        } else {
            Detection::AmbiguousRecordKey
        };
        prop_assert_eq!(detect(strong.as_str()), Some(expected));
    }

    #[test]
    fn canonical_string_parses_back(key in weak_key_strategy()) {
        let weak = RecordId::new(RecordIdParts::WeakRecordKey(key));
        let reparsed = RecordId::parse(RecordIdKind::WeakRecordKey, weak.as_str())
            .unwrap_or_else(|e| panic!("reparse failed: {e}"));
        prop_assert_eq!(reparsed, weak);
    }

    #[test]
    fn database_id_packing_matches_layout(
        campus_id in any::<u16>(),
        code in prop::sample::select(RECORD_TYPE_CODES.to_vec()),
        rec_num in rec_num_strategy(),
    ) {
        let packed = packed_database_id(campus_id, code, rec_num).to_string();
        let id: RecordId = packed.parse().unwrap_or_else(|e| panic!("parse failed: {e}"));
        prop_assert_eq!(id.campus_id(), Some(campus_id));
        prop_assert_eq!(id.record_type_code(), Some(code));
        prop_assert_eq!(id.rec_num(), rec_num);
        prop_assert_eq!(id.as_str(), packed.as_str());
    }

    #[test]
    fn non_virtual_conversion_chain_is_lossless(
        code in prop::sample::select(API_RECORD_TYPE_CODES.to_vec()),
        rec_num in rec_num_strategy(),
    ) {
        let options = ConvertOptions::new()
            .with_record_type_code(code)
            .with_api_host("lib.example.edu");
        let number = rec_num.to_string();
        let mut current = number.clone();
        let mut from = RecordIdKind::RecordNumber;
        for to in [
            RecordIdKind::StrongRecordKey,
            RecordIdKind::DatabaseId,
            RecordIdKind::RelativeV4ApiUrl,
            RecordIdKind::AbsoluteV5ApiUrl,
            RecordIdKind::RelativeV5ApiUrl,
            RecordIdKind::WeakRecordKey,
            RecordIdKind::RecordNumber,
        ] {
            // Six digit keys may be ambiguous, so the source form is always named.
            current = convert(&current, Some(from), to, &options)
                .unwrap_or_else(|e| panic!("{current} -> {to}: {e}"));
            from = to;
        }
        prop_assert_eq!(current, number);
    }

    #[test]
    fn canonical_form_round_trips_for_every_kind(parts in record_id_parts_strategy()) {
        let kind = parts.kind();
        let canonical = format(&parts);
        let reparsed = parse(kind, &canonical)
            .unwrap_or_else(|| panic!("{canonical} does not parse as a {kind}"));
        prop_assert_eq!(format(&reparsed), canonical.clone());
        prop_assert_eq!(reparsed, parts);
    }

    #[test]
    fn converting_to_the_same_kind_is_identity(parts in record_id_parts_strategy()) {
        let kind = parts.kind();
        let canonical = format(&parts);
        // Virtual strong keys would otherwise degrade to weak keys.
        let options = ConvertOptions::new().with_strong_keys_for_virtual_records(true);
        let converted = convert(&canonical, Some(kind), kind, &options)
            .unwrap_or_else(|e| panic!("{canonical} -> {kind}: {e}"));
        prop_assert_eq!(converted, canonical);
    }
}

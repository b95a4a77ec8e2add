//! Parsing record id strings into their parts.
//!
//! Each form has one anchored regular expression; a string either matches it
//! completely (after trimming surrounding whitespace) or is rejected.
//!
//! # Grammars
//!
//! - Record number: `[1-9]\d{5,6}(@[a-z0-9]{1,5})?`
//! - Weak record key: `\.?{type}[1-9]\d{5,6}(@[a-z0-9]{1,5})?`
//! - Strong record key: `\.?{type}[1-9]\d{5,6}[0-9x](@[a-z0-9]{1,5})?`
//! - Database id: `\d{12,20}`, unpacked as a 64-bit unsigned integer
//! - Relative API URL: `/vN/{api type}/{record number}`
//! - Absolute API URL: `https://{host}{path}vN/{api type}/{record number}`

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::kind::{ApiVersion, RecordIdKind};
use crate::parts::{
    AbsoluteApiUrl, ApiUrl, DatabaseId, RecordIdParts, RecordNumber, StrongRecordKey,
    WeakRecordKey,
};
use crate::record_type::{api_record_type_alternation, record_type_code_class};

/// Grammar of a record number, without anchors.
const REC_NUM: &str = r"([1-9]\d{5,6})";
/// Grammar of the optional virtual record suffix, without anchors.
const CAMPUS_SUFFIX: &str = r"(?:@([a-z0-9]{1,5}))?";
/// Grammar of an API host.
pub(crate) const API_HOST: &str = r"[-%._~!$&'()*+,;=a-zA-Z0-9]+";
/// Grammar of an API path prefix.
pub(crate) const API_PATH: &str = r"/[-/%._~!$&'()*+,;=:@a-zA-Z0-9]+/";

lazy_static! {
    static ref RECORD_NUMBER_RE: Regex =
        compile(&format!("^{REC_NUM}{CAMPUS_SUFFIX}$"));
    static ref WEAK_RECORD_KEY_RE: Regex = compile(&format!(
        r"^(\.?)({}){REC_NUM}{CAMPUS_SUFFIX}$",
        record_type_code_class()
    ));
    static ref STRONG_RECORD_KEY_RE: Regex = compile(&format!(
        r"^(\.?)({}){REC_NUM}([0-9x]){CAMPUS_SUFFIX}$",
        record_type_code_class()
    ));
    static ref DATABASE_ID_RE: Regex = compile(r"^\d{12,20}$");
    static ref RELATIVE_API_URL_RE: Regex = compile(&format!(
        r"^/(v4|v5)/({})/{REC_NUM}{CAMPUS_SUFFIX}$",
        api_record_type_alternation()
    ));
    static ref ABSOLUTE_API_URL_RE: Regex = compile(&format!(
        r"^https://({API_HOST})({API_PATH})(v4|v5)/({})/{REC_NUM}{CAMPUS_SUFFIX}$",
        api_record_type_alternation()
    ));
}

/// Compile one of the fixed grammars above.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("record id grammar must compile")
}

/// Parse `input` as the given form.
///
/// Returns `None` when the trimmed input does not match the form's grammar.
///
/// # Examples
///
/// ```
/// use sierra_record_id::parse::parse;
/// use sierra_record_id::RecordIdKind;
///
/// let parts = parse(RecordIdKind::WeakRecordKey, ".b1234567@abc").unwrap();
/// assert_eq!(parts.rec_num(), 1234567);
/// assert_eq!(parts.campus_code(), Some("abc"));
/// assert!(parse(RecordIdKind::RecordNumber, "b1234567").is_none());
/// ```
#[must_use]
pub fn parse(kind: RecordIdKind, input: &str) -> Option<RecordIdParts> {
    let input = input.trim();
    match kind {
        RecordIdKind::RecordNumber => parse_record_number(input).map(RecordIdParts::RecordNumber),
        RecordIdKind::WeakRecordKey => {
            parse_weak_record_key(input).map(RecordIdParts::WeakRecordKey)
        },
        RecordIdKind::StrongRecordKey => {
            parse_strong_record_key(input).map(RecordIdParts::StrongRecordKey)
        },
        RecordIdKind::DatabaseId => parse_database_id(input).map(RecordIdParts::DatabaseId),
        RecordIdKind::RelativeV4ApiUrl => parse_relative_api_url(input, ApiVersion::V4)
            .map(|url| RecordIdParts::relative_api_url(ApiVersion::V4, url)),
        RecordIdKind::RelativeV5ApiUrl => parse_relative_api_url(input, ApiVersion::V5)
            .map(|url| RecordIdParts::relative_api_url(ApiVersion::V5, url)),
        RecordIdKind::AbsoluteV4ApiUrl => parse_absolute_api_url(input, ApiVersion::V4)
            .map(|url| RecordIdParts::absolute_api_url(ApiVersion::V4, url)),
        RecordIdKind::AbsoluteV5ApiUrl => parse_absolute_api_url(input, ApiVersion::V5)
            .map(|url| RecordIdParts::absolute_api_url(ApiVersion::V5, url)),
    }
}

/// Parse a record number such as `1234567@abc`.
#[must_use]
pub fn parse_record_number(input: &str) -> Option<RecordNumber> {
    let caps = RECORD_NUMBER_RE.captures(input.trim())?;
    Some(RecordNumber {
        rec_num: rec_num(&caps, 1)?,
        campus_code: campus_code(&caps, 2),
    })
}

/// Parse a weak record key such as `.b1234567`.
#[must_use]
pub fn parse_weak_record_key(input: &str) -> Option<WeakRecordKey> {
    let caps = WEAK_RECORD_KEY_RE.captures(input.trim())?;
    Some(WeakRecordKey {
        initial_period: caps.get(1).is_some_and(|m| m.as_str() == "."),
        record_type_code: first_char(&caps, 2)?,
        rec_num: rec_num(&caps, 3)?,
        campus_code: campus_code(&caps, 4),
    })
}

/// Parse a strong record key such as `b12345672@abc`.
#[must_use]
pub fn parse_strong_record_key(input: &str) -> Option<StrongRecordKey> {
    let caps = STRONG_RECORD_KEY_RE.captures(input.trim())?;
    Some(StrongRecordKey {
        key: WeakRecordKey {
            initial_period: caps.get(1).is_some_and(|m| m.as_str() == "."),
            record_type_code: first_char(&caps, 2)?,
            rec_num: rec_num(&caps, 3)?,
            campus_code: campus_code(&caps, 5),
        },
        check_digit: first_char(&caps, 4)?,
    })
}

/// Parse and unpack a decimal database id.
///
/// Values that do not fit in 64 bits, or whose type bits are not a valid
/// code point, are rejected.
#[must_use]
pub fn parse_database_id(input: &str) -> Option<DatabaseId> {
    let input = input.trim();
    if !DATABASE_ID_RE.is_match(input) {
        return None;
    }
    unpack_database_id(input.parse().ok()?)
}

/// Split a packed database id into its fields.
#[must_use]
pub fn unpack_database_id(packed: u64) -> Option<DatabaseId> {
    let campus_id = u16::try_from((packed >> 48) & 0xFFFF).ok()?;
    let code_point = u32::try_from((packed >> 32) & 0xFFFF).ok()?;
    let rec_num = u32::try_from(packed & 0xFFFF_FFFF).ok()?;
    Some(DatabaseId {
        record_type_code: char::from_u32(code_point)?,
        rec_num,
        campus_id,
    })
}

/// Parse a relative API URL such as `/v5/items/1234567`.
#[must_use]
pub fn parse_relative_api_url(input: &str, version: ApiVersion) -> Option<ApiUrl> {
    let caps = RELATIVE_API_URL_RE.captures(input.trim())?;
    if caps.get(1)?.as_str() != version.segment() {
        return None;
    }
    api_url(&caps, 2)
}

/// Parse an absolute API URL such as `https://lib.example.edu/iii/sierra-api/v4/bibs/1234567`.
#[must_use]
pub fn parse_absolute_api_url(input: &str, version: ApiVersion) -> Option<AbsoluteApiUrl> {
    let caps = ABSOLUTE_API_URL_RE.captures(input.trim())?;
    if caps.get(3)?.as_str() != version.segment() {
        return None;
    }
    Some(AbsoluteApiUrl {
        api_host: caps.get(1)?.as_str().to_string(),
        api_path: caps.get(2)?.as_str().to_string(),
        url: api_url(&caps, 4)?,
    })
}

/// API record type, record number and campus code starting at capture group `first`.
fn api_url(caps: &Captures<'_>, first: usize) -> Option<ApiUrl> {
    Some(ApiUrl {
        api_record_type: caps.get(first)?.as_str().parse().ok()?,
        rec_num: rec_num(caps, first + 1)?,
        campus_code: campus_code(caps, first + 2),
    })
}

fn rec_num(caps: &Captures<'_>, group: usize) -> Option<u32> {
    caps.get(group)?.as_str().parse().ok()
}

fn campus_code(caps: &Captures<'_>, group: usize) -> Option<String> {
    caps.get(group).map(|m| m.as_str().to_string())
}

fn first_char(caps: &Captures<'_>, group: usize) -> Option<char> {
    caps.get(group)?.as_str().chars().next()
}

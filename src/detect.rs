//! Detecting which form a record id string is in.
//!
//! Detection looks only at the shape of the string (its first characters and
//! the length of its numeric body). It does not validate: a string detected as
//! a weak key may still fail to parse as one.
//!
//! The one inherent ambiguity is a record key whose body is 7 characters long
//! and does not end in `x`. `b1234567` is either a weak key for record
//! 1234567 or a strong key for record 123456 with check digit 7. Detection
//! reports [`Detection::AmbiguousRecordKey`] for these and never guesses.

use crate::kind::{Detection, RecordIdKind};

/// Minimum digit count that marks a database id rather than a record number.
const DATABASE_ID_MIN_DIGITS: usize = 12;

/// Detect the form of `input`.
///
/// Returns `None` for empty input or input that looks like no known form.
///
/// # Examples
///
/// ```
/// use sierra_record_id::detect::detect;
/// use sierra_record_id::{Detection, RecordIdKind};
///
/// assert_eq!(detect("b123456"), Some(Detection::Kind(RecordIdKind::WeakRecordKey)));
/// assert_eq!(detect("b12345672"), Some(Detection::Kind(RecordIdKind::StrongRecordKey)));
/// assert_eq!(detect("b1234567"), Some(Detection::AmbiguousRecordKey));
/// assert_eq!(detect(""), None);
/// ```
#[must_use]
pub fn detect(input: &str) -> Option<Detection> {
    let input = input.trim();
    let first = input.chars().next()?;
    if first == '.' {
        detect_record_key_strength(input)
    } else if input.starts_with("https://") {
        Some(Detection::Kind(detect_absolute_api_url_version(input)))
    } else if input.starts_with("/v4/") {
        Some(Detection::Kind(RecordIdKind::RelativeV4ApiUrl))
    } else if input.starts_with("/v5/") {
        Some(Detection::Kind(RecordIdKind::RelativeV5ApiUrl))
    } else if first.is_ascii_lowercase() {
        detect_record_key_strength(input)
    } else if first.is_ascii_digit() {
        let number = input.split_once('@').map_or(input, |(number, _)| number);
        let digits = number.chars().take_while(char::is_ascii_digit).count();
        if digits >= DATABASE_ID_MIN_DIGITS {
            Some(Detection::Kind(RecordIdKind::DatabaseId))
        } else {
            Some(Detection::Kind(RecordIdKind::RecordNumber))
        }
    } else {
        None
    }
}

/// Tell a weak key from a strong key by the length of its body.
///
/// `input` is a trimmed key with an optional leading period.
#[must_use]
pub fn detect_record_key_strength(input: &str) -> Option<Detection> {
    let unprefixed = input.strip_prefix('.').unwrap_or(input);
    let mut chars = unprefixed.chars();
    // Record type code.
    chars.next()?;
    let rest = chars.as_str();
    let body = rest.split_once('@').map_or(rest, |(body, _)| body);
    let last = body.chars().last()?;

    if last == 'x' {
        return Some(Detection::Kind(RecordIdKind::StrongRecordKey));
    }
    match body.chars().count() {
        6 => Some(Detection::Kind(RecordIdKind::WeakRecordKey)),
        7 => Some(Detection::AmbiguousRecordKey),
        8 => Some(Detection::Kind(RecordIdKind::StrongRecordKey)),
        _ => None,
    }
}

/// The version segment of an absolute URL is the third segment from the end
/// (`.../v5/bibs/1234567`); anything other than `v5` is treated as v4.
fn detect_absolute_api_url_version(input: &str) -> RecordIdKind {
    if input.rsplit('/').nth(2) == Some("v5") {
        RecordIdKind::AbsoluteV5ApiUrl
    } else {
        RecordIdKind::AbsoluteV4ApiUrl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(k: RecordIdKind) -> Option<Detection> {
        Some(Detection::Kind(k))
    }

    #[test]
    fn test_detect_empty_and_unknown() {
        assert_eq!(detect(""), None);
        assert_eq!(detect("   "), None);
        assert_eq!(detect("B1234567"), None);
        assert_eq!(detect("#1234567"), None);
        assert_eq!(detect("."), None);
        assert_eq!(detect("b"), None);
        assert_eq!(detect("b12345"), None);
        assert_eq!(detect("b123456789"), None);
    }

    #[test]
    fn test_detect_record_keys() {
        assert_eq!(detect("b123456"), kind(RecordIdKind::WeakRecordKey));
        assert_eq!(detect(".b123456@abc"), kind(RecordIdKind::WeakRecordKey));
        assert_eq!(detect("b12345678"), kind(RecordIdKind::StrongRecordKey));
        assert_eq!(detect(".i1234567x@ab"), kind(RecordIdKind::StrongRecordKey));
        assert_eq!(detect("b123456x"), kind(RecordIdKind::StrongRecordKey));
        assert_eq!(detect("b1234567"), Some(Detection::AmbiguousRecordKey));
        assert_eq!(detect(".p1234567@abc"), Some(Detection::AmbiguousRecordKey));
        assert_eq!(detect("  b123456  "), kind(RecordIdKind::WeakRecordKey));
    }

    #[test]
    fn test_detect_numbers() {
        assert_eq!(detect("1234567"), kind(RecordIdKind::RecordNumber));
        assert_eq!(detect("123456@abc"), kind(RecordIdKind::RecordNumber));
        assert_eq!(detect("420908029575"), kind(RecordIdKind::DatabaseId));
        assert_eq!(detect("12345678901"), kind(RecordIdKind::RecordNumber));
    }

    #[test]
    fn test_detect_api_urls() {
        assert_eq!(detect("/v4/bibs/1234567"), kind(RecordIdKind::RelativeV4ApiUrl));
        assert_eq!(detect("/v5/items/1234567@abc"), kind(RecordIdKind::RelativeV5ApiUrl));
        assert_eq!(
            detect("https://lib.example.edu/iii/sierra-api/v4/bibs/1234567"),
            kind(RecordIdKind::AbsoluteV4ApiUrl)
        );
        assert_eq!(
            detect("https://lib.example.edu/iii/sierra-api/v5/bibs/1234567"),
            kind(RecordIdKind::AbsoluteV5ApiUrl)
        );
        assert_eq!(
            detect("https://lib.example.edu/v5/api/v4/bibs/1234567"),
            kind(RecordIdKind::AbsoluteV4ApiUrl)
        );
        // Relative URLs need the leading slash.
        assert_eq!(detect("v4/bibs/1234567"), None);
    }
}

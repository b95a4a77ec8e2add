//! Formatting parts back into canonical record id strings.
//!
//! The inverse of [`parse`](crate::parse). Formatting never fails: every
//! [`RecordIdParts`] value has exactly one canonical rendering.

use crate::parts::{
    AbsoluteApiUrl, ApiUrl, DatabaseId, RecordIdParts, RecordNumber, StrongRecordKey,
    WeakRecordKey,
};
use crate::kind::ApiVersion;

/// Render parts in their canonical form.
///
/// # Examples
///
/// ```
/// use sierra_record_id::format::format;
/// use sierra_record_id::parts::{RecordIdParts, RecordNumber};
///
/// let parts = RecordIdParts::RecordNumber(RecordNumber {
///     rec_num: 1234567,
///     campus_code: Some("abc".to_string()),
/// });
/// assert_eq!(format(&parts), "1234567@abc");
/// ```
#[must_use]
pub fn format(parts: &RecordIdParts) -> String {
    match parts {
        RecordIdParts::RecordNumber(p) => format_record_number(p),
        RecordIdParts::WeakRecordKey(p) => format_weak_record_key(p),
        RecordIdParts::StrongRecordKey(p) => format_strong_record_key(p),
        RecordIdParts::DatabaseId(p) => pack_database_id(p).to_string(),
        RecordIdParts::RelativeV4ApiUrl(p) => format_relative_api_url(p, ApiVersion::V4),
        RecordIdParts::RelativeV5ApiUrl(p) => format_relative_api_url(p, ApiVersion::V5),
        RecordIdParts::AbsoluteV4ApiUrl(p) => format_absolute_api_url(p, ApiVersion::V4),
        RecordIdParts::AbsoluteV5ApiUrl(p) => format_absolute_api_url(p, ApiVersion::V5),
    }
}

/// `1234567[@campus]`
#[must_use]
pub fn format_record_number(parts: &RecordNumber) -> String {
    let mut out = parts.rec_num.to_string();
    push_campus_suffix(&mut out, parts.campus_code.as_deref());
    out
}

/// `[.]b1234567[@campus]`
#[must_use]
pub fn format_weak_record_key(parts: &WeakRecordKey) -> String {
    let mut out = key_prefix(parts);
    push_campus_suffix(&mut out, parts.campus_code.as_deref());
    out
}

/// `[.]b1234567c[@campus]`
#[must_use]
pub fn format_strong_record_key(parts: &StrongRecordKey) -> String {
    let mut out = key_prefix(&parts.key);
    out.push(parts.check_digit);
    push_campus_suffix(&mut out, parts.key.campus_code.as_deref());
    out
}

/// Pack a database id into its 64-bit integer.
///
/// Layout: bits 48-63 campus id, bits 32-47 the type code's code point,
/// bits 0-31 the record number. Code points above `0xFFFF` are masked to
/// 16 bits; record type codes are ASCII.
#[must_use]
pub fn pack_database_id(parts: &DatabaseId) -> u64 {
    (u64::from(parts.campus_id) << 48)
        | ((u64::from(u32::from(parts.record_type_code)) & 0xFFFF) << 32)
        | u64::from(parts.rec_num)
}

/// `/vN/{api type}/1234567[@campus]`
#[must_use]
pub fn format_relative_api_url(parts: &ApiUrl, version: ApiVersion) -> String {
    let mut out = String::with_capacity(24);
    out.push('/');
    push_api_tail(&mut out, parts, version);
    out
}

/// `https://{host}{path}vN/{api type}/1234567[@campus]`
#[must_use]
pub fn format_absolute_api_url(parts: &AbsoluteApiUrl, version: ApiVersion) -> String {
    let mut out = format!("https://{}{}", parts.api_host, parts.api_path);
    push_api_tail(&mut out, &parts.url, version);
    out
}

fn key_prefix(parts: &WeakRecordKey) -> String {
    let mut out = String::with_capacity(16);
    if parts.initial_period {
        out.push('.');
    }
    out.push(parts.record_type_code);
    out.push_str(&parts.rec_num.to_string());
    out
}

fn push_api_tail(out: &mut String, parts: &ApiUrl, version: ApiVersion) {
    out.push_str(version.segment());
    out.push('/');
    out.push_str(parts.api_record_type.as_str());
    out.push('/');
    out.push_str(&parts.rec_num.to_string());
    push_campus_suffix(out, parts.campus_code.as_deref());
}

fn push_campus_suffix(out: &mut String, campus_code: Option<&str>) {
    if let Some(code) = campus_code.filter(|c| !c.is_empty()) {
        out.push('@');
        out.push_str(code);
    }
}

//! Validation of record id parts.
//!
//! Parsing only checks the shape of a string. Validation checks the semantic
//! invariants: record number range, record type alphabet, campus code
//! grammar, check digit correctness, and the API host and path grammars.

use lazy_static::lazy_static;
use regex::Regex;

use crate::check_digit::check_digit;
use crate::detect::detect;
use crate::error::{RecordIdError, Result};
use crate::kind::{Detection, RecordIdKind};
use crate::parse::{parse, API_HOST, API_PATH};
use crate::parts::{AbsoluteApiUrl, ApiUrl, DatabaseId, RecordIdParts, StrongRecordKey, WeakRecordKey};
use crate::record_type::is_valid_record_type_code;

/// Smallest valid record number.
pub const MIN_REC_NUM: u32 = 100_000;

/// Largest valid record number.
pub const MAX_REC_NUM: u32 = 9_999_999;

lazy_static! {
    static ref CAMPUS_CODE_RE: Regex = compile(r"^[a-z0-9]{1,5}$");
    static ref API_HOST_RE: Regex = compile(&format!("^{API_HOST}$"));
    static ref API_PATH_RE: Regex = compile(&format!("^{API_PATH}$"));
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("validation grammar must compile")
}

/// Options controlling validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Restrict record type codes to those the REST API supports.
    pub api_compatible_only: bool,

    /// Absolute API URLs must have exactly this host.
    pub expected_api_host: Option<String>,

    /// Absolute API URLs must have exactly this path prefix.
    pub expected_api_path: Option<String>,
}

impl ValidationOptions {
    /// Only accept API-compatible record types.
    #[must_use]
    pub fn api_compatible_only() -> Self {
        Self {
            api_compatible_only: true,
            ..Self::default()
        }
    }

    /// Require absolute API URLs to point at `host` and `path`.
    #[must_use]
    pub fn with_expected_api_location(
        mut self,
        host: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        self.expected_api_host = Some(host.into());
        self.expected_api_path = Some(path.into());
        self
    }
}

/// Validate parts against the invariants of their form.
///
/// # Errors
///
/// Returns [`RecordIdError::Validation`] naming the first offending part.
pub fn validate(parts: &RecordIdParts, options: &ValidationOptions) -> Result<()> {
    match parts {
        RecordIdParts::RecordNumber(p) => {
            validate_rec_num(p.rec_num)?;
            validate_campus_code(p.campus_code.as_deref())
        },
        RecordIdParts::WeakRecordKey(p) => validate_weak_record_key(p, options),
        RecordIdParts::StrongRecordKey(p) => validate_strong_record_key(p, options),
        RecordIdParts::DatabaseId(p) => validate_database_id(p, options),
        RecordIdParts::RelativeV4ApiUrl(p) | RecordIdParts::RelativeV5ApiUrl(p) => {
            validate_api_url(p)
        },
        RecordIdParts::AbsoluteV4ApiUrl(p) | RecordIdParts::AbsoluteV5ApiUrl(p) => {
            validate_absolute_api_url(p, options)
        },
    }
}

/// Parse and validate a string, returning `false` on any failure.
///
/// When `kind` is `None` the form is detected; an ambiguous record key is
/// never valid without an explicit kind.
///
/// # Examples
///
/// ```
/// use sierra_record_id::validate::{is_valid, ValidationOptions};
/// use sierra_record_id::RecordIdKind;
///
/// let options = ValidationOptions::default();
/// assert!(is_valid("b12345672", None, &options));
/// assert!(!is_valid("b12345673", None, &options));
/// assert!(is_valid("b1234567", Some(RecordIdKind::WeakRecordKey), &options));
/// assert!(!is_valid("b1234567", None, &options));
/// ```
#[must_use]
pub fn is_valid(input: &str, kind: Option<RecordIdKind>, options: &ValidationOptions) -> bool {
    let kind = match kind {
        Some(kind) => kind,
        None => match detect(input) {
            Some(Detection::Kind(kind)) => kind,
            Some(Detection::AmbiguousRecordKey) | None => return false,
        },
    };
    parse(kind, input).is_some_and(|parts| validate(&parts, options).is_ok())
}

/// Record number must lie in `100000..=9999999`.
///
/// # Errors
///
/// Returns [`RecordIdError::Validation`] for out-of-range numbers.
pub fn validate_rec_num(rec_num: u32) -> Result<()> {
    if (MIN_REC_NUM..=MAX_REC_NUM).contains(&rec_num) {
        Ok(())
    } else {
        Err(RecordIdError::invalid(
            "recNum",
            format!("{rec_num} is out of range"),
        ))
    }
}

/// Record type code must belong to the selected alphabet.
///
/// # Errors
///
/// Returns [`RecordIdError::Validation`] for unknown codes.
pub fn validate_record_type_code(code: char, api_compatible_only: bool) -> Result<()> {
    if is_valid_record_type_code(code, api_compatible_only) {
        Ok(())
    } else if api_compatible_only {
        Err(RecordIdError::invalid(
            "recordTypeCode",
            format!("{code} is invalid or is not api-compatible"),
        ))
    } else {
        Err(RecordIdError::invalid(
            "recordTypeCode",
            format!("{code} is not a record type code"),
        ))
    }
}

/// Campus code, when present, must be 1-5 lowercase alphanumerics.
///
/// # Errors
///
/// Returns [`RecordIdError::Validation`] for malformed codes.
pub fn validate_campus_code(campus_code: Option<&str>) -> Result<()> {
    match campus_code {
        Some(code) if !CAMPUS_CODE_RE.is_match(code) => Err(RecordIdError::invalid(
            "campusCode",
            format!("{code:?} must be 1-5 lowercase letters or digits"),
        )),
        _ => Ok(()),
    }
}

/// Check digit must match the one computed from the record number.
///
/// # Errors
///
/// Returns [`RecordIdError::Validation`] on mismatch.
pub fn validate_check_digit(rec_num: u32, candidate: char) -> Result<()> {
    let expected = check_digit(rec_num);
    if candidate == expected {
        Ok(())
    } else {
        Err(RecordIdError::invalid(
            "checkDigit",
            format!("{candidate} does not match {expected} computed for {rec_num}"),
        ))
    }
}

fn validate_weak_record_key(parts: &WeakRecordKey, options: &ValidationOptions) -> Result<()> {
    validate_rec_num(parts.rec_num)?;
    validate_record_type_code(parts.record_type_code, options.api_compatible_only)?;
    validate_campus_code(parts.campus_code.as_deref())
}

fn validate_strong_record_key(parts: &StrongRecordKey, options: &ValidationOptions) -> Result<()> {
    validate_weak_record_key(&parts.key, options)?;
    validate_check_digit(parts.key.rec_num, parts.check_digit)
}

// campus_id is a u16, so its range holds by construction.
fn validate_database_id(parts: &DatabaseId, options: &ValidationOptions) -> Result<()> {
    validate_rec_num(parts.rec_num)?;
    validate_record_type_code(parts.record_type_code, options.api_compatible_only)
}

// The API record type is API-compatible by construction.
fn validate_api_url(parts: &ApiUrl) -> Result<()> {
    validate_rec_num(parts.rec_num)?;
    validate_campus_code(parts.campus_code.as_deref())
}

fn validate_absolute_api_url(parts: &AbsoluteApiUrl, options: &ValidationOptions) -> Result<()> {
    validate_api_url(&parts.url)?;
    if !API_HOST_RE.is_match(&parts.api_host) {
        return Err(RecordIdError::invalid(
            "apiHost",
            format!("{:?} is not a valid host", parts.api_host),
        ));
    }
    if !API_PATH_RE.is_match(&parts.api_path) || parts.api_path.contains("//") {
        return Err(RecordIdError::invalid(
            "apiPath",
            format!("{:?} is not a valid path prefix", parts.api_path),
        ));
    }
    if let Some(host) = &options.expected_api_host {
        if *host != parts.api_host {
            return Err(RecordIdError::invalid(
                "apiHost",
                format!("{} does not match the expected host {host}", parts.api_host),
            ));
        }
    }
    if let Some(path) = &options.expected_api_path {
        if *path != parts.api_path {
            return Err(RecordIdError::invalid(
                "apiPath",
                format!("{} does not match the expected path {path}", parts.api_path),
            ));
        }
    }
    Ok(())
}

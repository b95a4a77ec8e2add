//! Structural parts of each record id form.
//!
//! [`RecordIdParts`] is what the parser produces and the formatter consumes.
//! The field layout follows the forms themselves: a strong key is a weak key
//! plus a check digit, an absolute API URL is a relative one plus host and path.

use serde::{Deserialize, Serialize};

use crate::check_digit::check_digit;
use crate::kind::{ApiVersion, RecordIdKind};
use crate::record_type::ApiRecordType;

/// Parts of a bare record number: `1234567[@campus]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordNumber {
    /// Native sequence number (6 or 7 digits when valid)
    pub rec_num: u32,
    /// Campus code of a virtual record
    pub campus_code: Option<String>,
}

/// Parts of a weak record key: `[.]b1234567[@campus]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeakRecordKey {
    /// Cosmetic leading period
    pub initial_period: bool,
    /// Record type code (`b`, `i`, ...)
    pub record_type_code: char,
    /// Native sequence number
    pub rec_num: u32,
    /// Campus code of a virtual record
    pub campus_code: Option<String>,
}

/// Parts of a strong record key: `[.]b1234567c[@campus]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StrongRecordKey {
    /// The weak key fields
    pub key: WeakRecordKey,
    /// `0`-`9` or `x`
    pub check_digit: char,
}

impl StrongRecordKey {
    /// Strengthen a weak key, computing its check digit.
    #[must_use]
    pub fn from_weak(key: WeakRecordKey) -> Self {
        let check_digit = check_digit(key.rec_num);
        StrongRecordKey { key, check_digit }
    }
}

/// Parts of a packed database id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatabaseId {
    /// Record type code, stored as its code point in bits 32-47
    pub record_type_code: char,
    /// Native sequence number, bits 0-31
    pub rec_num: u32,
    /// Numeric campus id, bits 48-63; 0 for local records
    pub campus_id: u16,
}

/// Parts shared by relative and absolute API URLs: `/vN/bibs/1234567[@campus]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApiUrl {
    /// API resource name of the record type
    #[serde(with = "api_record_type_serde")]
    pub api_record_type: ApiRecordType,
    /// Native sequence number
    pub rec_num: u32,
    /// Campus code of a virtual record
    pub campus_code: Option<String>,
}

/// Parts of an absolute API URL: `https://{host}{path}vN/bibs/1234567[@campus]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbsoluteApiUrl {
    /// Host, e.g. `lib.example.edu`
    pub api_host: String,
    /// Path prefix with leading and trailing slash, e.g. `/iii/sierra-api/`
    pub api_path: String,
    /// The relative part
    pub url: ApiUrl,
}

/// Parts of any record id form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordIdParts {
    /// A bare record number
    RecordNumber(RecordNumber),
    /// A weak record key
    WeakRecordKey(WeakRecordKey),
    /// A strong record key
    StrongRecordKey(StrongRecordKey),
    /// A packed database id
    DatabaseId(DatabaseId),
    /// A relative v4 API URL
    RelativeV4ApiUrl(ApiUrl),
    /// An absolute v4 API URL
    AbsoluteV4ApiUrl(AbsoluteApiUrl),
    /// A relative v5 API URL
    RelativeV5ApiUrl(ApiUrl),
    /// An absolute v5 API URL
    AbsoluteV5ApiUrl(AbsoluteApiUrl),
}

impl RecordIdParts {
    /// The form these parts belong to.
    #[must_use]
    pub fn kind(&self) -> RecordIdKind {
        match self {
            RecordIdParts::RecordNumber(_) => RecordIdKind::RecordNumber,
            RecordIdParts::WeakRecordKey(_) => RecordIdKind::WeakRecordKey,
            RecordIdParts::StrongRecordKey(_) => RecordIdKind::StrongRecordKey,
            RecordIdParts::DatabaseId(_) => RecordIdKind::DatabaseId,
            RecordIdParts::RelativeV4ApiUrl(_) => RecordIdKind::RelativeV4ApiUrl,
            RecordIdParts::AbsoluteV4ApiUrl(_) => RecordIdKind::AbsoluteV4ApiUrl,
            RecordIdParts::RelativeV5ApiUrl(_) => RecordIdKind::RelativeV5ApiUrl,
            RecordIdParts::AbsoluteV5ApiUrl(_) => RecordIdKind::AbsoluteV5ApiUrl,
        }
    }

    /// Build API URL parts for the given version.
    #[must_use]
    pub fn relative_api_url(version: ApiVersion, url: ApiUrl) -> Self {
        match version {
            ApiVersion::V4 => RecordIdParts::RelativeV4ApiUrl(url),
            ApiVersion::V5 => RecordIdParts::RelativeV5ApiUrl(url),
        }
    }

    /// Build absolute API URL parts for the given version.
    #[must_use]
    pub fn absolute_api_url(version: ApiVersion, url: AbsoluteApiUrl) -> Self {
        match version {
            ApiVersion::V4 => RecordIdParts::AbsoluteV4ApiUrl(url),
            ApiVersion::V5 => RecordIdParts::AbsoluteV5ApiUrl(url),
        }
    }

    /// Native sequence number.
    #[must_use]
    pub fn rec_num(&self) -> u32 {
        match self {
            RecordIdParts::RecordNumber(p) => p.rec_num,
            RecordIdParts::WeakRecordKey(p) => p.rec_num,
            RecordIdParts::StrongRecordKey(p) => p.key.rec_num,
            RecordIdParts::DatabaseId(p) => p.rec_num,
            RecordIdParts::RelativeV4ApiUrl(p) | RecordIdParts::RelativeV5ApiUrl(p) => p.rec_num,
            RecordIdParts::AbsoluteV4ApiUrl(p) | RecordIdParts::AbsoluteV5ApiUrl(p) => p.url.rec_num,
        }
    }

    /// Record type code; a record number carries none.
    #[must_use]
    pub fn record_type_code(&self) -> Option<char> {
        match self {
            RecordIdParts::RecordNumber(_) => None,
            RecordIdParts::WeakRecordKey(p) => Some(p.record_type_code),
            RecordIdParts::StrongRecordKey(p) => Some(p.key.record_type_code),
            RecordIdParts::DatabaseId(p) => Some(p.record_type_code),
            RecordIdParts::RelativeV4ApiUrl(p) | RecordIdParts::RelativeV5ApiUrl(p) => {
                Some(p.api_record_type.record_type_code())
            },
            RecordIdParts::AbsoluteV4ApiUrl(p) | RecordIdParts::AbsoluteV5ApiUrl(p) => {
                Some(p.url.api_record_type.record_type_code())
            },
        }
    }

    /// Campus code; always `None` for a database id, which carries a numeric campus id.
    #[must_use]
    pub fn campus_code(&self) -> Option<&str> {
        match self {
            RecordIdParts::RecordNumber(p) => p.campus_code.as_deref(),
            RecordIdParts::WeakRecordKey(p) => p.campus_code.as_deref(),
            RecordIdParts::StrongRecordKey(p) => p.key.campus_code.as_deref(),
            RecordIdParts::DatabaseId(_) => None,
            RecordIdParts::RelativeV4ApiUrl(p) | RecordIdParts::RelativeV5ApiUrl(p) => {
                p.campus_code.as_deref()
            },
            RecordIdParts::AbsoluteV4ApiUrl(p) | RecordIdParts::AbsoluteV5ApiUrl(p) => {
                p.url.campus_code.as_deref()
            },
        }
    }

    /// Is this a record hosted by another campus?
    #[must_use]
    pub fn is_virtual(&self) -> bool {
        match self {
            RecordIdParts::DatabaseId(p) => p.campus_id != 0,
            other => other.campus_code().is_some_and(|code| !code.is_empty()),
        }
    }

    /// Normalise an empty campus code to `None`.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        fn clear_empty(code: &mut Option<String>) {
            if code.as_deref() == Some("") {
                *code = None;
            }
        }
        match &mut self {
            RecordIdParts::RecordNumber(p) => clear_empty(&mut p.campus_code),
            RecordIdParts::WeakRecordKey(p) => clear_empty(&mut p.campus_code),
            RecordIdParts::StrongRecordKey(p) => clear_empty(&mut p.key.campus_code),
            RecordIdParts::DatabaseId(_) => {},
            RecordIdParts::RelativeV4ApiUrl(p) | RecordIdParts::RelativeV5ApiUrl(p) => {
                clear_empty(&mut p.campus_code);
            },
            RecordIdParts::AbsoluteV4ApiUrl(p) | RecordIdParts::AbsoluteV5ApiUrl(p) => {
                clear_empty(&mut p.url.campus_code);
            },
        }
        self
    }
}

mod api_record_type_serde {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    use crate::record_type::ApiRecordType;

    pub fn serialize<S: Serializer>(t: &ApiRecordType, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(t.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ApiRecordType, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

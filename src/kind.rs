//! The forms a Sierra record id can take.
//!
//! Every record id is one of the eight [`RecordIdKind`]s (seven forms, with
//! the v4 and v5 API URLs told apart). Detection can also
//! yield [`Detection::AmbiguousRecordKey`] for a key whose strength cannot be
//! told from its text alone.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tag naming one of the textual or binary forms of a record id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordIdKind {
    /// `1234567` or `1234567@abcde`
    RecordNumber,
    /// `b1234567`, `.b1234567@abcde`
    WeakRecordKey,
    /// `b12345672`, `.b1234567x@abcde`
    StrongRecordKey,
    /// Decimal rendering of the packed 64-bit database id.
    DatabaseId,
    /// `/v4/bibs/1234567`
    RelativeV4ApiUrl,
    /// `https://host/iii/sierra-api/v4/bibs/1234567`
    AbsoluteV4ApiUrl,
    /// `/v5/bibs/1234567`
    RelativeV5ApiUrl,
    /// `https://host/iii/sierra-api/v5/bibs/1234567`
    AbsoluteV5ApiUrl,
}

impl RecordIdKind {
    /// Every kind, in declaration order.
    pub const ALL: [RecordIdKind; 8] = [
        RecordIdKind::RecordNumber,
        RecordIdKind::WeakRecordKey,
        RecordIdKind::StrongRecordKey,
        RecordIdKind::DatabaseId,
        RecordIdKind::RelativeV4ApiUrl,
        RecordIdKind::AbsoluteV4ApiUrl,
        RecordIdKind::RelativeV5ApiUrl,
        RecordIdKind::AbsoluteV5ApiUrl,
    ];

    /// Human readable name used in error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            RecordIdKind::RecordNumber => "record number",
            RecordIdKind::WeakRecordKey => "weak record key",
            RecordIdKind::StrongRecordKey => "strong record key",
            RecordIdKind::DatabaseId => "database id",
            RecordIdKind::RelativeV4ApiUrl => "relative v4 api url",
            RecordIdKind::AbsoluteV4ApiUrl => "absolute v4 api url",
            RecordIdKind::RelativeV5ApiUrl => "relative v5 api url",
            RecordIdKind::AbsoluteV5ApiUrl => "absolute v5 api url",
        }
    }

    /// Weak or strong record key.
    #[must_use]
    pub fn is_record_key(self) -> bool {
        matches!(
            self,
            RecordIdKind::WeakRecordKey | RecordIdKind::StrongRecordKey
        )
    }

    /// API version of an API URL kind, `None` for the other kinds.
    #[must_use]
    pub fn api_version(self) -> Option<ApiVersion> {
        match self {
            RecordIdKind::RelativeV4ApiUrl | RecordIdKind::AbsoluteV4ApiUrl => Some(ApiVersion::V4),
            RecordIdKind::RelativeV5ApiUrl | RecordIdKind::AbsoluteV5ApiUrl => Some(ApiVersion::V5),
            _ => None,
        }
    }

    /// Absolute (`https://`) API URL kind.
    #[must_use]
    pub fn is_absolute_api_url(self) -> bool {
        matches!(
            self,
            RecordIdKind::AbsoluteV4ApiUrl | RecordIdKind::AbsoluteV5ApiUrl
        )
    }
}

impl fmt::Display for RecordIdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RecordIdKind {
    type Err = String;

    /// Accepts either the display name (`weak record key`) or the
    /// serialized tag (`WEAK_RECORD_KEY`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', " ");
        RecordIdKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| format!("unknown record id kind: {s}"))
    }
}

/// Version segment of a Sierra REST API URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// `v4`
    V4,
    /// `v5`
    V5,
}

impl ApiVersion {
    /// Path segment, without slashes.
    #[must_use]
    pub fn segment(self) -> &'static str {
        match self {
            ApiVersion::V4 => "v4",
            ApiVersion::V5 => "v5",
        }
    }

    /// Relative URL kind for this version.
    #[must_use]
    pub fn relative_kind(self) -> RecordIdKind {
        match self {
            ApiVersion::V4 => RecordIdKind::RelativeV4ApiUrl,
            ApiVersion::V5 => RecordIdKind::RelativeV5ApiUrl,
        }
    }

    /// Absolute URL kind for this version.
    #[must_use]
    pub fn absolute_kind(self) -> RecordIdKind {
        match self {
            ApiVersion::V4 => RecordIdKind::AbsoluteV4ApiUrl,
            ApiVersion::V5 => RecordIdKind::AbsoluteV5ApiUrl,
        }
    }
}

/// Outcome of detecting the form of a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Detection {
    /// The string has exactly one plausible form.
    Kind(RecordIdKind),
    /// A record key with a 7 character body: either a weak key with a 7-digit
    /// record number or a strong key with a 6-digit record number and a
    /// numeric check digit.
    AmbiguousRecordKey,
}

impl Detection {
    /// The detected kind, `None` when ambiguous.
    #[must_use]
    pub fn kind(self) -> Option<RecordIdKind> {
        match self {
            Detection::Kind(kind) => Some(kind),
            Detection::AmbiguousRecordKey => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_display_name_and_tag() {
        for kind in RecordIdKind::ALL {
            assert_eq!(kind.name().parse::<RecordIdKind>(), Ok(kind));
        }
        assert_eq!(
            "ABSOLUTE_V5_API_URL".parse::<RecordIdKind>(),
            Ok(RecordIdKind::AbsoluteV5ApiUrl)
        );
        assert!("bib number".parse::<RecordIdKind>().is_err());
    }

    #[test]
    fn test_serde_tags() {
        let json = serde_json::to_string(&RecordIdKind::RelativeV4ApiUrl).unwrap();
        assert_eq!(json, "\"RELATIVE_V4_API_URL\"");
        let kind: RecordIdKind = serde_json::from_str("\"STRONG_RECORD_KEY\"").unwrap();
        assert_eq!(kind, RecordIdKind::StrongRecordKey);
    }

    #[test]
    fn test_api_versions() {
        assert_eq!(RecordIdKind::AbsoluteV5ApiUrl.api_version(), Some(ApiVersion::V5));
        assert_eq!(RecordIdKind::DatabaseId.api_version(), None);
        assert_eq!(ApiVersion::V4.absolute_kind(), RecordIdKind::AbsoluteV4ApiUrl);
        assert!(RecordIdKind::StrongRecordKey.is_record_key());
        assert!(!RecordIdKind::RecordNumber.is_record_key());
    }
}

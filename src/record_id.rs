//! The [`RecordId`] value type.
//!
//! A `RecordId` is parsed parts plus a lazily computed canonical string. Two
//! ids are equal when their parts are equal, regardless of the whitespace or
//! the empty campus suffix of the strings they were parsed from.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::convert::{convert_parts, convert_parts_async, ConvertOptions};
use crate::detect::detect;
use crate::error::{RecordIdError, Result};
use crate::format::format;
use crate::kind::{Detection, RecordIdKind};
use crate::parse::parse;
use crate::parts::RecordIdParts;
use crate::validate::{validate, ValidationOptions};

/// A parsed Sierra record id in one of its eight forms.
///
/// # Examples
///
/// ```
/// use sierra_record_id::{ConvertOptions, RecordId, RecordIdKind};
///
/// let id: RecordId = "b12345672".parse().unwrap();
/// assert_eq!(id.kind(), RecordIdKind::StrongRecordKey);
/// assert_eq!(id.rec_num(), 1234567);
///
/// let db = id.convert_to(RecordIdKind::DatabaseId, &ConvertOptions::new()).unwrap();
/// assert_eq!(db.as_str(), "420908029575");
/// ```
#[derive(Debug, Clone)]
pub struct RecordId {
    parts: RecordIdParts,
    canonical: OnceLock<String>,
}

impl RecordId {
    /// Wrap parts, dropping an empty campus code.
    #[must_use]
    pub fn new(parts: RecordIdParts) -> Self {
        Self {
            parts: parts.normalized(),
            canonical: OnceLock::new(),
        }
    }

    /// Parse `input` as the given form.
    ///
    /// # Errors
    ///
    /// Returns [`RecordIdError::Parse`] when `input` does not match the form.
    pub fn parse(kind: RecordIdKind, input: &str) -> Result<Self> {
        parse(kind, input)
            .map(Self::new)
            .ok_or_else(|| RecordIdError::Parse {
                kind,
                input: input.to_string(),
            })
    }

    /// Parse `input` as the given form and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`RecordIdError::Parse`] or [`RecordIdError::Validation`].
    pub fn parse_validated(
        kind: RecordIdKind,
        input: &str,
        options: &ValidationOptions,
    ) -> Result<Self> {
        let id = Self::parse(kind, input)?;
        id.validate(options)?;
        Ok(id)
    }

    /// Detect the form of `input` and parse it.
    ///
    /// # Errors
    ///
    /// Returns [`RecordIdError::Unrecognized`] when no form is detected,
    /// [`RecordIdError::AmbiguousForm`] for a record key that could be weak or
    /// strong, and [`RecordIdError::Parse`] when the detected form does not parse.
    pub fn detect_and_parse(input: &str) -> Result<Self> {
        match detect(input) {
            Some(Detection::Kind(kind)) => Self::parse(kind, input),
            Some(Detection::AmbiguousRecordKey) => {
                Err(RecordIdError::AmbiguousForm(input.trim().to_string()))
            },
            None => Err(RecordIdError::Unrecognized(input.to_string())),
        }
    }

    /// Check the parts against the validation rules.
    ///
    /// # Errors
    ///
    /// Returns [`RecordIdError::Validation`] naming the first invalid part.
    pub fn validate(&self, options: &ValidationOptions) -> Result<()> {
        validate(&self.parts, options)
    }

    /// Convert to another form without consulting a campus resolver.
    ///
    /// Converting to the same form returns a clone, except for record keys,
    /// which are rebuilt so that `initial_period` applies.
    ///
    /// # Errors
    ///
    /// See [`convert_parts`].
    pub fn convert_to(&self, to: RecordIdKind, options: &ConvertOptions) -> Result<Self> {
        if self.kind() == to && !to.is_record_key() {
            return Ok(self.clone());
        }
        convert_parts(&self.parts, to, options).map(Self::new)
    }

    /// Convert to another form, resolving campuses as needed.
    ///
    /// # Errors
    ///
    /// See [`convert_parts_async`].
    pub async fn convert_to_async(&self, to: RecordIdKind, options: &ConvertOptions) -> Result<Self> {
        if self.kind() == to && !to.is_record_key() {
            return Ok(self.clone());
        }
        convert_parts_async(&self.parts, to, options)
            .await
            .map(Self::new)
    }

    /// Canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.canonical.get_or_init(|| format(&self.parts))
    }

    /// Form of this id.
    #[must_use]
    pub fn kind(&self) -> RecordIdKind {
        self.parts.kind()
    }

    /// Parsed parts.
    #[must_use]
    pub fn parts(&self) -> &RecordIdParts {
        &self.parts
    }

    /// Consume the id, returning its parts.
    #[must_use]
    pub fn into_parts(self) -> RecordIdParts {
        self.parts
    }

    /// Native sequence number.
    #[must_use]
    pub fn rec_num(&self) -> u32 {
        self.parts.rec_num()
    }

    /// Record type code; `None` for a record number.
    #[must_use]
    pub fn record_type_code(&self) -> Option<char> {
        self.parts.record_type_code()
    }

    /// Campus code of a virtual record; `None` for database ids.
    #[must_use]
    pub fn campus_code(&self) -> Option<&str> {
        self.parts.campus_code()
    }

    /// Numeric campus id; only database ids carry one.
    #[must_use]
    pub fn campus_id(&self) -> Option<u16> {
        match &self.parts {
            RecordIdParts::DatabaseId(db) => Some(db.campus_id),
            _ => None,
        }
    }

    /// Is this a record hosted by another campus?
    #[must_use]
    pub fn is_virtual(&self) -> bool {
        self.parts.is_virtual()
    }
}

impl From<RecordIdParts> for RecordId {
    fn from(parts: RecordIdParts) -> Self {
        Self::new(parts)
    }
}

impl PartialEq for RecordId {
    fn eq(&self, other: &Self) -> bool {
        self.parts == other.parts
    }
}

impl Eq for RecordId {}

impl Hash for RecordId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.parts.hash(state);
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for RecordId {
    type Err = RecordIdError;

    fn from_str(s: &str) -> Result<Self> {
        Self::detect_and_parse(s)
    }
}

impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

//! Error types for record id operations.
//!
//! This module provides the [`RecordIdError`] type for every detection, parsing,
//! validation and conversion failure, and the [`Result`] convenience type.

use thiserror::Error;

use crate::kind::RecordIdKind;

/// Boxed error returned by a [`CampusResolver`](crate::resolver::CampusResolver).
pub type ResolveError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for all record id operations.
#[derive(Error, Debug)]
pub enum RecordIdError {
    /// The string does not match the grammar of the expected form.
    #[error("Cannot parse the string \"{input}\" as a {kind}")]
    Parse {
        /// Form the string was parsed as.
        kind: RecordIdKind,
        /// The offending input.
        input: String,
    },

    /// The string does not look like any known form.
    #[error("Could not determine what kind of record id this is: \"{0}\"")]
    Unrecognized(String),

    /// The string is a 7-digit record key that may be weak or strong.
    #[error("Ambiguous record key, cannot tell if it is strong or weak: \"{0}\"")]
    AmbiguousForm(String),

    /// A field needed for the requested conversion is absent.
    #[error("{field} is required when converting from a {from} to a {to}")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
        /// Source form.
        from: RecordIdKind,
        /// Target form.
        to: RecordIdKind,
    },

    /// The target form cannot be reached from the source.
    #[error("Cannot convert from a {from} to a {to}: {reason}")]
    UnsupportedConversion {
        /// Source form.
        from: RecordIdKind,
        /// Target form.
        to: RecordIdKind,
        /// Why the conversion is impossible.
        reason: String,
    },

    /// A database id conversion was attempted synchronously on a virtual record.
    #[error(
        "Cannot convert from a {from} to a {to} for a virtual record synchronously, \
         use the asynchronous conversion with a campus resolver instead"
    )]
    VirtualRecordRestriction {
        /// Source form.
        from: RecordIdKind,
        /// Target form.
        to: RecordIdKind,
    },

    /// Required configuration (API host, campus resolver) is unavailable.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A part of a record id breaks one of its invariants.
    #[error("{part} part is invalid: {message}")]
    Validation {
        /// Name of the offending part.
        part: &'static str,
        /// Description including the offending value.
        message: String,
    },

    /// The campus resolver failed.
    #[error("Campus resolver failed: {0}")]
    Resolver(#[source] ResolveError),
}

impl RecordIdError {
    /// Returns true if the input could not be parsed or recognised.
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            RecordIdError::Parse { .. } | RecordIdError::Unrecognized(_)
        )
    }

    /// Returns true if the input was an ambiguous record key.
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, RecordIdError::AmbiguousForm(_))
    }

    /// Returns true if the conversion needs the asynchronous path.
    #[must_use]
    pub fn is_virtual_record_restriction(&self) -> bool {
        matches!(self, RecordIdError::VirtualRecordRestriction { .. })
    }

    /// Returns true if this is a validation failure.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(self, RecordIdError::Validation { .. })
    }

    pub(crate) fn invalid(part: &'static str, message: impl Into<String>) -> Self {
        RecordIdError::Validation {
            part,
            message: message.into(),
        }
    }
}

/// Convenience type alias for [`std::result::Result`] with [`RecordIdError`].
pub type Result<T> = std::result::Result<T, RecordIdError>;

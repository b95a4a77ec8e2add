#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Sierra record ids
//!
//! Detection, parsing, validation and conversion of the identifiers a Sierra
//! integrated library system uses for its records.
//!
//! ## Quick Start
//!
//! ```
//! use sierra_record_id::{convert, ConvertOptions, RecordId, RecordIdKind};
//!
//! # fn main() -> sierra_record_id::Result<()> {
//! // Detect and parse.
//! let id: RecordId = ".b12345672".parse()?;
//! assert_eq!(id.kind(), RecordIdKind::StrongRecordKey);
//!
//! // Convert a record number, which needs a record type.
//! let options = ConvertOptions::new().with_record_type_code('b');
//! let key = convert("1234567", None, RecordIdKind::WeakRecordKey, &options)?;
//! assert_eq!(key, "b1234567");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`mod@detect`]: guess the form of a string
//! - [`parse`]: per-form grammars
//! - [`format`]: canonical string forms and database id packing
//! - [`validate`]: field-level validation
//! - [`mod@convert`]: conversion between forms, synchronous and asynchronous
//! - [`record_id`]: the [`RecordId`] value type
//! - [`resolver`]: campus code / campus id resolution
//! - [`config`]: API host and path defaults
//! - [`mod@check_digit`]: mod-11 check digits
//! - [`error`]: error type

pub mod check_digit;
pub mod config;
pub mod convert;
pub mod detect;
pub mod error;
pub mod format;
pub mod kind;
pub mod parse;
pub mod parts;
pub mod record_id;
pub mod record_type;
pub mod resolver;
pub mod validate;

pub use check_digit::check_digit;
pub use config::ApiLocation;
pub use convert::{convert, convert_async, ConversionContext, ConvertOptions};
pub use detect::detect;
pub use error::{RecordIdError, ResolveError, Result};
pub use kind::{ApiVersion, Detection, RecordIdKind};
pub use parts::{
    AbsoluteApiUrl, ApiUrl, DatabaseId, RecordIdParts, RecordNumber, StrongRecordKey,
    WeakRecordKey,
};
pub use record_id::RecordId;
pub use record_type::ApiRecordType;
pub use resolver::{CampusResolver, InMemoryCampusResolver};
pub use validate::{is_valid, ValidationOptions};

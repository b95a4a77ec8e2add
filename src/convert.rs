//! Conversion between record id forms.
//!
//! Every conversion gathers the fields shared by all forms (record type code,
//! record number, campus) from the source, then builds the target from them.
//! Rules, in priority order:
//!
//! - Converting a form to itself returns it unchanged, except for weak and
//!   strong keys, which are rebuilt so the `initial_period` option applies.
//! - A record number carries no record type, so converting it to any other
//!   form needs [`ConvertOptions::record_type_code`].
//! - A strong key for a virtual record degrades to a weak key unless
//!   [`ConvertOptions::strong_keys_for_virtual_records`] is set. Check digits
//!   are always recomputed, never copied from the source.
//! - A database id packs a numeric campus id, keys and URLs carry a campus
//!   code. Converting a virtual record between the two needs a
//!   [`CampusResolver`] and therefore the asynchronous entry points
//!   ([`convert_async`], [`convert_parts_async`]). The synchronous ones fail
//!   with [`RecordIdError::VirtualRecordRestriction`].
//! - API URLs only exist for API-compatible record types.
//! - Absolute API URLs need a host, from the context, the source or
//!   `SIERRA_API_HOST`.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::ApiLocation;
use crate::detect::detect;
use crate::error::{RecordIdError, Result};
use crate::format::format;
use crate::kind::{Detection, RecordIdKind};
use crate::parse::parse;
use crate::parts::{
    AbsoluteApiUrl, ApiUrl, DatabaseId, RecordIdParts, RecordNumber, StrongRecordKey,
    WeakRecordKey,
};
use crate::record_type::ApiRecordType;
use crate::resolver::CampusResolver;

/// Per-call context: API location and campus resolver.
#[derive(Clone, Default)]
pub struct ConversionContext {
    /// API host for absolute URLs; overrides the source and `SIERRA_API_HOST`.
    pub api_host: Option<String>,

    /// API path prefix for absolute URLs; overrides the source and `SIERRA_API_PATH`.
    pub api_path: Option<String>,

    /// Resolver used by the asynchronous conversions for virtual records.
    pub resolver: Option<Arc<dyn CampusResolver>>,
}

impl fmt::Debug for ConversionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionContext")
            .field("api_host", &self.api_host)
            .field("api_path", &self.api_path)
            .field("resolver", &self.resolver.as_ref().map(|_| "CampusResolver"))
            .finish()
    }
}

/// Options for a conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Record type for sources that carry none (record numbers).
    pub record_type_code: Option<char>,

    /// Leading period on weak and strong keys; defaults to the source key's own.
    pub initial_period: Option<bool>,

    /// Produce strong keys for virtual records instead of degrading to weak keys.
    pub strong_keys_for_virtual_records: bool,

    /// API location and campus resolver.
    pub context: ConversionContext,
}

impl ConvertOptions {
    /// Default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the record type code.
    #[must_use]
    pub fn with_record_type_code(mut self, code: char) -> Self {
        self.record_type_code = Some(code);
        self
    }

    /// Force the leading period on or off.
    #[must_use]
    pub fn with_initial_period(mut self, initial_period: bool) -> Self {
        self.initial_period = Some(initial_period);
        self
    }

    /// Allow strong keys for virtual records.
    #[must_use]
    pub fn with_strong_keys_for_virtual_records(mut self, force: bool) -> Self {
        self.strong_keys_for_virtual_records = force;
        self
    }

    /// Set the API host.
    #[must_use]
    pub fn with_api_host(mut self, host: impl Into<String>) -> Self {
        self.context.api_host = Some(host.into());
        self
    }

    /// Set the API path prefix.
    #[must_use]
    pub fn with_api_path(mut self, path: impl Into<String>) -> Self {
        self.context.api_path = Some(path.into());
        self
    }

    /// Set the campus resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn CampusResolver>) -> Self {
        self.context.resolver = Some(resolver);
        self
    }
}

/// Fields shared by every form, gathered from a source id.
#[derive(Debug)]
struct Fields {
    from: RecordIdKind,
    record_type_code: Option<char>,
    rec_num: u32,
    campus_code: Option<String>,
    // Known numeric campus id: only database ids carry one, or a resolver supplies it.
    campus_id: Option<u16>,
    initial_period: bool,
    api_host: Option<String>,
    api_path: Option<String>,
}

impl Fields {
    fn gather(parts: &RecordIdParts, options: &ConvertOptions) -> Self {
        let (source_period, campus_id) = match parts {
            RecordIdParts::WeakRecordKey(p) => (p.initial_period, None),
            RecordIdParts::StrongRecordKey(p) => (p.key.initial_period, None),
            RecordIdParts::DatabaseId(p) => (false, Some(p.campus_id)),
            _ => (false, None),
        };
        let (api_host, api_path) = match parts {
            RecordIdParts::AbsoluteV4ApiUrl(p) | RecordIdParts::AbsoluteV5ApiUrl(p) => {
                (Some(p.api_host.clone()), Some(p.api_path.clone()))
            },
            _ => (None, None),
        };
        Fields {
            from: parts.kind(),
            record_type_code: parts.record_type_code().or(options.record_type_code),
            rec_num: parts.rec_num(),
            campus_code: parts
                .campus_code()
                .filter(|code| !code.is_empty())
                .map(str::to_string),
            campus_id,
            initial_period: options.initial_period.unwrap_or(source_period),
            api_host,
            api_path,
        }
    }

    fn record_type_code(&self, to: RecordIdKind) -> Result<char> {
        self.record_type_code.ok_or(RecordIdError::MissingField {
            field: "record_type_code",
            from: self.from,
            to,
        })
    }

    fn weak_record_key(&self, to: RecordIdKind) -> Result<WeakRecordKey> {
        Ok(WeakRecordKey {
            initial_period: self.initial_period,
            record_type_code: self.record_type_code(to)?,
            rec_num: self.rec_num,
            campus_code: self.campus_code.clone(),
        })
    }

    fn api_url(&self, to: RecordIdKind) -> Result<ApiUrl> {
        let code = self.record_type_code(to)?;
        let api_record_type = ApiRecordType::try_from(code).map_err(|reason| {
            RecordIdError::UnsupportedConversion {
                from: self.from,
                to,
                reason,
            }
        })?;
        Ok(ApiUrl {
            api_record_type,
            rec_num: self.rec_num,
            campus_code: self.campus_code.clone(),
        })
    }

    fn absolute_api_url(&self, to: RecordIdKind, options: &ConvertOptions) -> Result<AbsoluteApiUrl> {
        let url = self.api_url(to)?;
        let location = ApiLocation::resolve(
            options.context.api_host.as_deref().or(self.api_host.as_deref()),
            options.context.api_path.as_deref().or(self.api_path.as_deref()),
        )?;
        Ok(AbsoluteApiUrl {
            api_host: location.host,
            api_path: location.path,
            url,
        })
    }

    fn database_id(&self, to: RecordIdKind) -> Result<DatabaseId> {
        let record_type_code = self.record_type_code(to)?;
        if u32::from(record_type_code) > 0xFFFF {
            return Err(RecordIdError::UnsupportedConversion {
                from: self.from,
                to,
                reason: format!("record type code {record_type_code:?} does not fit in 16 bits"),
            });
        }
        let campus_id = match &self.campus_code {
            None => self.campus_id.unwrap_or(0),
            Some(_) => self
                .campus_id
                .ok_or(RecordIdError::VirtualRecordRestriction { from: self.from, to })?,
        };
        Ok(DatabaseId {
            record_type_code,
            rec_num: self.rec_num,
            campus_id,
        })
    }

    fn build(&self, to: RecordIdKind, options: &ConvertOptions) -> Result<RecordIdParts> {
        let parts = match to {
            RecordIdKind::RecordNumber => RecordIdParts::RecordNumber(RecordNumber {
                rec_num: self.rec_num,
                campus_code: self.campus_code.clone(),
            }),
            RecordIdKind::WeakRecordKey => RecordIdParts::WeakRecordKey(self.weak_record_key(to)?),
            RecordIdKind::StrongRecordKey => {
                let key = self.weak_record_key(to)?;
                if key.campus_code.is_some() && !options.strong_keys_for_virtual_records {
                    debug!(
                        rec_num = key.rec_num,
                        campus_code = ?key.campus_code,
                        "virtual record, producing a weak record key instead of a strong one"
                    );
                    RecordIdParts::WeakRecordKey(key)
                } else {
                    RecordIdParts::StrongRecordKey(StrongRecordKey::from_weak(key))
                }
            },
            RecordIdKind::DatabaseId => RecordIdParts::DatabaseId(self.database_id(to)?),
            RecordIdKind::RelativeV4ApiUrl => RecordIdParts::RelativeV4ApiUrl(self.api_url(to)?),
            RecordIdKind::RelativeV5ApiUrl => RecordIdParts::RelativeV5ApiUrl(self.api_url(to)?),
            RecordIdKind::AbsoluteV4ApiUrl => {
                RecordIdParts::AbsoluteV4ApiUrl(self.absolute_api_url(to, options)?)
            },
            RecordIdKind::AbsoluteV5ApiUrl => {
                RecordIdParts::AbsoluteV5ApiUrl(self.absolute_api_url(to, options)?)
            },
        };
        Ok(parts)
    }
}

/// Converting a form to itself is a no-op, except for keys.
fn is_identity(from: RecordIdKind, to: RecordIdKind) -> bool {
    from == to && !to.is_record_key()
}

/// Detect (when `from` is `None`) and parse the source string.
fn parse_source(id: &str, from: Option<RecordIdKind>) -> Result<RecordIdParts> {
    let kind = match from {
        Some(kind) => kind,
        None => match detect(id) {
            Some(Detection::Kind(kind)) => kind,
            Some(Detection::AmbiguousRecordKey) => {
                return Err(RecordIdError::AmbiguousForm(id.trim().to_string()))
            },
            None => return Err(RecordIdError::Unrecognized(id.to_string())),
        },
    };
    parse(kind, id).ok_or_else(|| RecordIdError::Parse {
        kind,
        input: id.to_string(),
    })
}

fn resolver(options: &ConvertOptions) -> Result<&dyn CampusResolver> {
    options.context.resolver.as_deref().ok_or_else(|| {
        RecordIdError::Configuration(
            "a campus resolver is required to convert virtual records to or from database ids"
                .to_string(),
        )
    })
}

/// Convert a record id string to another form.
///
/// `from` names the source form; when `None` it is detected, and an
/// ambiguous record key fails with [`RecordIdError::AmbiguousForm`].
///
/// # Errors
///
/// Any [`RecordIdError`] except [`RecordIdError::Resolver`]; see the module
/// documentation for the rules.
///
/// # Examples
///
/// ```
/// use sierra_record_id::{convert, ConvertOptions, RecordIdKind};
///
/// let key = convert(
///     "1234567",
///     Some(RecordIdKind::RecordNumber),
///     RecordIdKind::WeakRecordKey,
///     &ConvertOptions::new().with_record_type_code('b'),
/// )
/// .unwrap();
/// assert_eq!(key, "b1234567");
/// ```
pub fn convert(
    id: &str,
    from: Option<RecordIdKind>,
    to: RecordIdKind,
    options: &ConvertOptions,
) -> Result<String> {
    let parts = parse_source(id, from)?;
    if is_identity(parts.kind(), to) {
        return Ok(id.trim().to_string());
    }
    convert_parts(&parts, to, options).map(|target| format(&target))
}

/// Convert parts to another form without consulting a resolver.
///
/// # Errors
///
/// Fails with [`RecordIdError::VirtualRecordRestriction`] when a virtual
/// record would need its campus resolved, and with the other
/// [`RecordIdError`] variants as described in the module documentation.
pub fn convert_parts(
    parts: &RecordIdParts,
    to: RecordIdKind,
    options: &ConvertOptions,
) -> Result<RecordIdParts> {
    let from = parts.kind();
    trace!(%from, %to, "converting record id");
    if is_identity(from, to) {
        return Ok(parts.clone());
    }
    if let RecordIdParts::DatabaseId(db) = parts {
        if db.campus_id != 0 {
            return Err(RecordIdError::VirtualRecordRestriction { from, to });
        }
    }
    Fields::gather(parts, options).build(to, options)
}

/// Convert a record id string to another form, resolving campuses as needed.
///
/// Behaves like [`convert`] but resolves a virtual record's campus through
/// the resolver in `options.context`. At most one resolver call is made.
///
/// # Errors
///
/// As [`convert`], plus [`RecordIdError::Configuration`] when a resolver is
/// needed but absent and [`RecordIdError::Resolver`] when it fails.
pub async fn convert_async(
    id: &str,
    from: Option<RecordIdKind>,
    to: RecordIdKind,
    options: &ConvertOptions,
) -> Result<String> {
    let parts = parse_source(id, from)?;
    if is_identity(parts.kind(), to) {
        return Ok(id.trim().to_string());
    }
    let target = convert_parts_async(&parts, to, options).await?;
    Ok(format(&target))
}

/// Convert parts to another form, resolving campuses as needed.
///
/// # Errors
///
/// As [`convert_parts`], except that virtual records are resolved instead of
/// rejected; fails with [`RecordIdError::Configuration`] or
/// [`RecordIdError::Resolver`] when resolution is impossible.
pub async fn convert_parts_async(
    parts: &RecordIdParts,
    to: RecordIdKind,
    options: &ConvertOptions,
) -> Result<RecordIdParts> {
    let from = parts.kind();
    trace!(%from, %to, "converting record id asynchronously");
    if is_identity(from, to) {
        return Ok(parts.clone());
    }
    let mut fields = Fields::gather(parts, options);
    match (&fields.campus_code, fields.campus_id) {
        (None, Some(campus_id)) if campus_id != 0 => {
            let campus_code = resolver(options)?
                .resolve_campus_code_from_id(campus_id)
                .await
                .map_err(RecordIdError::Resolver)?;
            debug!(campus_id, %campus_code, "resolved campus code");
            fields.campus_code = Some(campus_code);
        },
        (Some(campus_code), None) if to == RecordIdKind::DatabaseId => {
            let campus_id = resolver(options)?
                .resolve_campus_id_from_code(campus_code)
                .await
                .map_err(RecordIdError::Resolver)?;
            if campus_id == 0 {
                return Err(RecordIdError::Resolver(
                    format!("campus code {campus_code} resolved to campus id 0, which marks local records")
                        .into(),
                ));
            }
            debug!(%campus_code, campus_id, "resolved campus id");
            fields.campus_id = Some(campus_id);
        },
        _ => {},
    }
    fields.build(to, options)
}

//! Defaults for absolute API URLs.
//!
//! The host and path prefix of the Sierra REST API come from, in order:
//! the caller's [`ConversionContext`](crate::convert::ConversionContext),
//! the source id (when it is itself an absolute URL), the process environment,
//! and finally a built-in default for the path.

use crate::error::{RecordIdError, Result};

/// Environment variable naming the API host.
pub const API_HOST_ENV: &str = "SIERRA_API_HOST";

/// Environment variable naming the API path prefix.
pub const API_PATH_ENV: &str = "SIERRA_API_PATH";

/// Path prefix used when none is configured.
pub const DEFAULT_API_PATH: &str = "/iii/sierra-api/";

/// Host and path prefix of the REST API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiLocation {
    /// Host, e.g. `lib.example.edu`.
    pub host: String,

    /// Path prefix with leading and trailing slash.
    pub path: String,
}

impl ApiLocation {
    /// Resolve the location, falling back to `SIERRA_API_HOST` / `SIERRA_API_PATH`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordIdError::Configuration`] when no host is given and
    /// `SIERRA_API_HOST` is not set.
    pub fn resolve(host: Option<&str>, path: Option<&str>) -> Result<Self> {
        Self::resolve_with(host, path, |name| std::env::var(name).ok())
    }

    /// Resolve the location using `lookup` in place of the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`RecordIdError::Configuration`] when neither `host` nor the
    /// looked-up `SIERRA_API_HOST` yields a non-empty host.
    pub fn resolve_with<F>(host: Option<&str>, path: Option<&str>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = non_empty(host)
            .map(str::to_string)
            .or_else(|| lookup(API_HOST_ENV).filter(|h| !h.is_empty()))
            .ok_or_else(|| {
                RecordIdError::Configuration(format!(
                    "apiHost is not set and {API_HOST_ENV} must be set in the environment \
                     to build an absolute api url"
                ))
            })?;

        let path = non_empty(path)
            .map(str::to_string)
            .or_else(|| lookup(API_PATH_ENV).filter(|p| !p.is_empty()))
            .unwrap_or_else(|| DEFAULT_API_PATH.to_string());

        Ok(Self { host, path })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

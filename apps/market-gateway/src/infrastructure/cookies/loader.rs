//! Startup cookie resolution.
//!
//! Each source is resolved once, in order: cookie file (if present and not
//! blank), environment variable, persisted config store. Runtime updates go
//! through [`super::CookieStore::set`] instead.

use std::io::ErrorKind;
use std::path::PathBuf;

use crate::application::ports::ConfigStore;
use crate::domain::UpstreamSource;

/// Where a resolved cookie came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookieOrigin {
    /// Local cookie file.
    File,
    /// Environment variable.
    Environment,
    /// Persisted config store.
    ConfigStore,
}

/// A cookie found during startup resolution.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedCookie {
    /// The raw cookie string, trimmed.
    pub value: String,
    /// Where it was found.
    pub origin: CookieOrigin,
}

impl std::fmt::Debug for ResolvedCookie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedCookie")
            .field("value", &"<redacted>")
            .field("origin", &self.origin)
            .finish()
    }
}

/// Candidate locations for one source's cookie.
#[derive(Debug, Clone, Default)]
pub struct CookieSources {
    /// Cookie file path.
    pub file: PathBuf,
    /// Value of the source's environment variable, if set.
    pub env_value: Option<String>,
}

/// Config store key holding the cookie for `source`.
#[must_use]
pub fn config_store_key(source: UpstreamSource) -> String {
    format!("{}_cookie", source.as_str())
}

/// Resolve the startup cookie for `source`, or `None` when nothing is set.
pub fn resolve_cookie(
    source: UpstreamSource,
    sources: &CookieSources,
    store: &dyn ConfigStore,
) -> Option<ResolvedCookie> {
    let found = read_cookie_file(source, sources)
        .map(|value| (value, CookieOrigin::File))
        .or_else(|| non_blank(sources.env_value.clone()).map(|v| (v, CookieOrigin::Environment)))
        .or_else(|| {
            non_blank(store.get(&config_store_key(source))).map(|v| (v, CookieOrigin::ConfigStore))
        });

    match found {
        Some((value, origin)) => {
            tracing::info!(source = %source, ?origin, "Cookie loaded");
            Some(ResolvedCookie { value, origin })
        }
        None => {
            tracing::info!(
                source = %source,
                "No cookie configured, upstream calls may be rejected"
            );
            None
        }
    }
}

fn read_cookie_file(source: UpstreamSource, sources: &CookieSources) -> Option<String> {
    match std::fs::read_to_string(&sources.file) {
        Ok(content) => non_blank(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => {
            tracing::warn!(
                source = %source,
                path = %sources.file.display(),
                error = %e,
                "Failed to read cookie file"
            );
            None
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

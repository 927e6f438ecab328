//! Trusted origin checks
//!
//! Used for callback URL validation and for CSRF protection on
//! state-changing auth requests.

use axum::http::{HeaderMap, header};
use url::Url;

/// `scheme://host[:port]` of an absolute URL
fn origin_of(value: &str) -> Option<String> {
    let url = Url::parse(value.trim()).ok()?;
    let origin = url.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}

/// Host used to resolve relative paths; never reachable
const RELATIVE_BASE: &str = "http://gatehouse.invalid/";

/// Whether a relative path stays on this site once a browser resolves it
fn is_same_site_path(path: &str) -> bool {
    if path.starts_with("//") || path.starts_with("/\\") {
        return false;
    }

    let Ok(base) = Url::parse(RELATIVE_BASE) else {
        return false;
    };
    base.join(path)
        .map(|resolved| resolved.origin() == base.origin())
        .unwrap_or(false)
}

/// Whether `candidate` may be used as a redirect target or request origin
///
/// Relative paths on this site are trusted. Absolute URLs are trusted
/// when their origin matches one of `trusted_origins`. Candidates holding
/// whitespace or control characters are never trusted.
pub fn is_trusted_origin(candidate: &str, trusted_origins: &[String]) -> bool {
    if candidate.is_empty()
        || candidate
            .chars()
            .any(|c| c.is_control() || c.is_whitespace())
    {
        return false;
    }

    if candidate.starts_with('/') {
        return is_same_site_path(candidate);
    }

    let Some(candidate_origin) = origin_of(candidate) else {
        return false;
    };

    trusted_origins
        .iter()
        .filter_map(|trusted| origin_of(trusted))
        .any(|trusted| trusted == candidate_origin)
}

/// Origin of the browser making the request, from `Origin` or `Referer`
pub fn request_origin(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::ORIGIN)
        .or_else(|| headers.get(header::REFERER))
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty() && *value != "null")
        .map(ToOwned::to_owned)
}

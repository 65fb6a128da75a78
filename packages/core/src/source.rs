//! Location helpers shared by the front ends.
//!
//! Front ends accept either a local path or an HTTP(S) URL for rule sets and
//! schema documents. These helpers only look at the string; fetching is left
//! to the caller.

use url::Url;

/// Path segment of an OData service's metadata document.
pub const METADATA_SEGMENT: &str = "/$metadata";

/// `true` if `location` has an `http` or `https` scheme (case-insensitive).
pub fn is_remote(location: &str) -> bool {
    let location = location.trim_start();
    ["http://", "https://"].iter().any(|scheme| {
        location
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// The metadata document URL for a service root.
///
/// Trailing slashes are dropped and `/$metadata` is appended unless the URL
/// already ends with it (in any case).
pub fn metadata_url(base: &str) -> String {
    let base = base.trim().trim_end_matches('/');
    let ends_with_segment = base.len() >= METADATA_SEGMENT.len()
        && base
            .get(base.len() - METADATA_SEGMENT.len()..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(METADATA_SEGMENT));
    if ends_with_segment {
        base.to_string()
    } else {
        format!("{base}{METADATA_SEGMENT}")
    }
}

/// Parse `url` as an absolute `http`/`https` URL with a host.
pub fn parse_http_url(url: &str) -> Option<Url> {
    let parsed = Url::parse(url.trim()).ok()?;
    let remote = matches!(parsed.scheme(), "http" | "https") && parsed.has_host();
    remote.then_some(parsed)
}

//! # URI Helpers
//!
//! Joining and splitting of schema identifiers and reference URIs.
//! Absolute URIs are normalized through the `url` crate so that the same
//! resource written two ways (`HTTP://Example.com/a` and
//! `http://example.com/a`) maps to the same index key. Relative
//! identifiers that have no absolute base are kept verbatim.

use url::Url;

use crate::error::CoreError;

/// Split `uri#fragment` into its resource and fragment parts.
///
/// The fragment excludes the `#`. A trailing `#` yields `Some("")`.
pub fn split_fragment(uri: &str) -> (&str, Option<&str>) {
    match uri.split_once('#') {
        Some((resource, fragment)) => (resource, Some(fragment)),
        None => (uri, None),
    }
}

/// Normalize a URI for use as an index key.
///
/// Absolute URIs are re-serialized by the `url` crate; an empty trailing
/// fragment is dropped in all cases.
pub fn normalize_uri(uri: &str) -> String {
    let (resource, fragment) = split_fragment(uri);
    let resource = match Url::parse(resource) {
        Ok(url) => url.to_string(),
        Err(_) => resource.to_string(),
    };
    match fragment {
        Some(f) if !f.is_empty() => format!("{resource}#{f}"),
        _ => resource,
    }
}

/// Resolve `reference` against an optional `base`.
///
/// - An absolute reference is returned normalized.
/// - A fragment-only reference is appended to the base resource.
/// - A relative reference is joined per RFC 3986 when the base is absolute,
///   and returned unchanged otherwise.
pub fn join_uri(base: Option<&str>, reference: &str) -> String {
    if Url::parse(reference).is_ok() {
        return normalize_uri(reference);
    }

    let Some(base) = base.filter(|b| !b.is_empty()) else {
        return normalize_uri(reference);
    };
    let (base_resource, _) = split_fragment(base);

    if reference.starts_with('#') {
        return normalize_uri(&format!("{base_resource}{reference}"));
    }

    match Url::parse(base_resource).and_then(|url| url.join(reference)) {
        Ok(joined) => normalize_uri(joined.as_str()),
        Err(_) => normalize_uri(reference),
    }
}

/// Parse and validate an absolute URI.
///
/// # Errors
///
/// Returns `CoreError::InvalidUri` when `uri` is not an absolute URI.
pub fn parse_absolute(uri: &str) -> Result<Url, CoreError> {
    Url::parse(uri).map_err(|e| CoreError::InvalidUri {
        uri: uri.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split() {
        assert_eq!(
            split_fragment("http://x.com/a.json#/definitions/b"),
            ("http://x.com/a.json", Some("/definitions/b"))
        );
        assert_eq!(split_fragment("http://x.com/a.json"), ("http://x.com/a.json", None));
        assert_eq!(split_fragment("#foo"), ("", Some("foo")));
    }

    #[test]
    fn normalize_drops_empty_fragment() {
        assert_eq!(normalize_uri("http://x.com/a.json#"), "http://x.com/a.json");
        assert_eq!(normalize_uri("HTTP://X.com/a.json"), "http://x.com/a.json");
        assert_eq!(normalize_uri("a.json#"), "a.json");
    }

    #[test]
    fn join_relative_path() {
        assert_eq!(
            join_uri(Some("http://x.com/root/schema.json"), "other.json#/a"),
            "http://x.com/root/other.json#/a"
        );
        assert_eq!(
            join_uri(Some("http://x.com/root/"), "../up.json"),
            "http://x.com/up.json"
        );
    }

    #[test]
    fn join_fragment_only() {
        assert_eq!(
            join_uri(Some("http://x.com/a.json#/old"), "#/new"),
            "http://x.com/a.json#/new"
        );
        assert_eq!(join_uri(Some("urn:example:root"), "#foo"), "urn:example:root#foo");
    }

    #[test]
    fn join_absolute_reference_ignores_base() {
        assert_eq!(
            join_uri(Some("http://x.com/a.json"), "http://y.com/b.json"),
            "http://y.com/b.json"
        );
    }

    #[test]
    fn join_without_base_keeps_reference() {
        assert_eq!(join_uri(None, "item.json"), "item.json");
        assert_eq!(join_uri(None, "#foo"), "#foo");
        assert_eq!(join_uri(Some(""), "item.json"), "item.json");
    }

    #[test]
    fn parse_absolute_rejects_relative() {
        assert!(parse_absolute("http://x.com/a").is_ok());
        assert!(matches!(
            parse_absolute("a.json"),
            Err(CoreError::InvalidUri { .. })
        ));
    }
}

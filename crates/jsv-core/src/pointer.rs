//! # JSON Pointer
//!
//! RFC 6901 pointers, in both the plain form (`/a/b/0`) and the URI
//! fragment form (`#/a/b/0`). Fragment pointers are percent-decoded before
//! the `~1` → `/` and `~0` → `~` unescaping, in that order, so `~01`
//! decodes to `~1` and not `/`.

use percent_encoding::percent_decode_str;

use crate::error::CoreError;

/// Split a pointer into its unescaped reference tokens.
///
/// `""` and `"#"` address the document root and yield no segments.
///
/// # Errors
///
/// Returns `CoreError::InvalidPointer` if a non-empty pointer does not start
/// with `/`, or if a fragment is not valid percent-encoded UTF-8.
pub fn parse_pointer(pointer: &str) -> Result<Vec<String>, CoreError> {
    let path = match pointer.strip_prefix('#') {
        Some(fragment) => percent_decode_str(fragment)
            .decode_utf8()
            .map_err(|e| CoreError::InvalidPointer {
                pointer: pointer.to_string(),
                reason: format!("invalid percent-encoding: {e}"),
            })?
            .into_owned(),
        None => pointer.to_string(),
    };

    if path.is_empty() {
        return Ok(Vec::new());
    }

    let Some(rest) = path.strip_prefix('/') else {
        return Err(CoreError::InvalidPointer {
            pointer: pointer.to_string(),
            reason: "must be empty or start with '/'".to_string(),
        });
    };

    Ok(rest.split('/').map(unescape_segment).collect())
}

/// Unescape a single reference token.
pub fn unescape_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

/// Escape a single reference token.
pub fn escape_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

/// Render segments as a plain pointer (`/a/b`).
pub fn to_pointer<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|s| format!("/{}", escape_segment(s.as_ref())))
        .collect()
}

/// Interpret a segment as a list index.
///
/// Only canonical decimal forms are accepted: no sign, no leading zeros.
pub fn parse_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || (segment.len() > 1 && segment.starts_with('0')) {
        return None;
    }
    if !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

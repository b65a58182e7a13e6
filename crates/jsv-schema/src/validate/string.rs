//! String keywords. Lengths count Unicode scalar values; `pattern` uses
//! search semantics, so a match anywhere in the string is enough.

use super::Verdict;
use crate::failure::Failure;
use crate::node::StringKeywords;

pub(super) fn check(kw: &StringKeywords, value: &str) -> Verdict {
    if kw.min_length.is_some() || kw.max_length.is_some() {
        let length = value.chars().count();
        if let Some(min_length) = kw.min_length {
            if length < min_length {
                return Err(Failure::TooShort { length, min_length });
            }
        }
        if let Some(max_length) = kw.max_length {
            if length > max_length {
                return Err(Failure::TooLong { length, max_length });
            }
        }
    }

    if let Some(pattern) = &kw.pattern {
        if !pattern.is_match(value) {
            return Err(Failure::PatternMismatch {
                value: value.to_string(),
                pattern: pattern.as_str().to_string(),
            });
        }
    }
    Ok(())
}

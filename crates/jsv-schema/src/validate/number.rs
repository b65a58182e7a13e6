//! Numeric keywords: `minimum`, `maximum`, their exclusivity, `multiple_of`.
//!
//! A bound passes when the value is strictly inside it, or equal to it and
//! not exclusive. Exclusivity comes in two forms: the legacy flag modifies
//! `minimum`/`maximum`, the strict form is a bound of its own. Both report
//! through `TooSmall`/`TooBig` with the exclusivity spelled out.

use std::cmp::Ordering;

use jsv_core::Number;

use super::Verdict;
use crate::failure::Failure;
use crate::node::{Exclusivity, NumberKeywords};

pub(super) fn check(kw: &NumberKeywords, value: Number) -> Verdict {
    if let Some(minimum) = kw.minimum {
        let exclusive = matches!(kw.exclusive_minimum, Some(Exclusivity::Flag(true)));
        if below(value, minimum, exclusive) {
            return Err(Failure::TooSmall {
                value,
                minimum,
                exclusive_minimum: exclusive,
            });
        }
    }
    if let Some(Exclusivity::Bound(minimum)) = kw.exclusive_minimum {
        if below(value, minimum, true) {
            return Err(Failure::TooSmall {
                value,
                minimum,
                exclusive_minimum: true,
            });
        }
    }

    if let Some(maximum) = kw.maximum {
        let exclusive = matches!(kw.exclusive_maximum, Some(Exclusivity::Flag(true)));
        if above(value, maximum, exclusive) {
            return Err(Failure::TooBig {
                value,
                maximum,
                exclusive_maximum: exclusive,
            });
        }
    }
    if let Some(Exclusivity::Bound(maximum)) = kw.exclusive_maximum {
        if above(value, maximum, true) {
            return Err(Failure::TooBig {
                value,
                maximum,
                exclusive_maximum: true,
            });
        }
    }

    if let Some(multiple_of) = kw.multiple_of {
        if !value.is_multiple_of(multiple_of) {
            return Err(Failure::NotMultipleOf { value, multiple_of });
        }
    }
    Ok(())
}

/// Incomparable values (NaN) fail every bound.
fn below(value: Number, bound: Number, exclusive: bool) -> bool {
    match value.compare(bound) {
        Some(Ordering::Less) | None => true,
        Some(Ordering::Equal) => exclusive,
        Some(Ordering::Greater) => false,
    }
}

fn above(value: Number, bound: Number, exclusive: bool) -> bool {
    match value.compare(bound) {
        Some(Ordering::Greater) | None => true,
        Some(Ordering::Equal) => exclusive,
        Some(Ordering::Less) => false,
    }
}

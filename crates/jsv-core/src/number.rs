//! # Numbers
//!
//! A numeric scalar that keeps track of whether it was written as an
//! integer or a float. Schema keywords (`minimum`, `multiple_of`, …) and
//! data values share this type so that bounds can be compared across
//! subtypes without lossy conversions when both sides are integers.

use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

/// An integer or floating-point number.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit float.
    Float(f64),
}

impl Number {
    /// Lossy view of the number as `f64`.
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    /// Returns true if this is the integer variant.
    pub fn is_int(self) -> bool {
        matches!(self, Number::Int(_))
    }

    /// Compare two numbers by mathematical value.
    ///
    /// Integers compare exactly, also against floats, so integers beyond
    /// 2^53 never collapse onto a neighbouring float. Returns `None` when a
    /// NaN is involved.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
            (Number::Int(a), Number::Float(b)) => int_to_float(a, b),
            (Number::Float(a), Number::Int(b)) => int_to_float(b, a).map(Ordering::reverse),
            (Number::Float(a), Number::Float(b)) => a.partial_cmp(&b),
        }
    }

    /// Returns true if `self` is an exact multiple of `divisor`.
    ///
    /// Integer operands use the remainder; anything else divides and checks
    /// that the quotient has no fractional part, which tolerates fractional
    /// divisors such as `0.01`. A zero divisor is never satisfied.
    pub fn is_multiple_of(self, divisor: Number) -> bool {
        match (self, divisor) {
            (_, Number::Int(0)) => false,
            // `checked_rem` only overflows for `i64::MIN % -1`, which is zero.
            (Number::Int(a), Number::Int(b)) => a.checked_rem(b).map_or(true, |r| r == 0),
            (a, b) => {
                let quotient = a.as_f64() / b.as_f64();
                quotient.is_finite() && quotient.floor() == quotient
            }
        }
    }
}

/// Order an integer against a float without rounding the integer.
fn int_to_float(int: i64, float: f64) -> Option<Ordering> {
    // 2^63, the first float past `i64::MAX`.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if float.is_nan() {
        return None;
    }
    if float >= LIMIT {
        return Some(Ordering::Less);
    }
    if float < -LIMIT {
        return Some(Ordering::Greater);
    }
    let whole = float.trunc() as i64;
    match int.cmp(&whole) {
        Ordering::Equal => 0.0_f64.partial_cmp(&float.fract()),
        unequal => Some(unequal),
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.compare(*other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{i}"),
            Number::Float(x) => write!(f, "{x:?}"),
        }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Number::Int(i) => serializer.serialize_i64(*i),
            Number::Float(x) => serializer.serialize_f64(*x),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Int(i64::from(value))
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Number::Int(i64::from(value))
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

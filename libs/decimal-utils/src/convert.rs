//! Conversion of primitive values into `Decimal`

use crate::Decimal;
use bigdecimal::Zero;
use std::str::FromStr;
use tracing::debug;

/// Values that normalize into a `Decimal`. Never fails.
pub trait IntoDecimal {
    fn to_decimal(&self) -> Decimal;
}

pub fn from_i64(value: i64) -> Decimal {
    Decimal::from(value)
}

pub fn from_u64(value: u64) -> Decimal {
    Decimal::from(value)
}

/// Shortest decimal that round-trips to `value`. `NaN` and infinities become
/// zero.
pub fn from_f64(value: f64) -> Decimal {
    if !value.is_finite() {
        return Decimal::zero();
    }
    // float Display never uses exponent notation
    parse_or_zero(&value.to_string())
}

/// Shortest decimal that round-trips to `value`. `NaN` and infinities become
/// zero.
pub fn from_f32(value: f32) -> Decimal {
    if !value.is_finite() {
        return Decimal::zero();
    }
    parse_or_zero(&value.to_string())
}

/// Parse plain (`"-12.50"`) or scientific (`"1.2e3"`) notation, any magnitude.
///
/// Surrounding whitespace is ignored; empty or unparseable input is zero.
pub fn from_str_or_zero(value: &str) -> Decimal {
    let value = value.trim();
    if value.is_empty() {
        return Decimal::zero();
    }
    parse_or_zero(value)
}

fn parse_or_zero(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap_or_else(|e| {
        debug!(input = %value, error = %e, "Unparseable decimal input, using zero");
        Decimal::zero()
    })
}

/// Normalize any supported value.
pub fn d<T: IntoDecimal>(value: T) -> Decimal {
    value.to_decimal()
}

macro_rules! signed_into_decimal {
    ($($t:ty),*) => {
        $(impl IntoDecimal for $t {
            fn to_decimal(&self) -> Decimal {
                from_i64(*self as i64)
            }
        })*
    };
}

macro_rules! unsigned_into_decimal {
    ($($t:ty),*) => {
        $(impl IntoDecimal for $t {
            fn to_decimal(&self) -> Decimal {
                from_u64(*self as u64)
            }
        })*
    };
}

signed_into_decimal!(i8, i16, i32, i64, isize);
unsigned_into_decimal!(u8, u16, u32, u64, usize);

impl IntoDecimal for f32 {
    fn to_decimal(&self) -> Decimal {
        from_f32(*self)
    }
}

impl IntoDecimal for f64 {
    fn to_decimal(&self) -> Decimal {
        from_f64(*self)
    }
}

impl IntoDecimal for str {
    fn to_decimal(&self) -> Decimal {
        from_str_or_zero(self)
    }
}

impl IntoDecimal for String {
    fn to_decimal(&self) -> Decimal {
        from_str_or_zero(self)
    }
}

impl IntoDecimal for Decimal {
    fn to_decimal(&self) -> Decimal {
        self.clone()
    }
}

impl<T: IntoDecimal + ?Sized> IntoDecimal for &T {
    fn to_decimal(&self) -> Decimal {
        (**self).to_decimal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::to_string;

    #[test]
    fn test_integers() {
        assert_eq!(d(-7i8), Decimal::from(-7));
        assert_eq!(d(i64::MIN), Decimal::from(i64::MIN));
        assert_eq!(d(u64::MAX), Decimal::from(u64::MAX));
        assert_eq!(d(42usize), Decimal::from(42));
    }

    #[test]
    fn test_floats() {
        assert_eq!(to_string(&d(0.1f64)), "0.1");
        assert_eq!(to_string(&d(2.5f32)), "2.5");
        assert_eq!(to_string(&d(0.1f32)), "0.1");
        assert_eq!(d(f64::NAN), Decimal::zero());
        assert_eq!(d(f64::INFINITY), Decimal::zero());
        assert_eq!(d(f32::NEG_INFINITY), Decimal::zero());
    }

    #[test]
    fn test_strings() {
        assert_eq!(to_string(&d("12.50")), "12.50");
        assert_eq!(to_string(&d(" -3 ")), "-3");
        assert_eq!(d("1.2e3"), Decimal::from(1200));
        assert_eq!(to_string(&d(&String::from("0.001"))), "0.001");
    }

    #[test]
    fn test_large_values_keep_magnitude() {
        let big = d("1e30");
        assert!(!big.is_zero());
        assert_eq!(to_string(&big), format!("1{}", "0".repeat(30)));
        assert_eq!(d(1e30f64), big);
        assert_eq!(d(-1e30f64), -big);
        assert_eq!(to_string(&d("123456789012345678901234567890.5")), "123456789012345678901234567890.5");
    }

    #[test]
    fn test_bad_strings_are_zero() {
        assert_eq!(d(""), Decimal::zero());
        assert_eq!(d("   "), Decimal::zero());
        assert_eq!(d("abc"), Decimal::zero());
        assert_eq!(d("1.2.3"), Decimal::zero());
    }

    #[test]
    fn test_decimal_passthrough() {
        let value = Decimal::new(31415.into(), 4);
        assert_eq!(d(&value), value);
        assert_eq!(d(value.clone()), value);
    }
}

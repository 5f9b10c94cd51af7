//! Rounding and money helpers
//!
//! Amounts are in yuan with cents as the minor unit.

use crate::convert::IntoDecimal;
use crate::Decimal;
use bigdecimal::{RoundingMode, ToPrimitive, Zero};

fn round_half_up(a: &Decimal, places: i64) -> Decimal {
    a.with_scale_round(places, RoundingMode::HalfUp)
}

fn truncate(a: &Decimal, places: i64) -> Decimal {
    a.with_scale_round(places, RoundingMode::Down)
}

/// Nearest float; magnitudes beyond `f64` saturate to an infinity.
fn to_f64(a: &Decimal) -> f64 {
    match a.to_f64() {
        Some(value) => value,
        None if *a < Decimal::zero() => f64::NEG_INFINITY,
        None => f64::INFINITY,
    }
}

/// Round to 14 decimal places.
pub fn round14(a: &Decimal) -> Decimal {
    round_half_up(a, 14)
}

/// Round to 2 decimal places.
pub fn round2(a: &Decimal) -> Decimal {
    round_half_up(a, 2)
}

/// Drop everything past `places` decimal places and return a float.
pub fn truncate_places(a: &Decimal, places: u32) -> f64 {
    to_f64(&truncate(a, i64::from(places)))
}

/// Yuan to cents, half away from zero. Saturates outside the `i64` range.
pub fn yuan_to_cent(a: &Decimal) -> i64 {
    let cents = round_half_up(&(a * Decimal::from(100)), 0);

    match cents.to_i64() {
        Some(cents) => cents,
        None if cents < Decimal::zero() => i64::MIN,
        None => i64::MAX,
    }
}

/// Cents to yuan, exact.
pub fn cent_to_yuan(cents: i64) -> Decimal {
    Decimal::new(cents.into(), 2)
}

/// Amount rounded to cents, as a float.
pub fn fix_money_for_cent(a: &Decimal) -> f64 {
    to_f64(&round2(a))
}

/// Amount cut toward zero at 12 decimal places, as a float.
pub fn fix_money_fine(a: &Decimal) -> f64 {
    to_f64(&truncate(a, 12))
}

/// Ratio as a percentage rounded to 2 places (`0.1234` -> `12.34`).
pub fn fix_percent(a: &Decimal) -> f64 {
    to_f64(&round2(&(a * Decimal::from(100))))
}

/// `a / b` as a percentage string with exactly two decimals.
///
/// Returns `"0"` when either operand normalizes to zero.
pub fn calc_percent<A: IntoDecimal, B: IntoDecimal>(a: A, b: B) -> String {
    let a = a.to_decimal();
    let b = b.to_decimal();
    if a.is_zero() || b.is_zero() {
        return "0".to_string();
    }

    round2(&(a / b * Decimal::from(100))).to_plain_string()
}

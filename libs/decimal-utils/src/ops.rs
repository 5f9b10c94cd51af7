//! Arithmetic and comparison over normalized operands
//!
//! Operands go through [`IntoDecimal`] first, so `add(1, "2.5")` works.
//! Precision is unbounded: `add`, `sub` and `mul` are exact and never
//! overflow.

use crate::convert::IntoDecimal;
use crate::Decimal;
use bigdecimal::Zero;
use std::cmp::Ordering;

pub fn zero() -> Decimal {
    Decimal::zero()
}

pub fn add<A: IntoDecimal, B: IntoDecimal>(a: A, b: B) -> Decimal {
    a.to_decimal() + b.to_decimal()
}

pub fn sub<A: IntoDecimal, B: IntoDecimal>(a: A, b: B) -> Decimal {
    a.to_decimal() - b.to_decimal()
}

pub fn mul<A: IntoDecimal, B: IntoDecimal>(a: A, b: B) -> Decimal {
    a.to_decimal() * b.to_decimal()
}

/// `a / b`, `None` when `b` is zero.
///
/// Non-terminating quotients are rounded to the default `bigdecimal`
/// precision (100 significant digits).
pub fn div<A: IntoDecimal, B: IntoDecimal>(a: A, b: B) -> Option<Decimal> {
    let divisor = b.to_decimal();
    if divisor.is_zero() {
        return None;
    }
    Some(a.to_decimal() / divisor)
}

pub fn lt<A: IntoDecimal, B: IntoDecimal>(a: A, b: B) -> bool {
    a.to_decimal() < b.to_decimal()
}

pub fn lte<A: IntoDecimal, B: IntoDecimal>(a: A, b: B) -> bool {
    a.to_decimal() <= b.to_decimal()
}

pub fn gt<A: IntoDecimal, B: IntoDecimal>(a: A, b: B) -> bool {
    a.to_decimal() > b.to_decimal()
}

pub fn gte<A: IntoDecimal, B: IntoDecimal>(a: A, b: B) -> bool {
    a.to_decimal() >= b.to_decimal()
}

/// Numeric equality, scale is ignored (`"1.50" == 1.5`).
pub fn eq<A: IntoDecimal, B: IntoDecimal>(a: A, b: B) -> bool {
    a.to_decimal() == b.to_decimal()
}

pub fn cmp<A: IntoDecimal, B: IntoDecimal>(a: A, b: B) -> Ordering {
    a.to_decimal().cmp(&b.to_decimal())
}

pub fn neg(a: &Decimal) -> Decimal {
    -a.clone()
}

/// Plain notation, never exponent form (`1e3` renders as `1000`).
pub fn to_string(a: &Decimal) -> String {
    a.to_plain_string()
}

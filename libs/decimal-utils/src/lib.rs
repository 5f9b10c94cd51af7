//! Decimal helpers
//!
//! Normalizes integers, floats, strings and decimals into an
//! arbitrary-precision [`Decimal`] and offers the arithmetic, comparison and
//! money rounding used around prices and balances.
//!
//! Normalization never fails: empty or unparseable strings and non-finite
//! floats become zero. Rounding is half away from zero everywhere.
//!
//! ```
//! use decimal_utils::{add, calc_percent, d, to_string, yuan_to_cent};
//!
//! assert_eq!(to_string(&add(1, "2.5")), "3.5");
//! assert_eq!(yuan_to_cent(&d("12.345")), 1235);
//! assert_eq!(calc_percent(1, 3), "33.33");
//! ```

mod convert;
mod money;
mod ops;

pub use convert::{d, from_f32, from_f64, from_i64, from_str_or_zero, from_u64, IntoDecimal};
pub use money::{
    calc_percent, cent_to_yuan, fix_money_fine, fix_money_for_cent, fix_percent, round14, round2,
    truncate_places, yuan_to_cent,
};
pub use ops::{add, cmp, div, eq, gt, gte, lt, lte, mul, neg, sub, to_string, zero};

/// Arbitrary-precision decimal used by every helper.
pub type Decimal = bigdecimal::BigDecimal;

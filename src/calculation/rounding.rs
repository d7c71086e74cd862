//! Rupee rounding.

use rust_decimal::Decimal;

/// Rounds to the nearest whole unit, with halves going toward positive
/// infinity (so `2.5` becomes `3` and `-2.5` becomes `-2`).
///
/// Every salary component is rounded with this function on its own before
/// it is summed, which is what makes totals match the dashboard to the rupee.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_half_up;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_half_up(Decimal::from_str("29032.258").unwrap()), Decimal::from(29032));
/// assert_eq!(round_half_up(Decimal::from_str("2.5").unwrap()), Decimal::from(3));
/// assert_eq!(round_half_up(Decimal::from_str("-2.5").unwrap()), Decimal::from(-2));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    (value + Decimal::new(5, 1)).floor()
}

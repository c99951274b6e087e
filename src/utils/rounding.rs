//! Decimal rounding for reported figures.

/// Round `value` to `places` decimal digits, exact ties to even.
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

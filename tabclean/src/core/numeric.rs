//! Scalar numeric helpers for the cleaning operations.
//!
//! Polars rounds ties away from zero; the ties-to-even rule lives here and
//! is applied value by value.

/// Rounds `value` to `decimals` places, ties to even.
///
/// The value is scaled by `10^decimals`, rounded with ties-to-even and
/// scaled back, the way numpy's `round` does it. Because the scaling
/// happens in binary floating point, a literal such as `1.005` (stored as
/// `1.00499999...`) rounds down to `1.0`.
///
/// # Examples
///
/// ```
/// use tabclean::core::numeric::round_half_even;
///
/// assert_eq!(round_half_even(2.5, 0), 2.0);
/// assert_eq!(round_half_even(3.5, 0), 4.0);
/// assert_eq!(round_half_even(0.125, 2), 0.12);
/// ```
pub fn round_half_even(value: f64, decimals: u32) -> f64 {
    if decimals == 0 {
        return value.round_ties_even();
    }
    // Past f64 precision the scale overflows and the value comes back as is.
    let Ok(exponent) = i32::try_from(decimals) else {
        return value;
    };
    let scale = 10f64.powi(exponent);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round_ties_even() / scale
}

/// Converts an already-rounded float to `i64`, if it is finite and in range.
pub(crate) fn to_i64_exact(value: f64) -> Option<i64> {
    // i64::MAX is not representable as f64; 2^63 is the exclusive bound.
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    if value.is_finite() && (-BOUND..BOUND).contains(&value) {
        Some(value as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_even_integers() {
        assert_eq!(round_half_even(2.5, 0), 2.0);
        assert_eq!(round_half_even(3.5, 0), 4.0);
        assert_eq!(round_half_even(-2.5, 0), -2.0);
        assert_eq!(round_half_even(29.6, 0), 30.0);
    }

    #[test]
    fn test_round_half_even_decimals() {
        assert_eq!(round_half_even(0.125, 2), 0.12);
        assert_eq!(round_half_even(0.375, 2), 0.38);
        assert_eq!(round_half_even(1.005, 2), 1.0);
        assert_eq!(round_half_even(2.004, 2), 2.0);
        assert_eq!(round_half_even(33.333333, 4), 33.3333);
    }

    #[test]
    fn test_round_keeps_non_finite() {
        assert!(round_half_even(f64::INFINITY, 2).is_infinite());
        assert!(round_half_even(f64::NAN, 2).is_nan());
    }

    #[test]
    fn test_round_huge_decimals_is_identity() {
        assert_eq!(round_half_even(1234.5678, u32::MAX), 1234.5678);
        assert_eq!(round_half_even(1234.5678, 3_000_000_000), 1234.5678);
        assert_eq!(round_half_even(1234.5678, 400), 1234.5678);
    }

    #[test]
    fn test_to_i64_exact() {
        assert_eq!(to_i64_exact(30.0), Some(30));
        assert_eq!(to_i64_exact(-2.0), Some(-2));
        assert_eq!(to_i64_exact(f64::INFINITY), None);
        assert_eq!(to_i64_exact(1e19), None);
    }
}

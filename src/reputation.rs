//! Display form of raw account reputation values.
//!
//! Raw reputation is a wide integer; UIs show `log10(|raw|) - 9`, negated
//! for negative raw values, so a fresh account sits at level 0.

/// The log10-normalized reputation level for a raw reputation value.
///
/// ```
/// use steem_rs::reputation::reputation_level;
///
/// assert_eq!(reputation_level(0), 0);
/// assert_eq!(reputation_level(1_000_000_000), 0);
/// assert_eq!(reputation_level(10_000_000_000), 1);
/// assert_eq!(reputation_level(-10_000_000_000), -1);
/// ```
pub fn reputation_level(raw: i64) -> i64 {
    if raw == 0 {
        return 0;
    }

    // |i64::MIN| overflows i64; widen before taking the magnitude.
    let magnitude = (raw as i128).unsigned_abs() as f64;
    let level = magnitude.log10() as i64 - 9;
    if raw < 0 { -level } else { level }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_stays_zero() {
        assert_eq!(reputation_level(0), 0);
    }

    #[test]
    fn powers_of_ten_step_by_one() {
        assert_eq!(reputation_level(1_000_000_000), 0);
        assert_eq!(reputation_level(10_000_000_000), 1);
        assert_eq!(reputation_level(100_000_000_000), 2);
    }

    #[test]
    fn negative_reputation_mirrors_positive() {
        assert_eq!(reputation_level(-10_000_000_000), -1);
        assert_eq!(reputation_level(-1_000_000_000), 0);
    }

    #[test]
    fn extreme_values_do_not_overflow() {
        assert_eq!(reputation_level(i64::MIN), -9);
        assert_eq!(reputation_level(i64::MAX), 9);
    }
}

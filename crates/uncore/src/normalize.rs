/// Scales a raw count delta by the per-tick normalization factor.
///
/// The factor is supplied by the caller once per tick (for example the
/// reciprocal of the elapsed seconds) and must be the same for every counter
/// sampled in that tick, so ratios between normalized counters stay meaningful.
///
/// ```
/// use uncore::normalize;
///
/// assert_eq!(normalize(500, 2.0), 1000.0);
/// assert_eq!(normalize(0, 123.4), 0.0);
/// ```
pub fn normalize(delta: u64, factor: f64) -> f64 {
    delta as f64 * factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 1.0)]
    #[case(0, 0.25)]
    #[case(1000, 1.0)]
    #[case(1000, 0.5)]
    #[case(123_456_789, 1.0 / 3.0)]
    #[case(1 << 47, 4.0)]
    fn test_linear(#[case] delta: u64, #[case] factor: f64) {
        assert_eq!(normalize(delta, factor), delta as f64 * factor);
    }

    #[test]
    fn test_zero_delta() {
        for factor in [1e-9, 1.0, 1e9] {
            assert_eq!(normalize(0, factor), 0.0);
        }
    }
}

// =============================================================================
// Period-over-period returns
// =============================================================================

/// Fractional returns of a close-price sequence:
/// `r[i] = close[i+1] / close[i] - 1`.
///
/// The result is one element shorter than the input (the first bar has no
/// prior reference); a single-element or empty input yields an empty vector.
/// Total for any input — there is no error path.
pub fn daily_returns(closes: &[f64]) -> Vec<f64> {
    closes.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_are_one_shorter_than_input() {
        let closes = vec![100.0, 101.0, 99.0, 103.0];
        assert_eq!(daily_returns(&closes).len(), closes.len() - 1);
    }

    #[test]
    fn single_close_yields_empty() {
        assert!(daily_returns(&[100.0]).is_empty());
        assert!(daily_returns(&[]).is_empty());
    }

    #[test]
    fn known_values() {
        let r = daily_returns(&[100.0, 110.0, 99.0]);
        assert!((r[0] - 0.10).abs() < 1e-12);
        assert!((r[1] - (-0.10)).abs() < 1e-12);
    }

    #[test]
    fn flat_series_returns_zero() {
        for r in daily_returns(&[50.0; 10]) {
            assert_eq!(r, 0.0);
        }
    }
}

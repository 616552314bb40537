// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Midline = SMA(window); band width = k × rolling sample standard deviation
// (ddof = 1, pinned by the test vectors below); upper/lower = mid ± width.
// All three sequences are aligned with the input, with `None` wherever the
// window has not filled.

use crate::analytics::window::RollingWindow;

/// Aligned Bollinger band sequences. `upper[i] >= mid[i] >= lower[i]` holds
/// at every defined index for k > 0.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    pub upper: Vec<Option<f64>>,
    pub mid: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Compute Bollinger bands over `closes`.
///
/// # Edge cases
/// - `window == 0` or fewer closes than `window` => all `None`
/// - a flat window has zero width: upper == mid == lower
pub fn bollinger(closes: &[f64], window: usize, k: f64) -> BollingerBands {
    let mut bands = BollingerBands {
        upper: vec![None; closes.len()],
        mid: vec![None; closes.len()],
        lower: vec![None; closes.len()],
    };
    if window == 0 {
        return bands;
    }

    let mut win = RollingWindow::new(window);
    for (i, &close) in closes.iter().enumerate() {
        if let Some(stats) = win.push(close) {
            let width = k * stats.std_dev;
            bands.upper[i] = Some(stats.mean + width);
            bands.mid[i] = Some(stats.mean);
            bands.lower[i] = Some(stats.mean - width);
        }
    }
    bands
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligned_and_leading_none() {
        let closes: Vec<f64> = (1..=25).map(|x| x as f64).collect();
        let bands = bollinger(&closes, 20, 2.0);
        assert_eq!(bands.mid.len(), closes.len());
        for i in 0..19 {
            assert!(bands.upper[i].is_none());
            assert!(bands.mid[i].is_none());
            assert!(bands.lower[i].is_none());
        }
        for i in 19..closes.len() {
            assert!(bands.mid[i].is_some());
        }
    }

    #[test]
    fn band_ordering_holds_everywhere_defined() {
        let closes = vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08,
            45.89, 46.03, 44.18, 44.22, 44.57, 43.42, 42.66, 43.13, 44.00, 44.90,
            45.30, 44.10,
        ];
        let bands = bollinger(&closes, 5, 2.0);
        for i in 0..closes.len() {
            if let (Some(u), Some(m), Some(l)) =
                (bands.upper[i], bands.mid[i], bands.lower[i])
            {
                assert!(u >= m, "upper {u} < mid {m} at {i}");
                assert!(m >= l, "mid {m} < lower {l} at {i}");
            }
        }
    }

    #[test]
    fn sample_std_pinned_vector() {
        // closes 1..=20, window 20: mean 10.5, sample std = sqrt(35) ≈
        // 5.9160797831. Pins the ddof = 1 convention.
        let closes: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        let bands = bollinger(&closes, 20, 2.0);
        let mid = bands.mid[19].unwrap();
        let upper = bands.upper[19].unwrap();
        let lower = bands.lower[19].unwrap();
        let expected_std = 35.0f64.sqrt();
        assert!((mid - 10.5).abs() < 1e-10);
        assert!((upper - (10.5 + 2.0 * expected_std)).abs() < 1e-9);
        assert!((lower - (10.5 - 2.0 * expected_std)).abs() < 1e-9);
    }

    #[test]
    fn flat_window_collapses_the_bands() {
        let closes = vec![100.0; 25];
        let bands = bollinger(&closes, 20, 2.0);
        let i = 24;
        assert_eq!(bands.upper[i], bands.mid[i]);
        assert_eq!(bands.lower[i], bands.mid[i]);
        assert_eq!(bands.mid[i], Some(100.0));
    }

    #[test]
    fn insufficient_data_is_all_none() {
        let bands = bollinger(&[1.0, 2.0, 3.0], 20, 2.0);
        assert!(bands.mid.iter().all(Option::is_none));
        let bands = bollinger(&[1.0, 2.0, 3.0], 0, 2.0);
        assert!(bands.mid.iter().all(Option::is_none));
    }
}

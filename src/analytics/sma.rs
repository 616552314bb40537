// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// Arithmetic mean of the trailing `window` closes at each index. The output
// is aligned with the input: indices before `window - 1` are `None` because
// the window has not filled yet. A partial-window average is never emitted.

use crate::analytics::window::RollingWindow;

/// Compute the aligned SMA sequence for `closes`.
///
/// # Edge cases
/// - `window == 0` => all `None` (a zero-width mean is meaningless)
/// - `closes.len() < window` => all `None`
pub fn sma(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; closes.len()];
    }
    let mut win = RollingWindow::new(window);
    closes.iter().map(|&c| win.push(c).map(|s| s.mean)).collect()
}

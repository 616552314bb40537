// =============================================================================
// Relative Strength Index (RSI) — simple rolling means
// =============================================================================
//
// This variant uses *simple* rolling means of gains and losses rather than
// Wilder's exponential smoothing, matching a pandas-style
// `delta.clip(...).rolling(period).mean()` computation:
//
//   gain[i] = max(close[i] - close[i-1], 0)
//   loss[i] = max(close[i-1] - close[i], 0)
//   RS      = mean(gain, period) / mean(loss, period)
//   RSI     = 100 - 100 / (1 + RS)
//
// Boundary: when the mean loss over the window is zero the ratio is
// undefined/infinite; the window is loss-free, so RSI is reported as exactly
// 100. That covers both the all-gains case and a completely flat window.

use crate::analytics::window::RollingWindow;

/// Compute the aligned RSI sequence for `closes`.
///
/// The output has the same length as the input. Index `i` is defined once
/// `period` deltas are available, i.e. from index `period` onward; earlier
/// indices are `None`.
///
/// # Edge cases
/// - `period == 0` or fewer than `period + 1` closes => all `None`
/// - loss-free window => `Some(100.0)`
pub fn rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; closes.len()];
    if period == 0 || closes.len() < period + 1 {
        return out;
    }

    let mut gains = RollingWindow::new(period);
    let mut losses = RollingWindow::new(period);

    for i in 1..closes.len() {
        let delta = closes[i] - closes[i - 1];
        let gain_stats = gains.push(delta.max(0.0));
        let loss_stats = losses.push((-delta).max(0.0));

        if let (Some(g), Some(l)) = (gain_stats, loss_stats) {
            out[i] = Some(if l.mean == 0.0 {
                100.0
            } else {
                let rs = g.mean / l.mean;
                100.0 - 100.0 / (1.0 + rs)
            });
        }
    }

    out
}

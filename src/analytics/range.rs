// =============================================================================
// Range & volume summary — whole-series reductions
// =============================================================================
//
// Trailing-period high/low and latest/average volume over the full series.
// No windowing. Callers never reach this with an empty history — the no-data
// state short-circuits at the series store.

use crate::market_data::Series;

/// Whole-series extrema and volume summary.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSummary {
    /// Highest high over the lookback window.
    pub period_high: f64,
    /// Lowest low over the lookback window.
    pub period_low: f64,
    pub latest_volume: u64,
    pub avg_volume: f64,
}

/// Reduce a series to its [`RangeSummary`].
pub fn summarize_range(series: &Series) -> RangeSummary {
    let bars = series.bars();

    let (high, low, volume_sum) = bars.iter().fold(
        (f64::MIN, f64::MAX, 0u64),
        |(high, low, vol), bar| (high.max(bar.high), low.min(bar.low), vol + bar.volume),
    );

    RangeSummary {
        period_high: high,
        period_low: low,
        latest_volume: series.latest().volume,
        avg_volume: volume_sum as f64 / bars.len() as f64,
    }
}

// =============================================================================
// Snapshot assembly — selection, merging, presentation rounding
// =============================================================================
//
// The assembler does no computation of its own: it takes the latest defined
// value from each indicator sequence, merges in risk metrics, the range
// summary, and profile metadata, and applies presentation rounding. Rounding
// happens only here — every upstream module preserves full precision.
//
// Rounding policy (matching the original report format):
//   2 dp  price-like figures (price, change, extrema, volatility, yield %)
//   1 dp  RSI
//   3 dp  risk-adjusted return

use chrono::NaiveDate;
use serde::Serialize;

use crate::analytics::bollinger::{bollinger, BollingerBands};
use crate::analytics::range::RangeSummary;
use crate::analytics::risk::RiskMetrics;
use crate::analytics::rsi::rsi;
use crate::analytics::sma::sma;
use crate::market_data::{Series, TickerProfile};
use crate::runtime_config::IndicatorParams;

// =============================================================================
// IndicatorSet
// =============================================================================

/// Aligned indicator sequences for one series. Every vector has the same
/// length as the source closes, with `None` marking not-yet-available
/// entries.
#[derive(Debug, Clone)]
pub struct IndicatorSet {
    pub ma_short: Vec<Option<f64>>,
    pub ma_long: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    pub bands: BollingerBands,
}

impl IndicatorSet {
    /// Run the full indicator engine over one close sequence.
    pub fn compute(closes: &[f64], params: &IndicatorParams) -> Self {
        Self {
            ma_short: sma(closes, params.ma_short_window),
            ma_long: sma(closes, params.ma_long_window),
            rsi: rsi(closes, params.rsi_period),
            bands: bollinger(closes, params.bollinger_window, params.bollinger_k),
        }
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Sequences handed to the chart renderer alongside the scalar summary.
#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub dates: Vec<NaiveDate>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub volume: Vec<u64>,
    pub ma_short: Vec<Option<f64>>,
    pub ma_long: Vec<Option<f64>>,
    pub bb_upper: Vec<Option<f64>>,
    pub bb_mid: Vec<Option<f64>>,
    pub bb_lower: Vec<Option<f64>>,
}

/// The full reportable result for one ticker at one point in time. Built per
/// request and handed straight to the response; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    // Identity
    pub ticker: String,
    pub name: String,
    pub sector: String,
    pub industry: String,

    // Latest price
    pub current_price: f64,
    pub price_change: f64,
    pub price_change_pct: f64,

    // Valuation (null when the provider omits them)
    pub market_cap: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub forward_pe: Option<f64>,
    pub pb_ratio: Option<f64>,
    /// Percent; a rate, so an absent value defaults to 0.
    pub dividend_yield: f64,
    pub eps: Option<f64>,
    pub beta: Option<f64>,

    // Range & volume
    pub period_high: f64,
    pub period_low: f64,
    pub volume: u64,
    pub avg_volume: u64,

    // Risk
    pub volatility: f64,
    pub sharpe_ratio: f64,

    // Latest indicator readings (null when the window never filled)
    pub rsi: Option<f64>,
    pub ma_short: Option<f64>,
    pub ma_long: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_lower: Option<f64>,

    pub chart: ChartData,
}

/// Compose the snapshot from the already-computed parts.
pub fn assemble(
    series: &Series,
    profile: &TickerProfile,
    indicators: IndicatorSet,
    risk: &RiskMetrics,
    range: &RangeSummary,
) -> Snapshot {
    let ticker = series.ticker().to_string();
    let current_price = series.latest().close;
    let prev_price = series.prev().map_or(current_price, |b| b.close);
    let price_change = current_price - prev_price;
    let price_change_pct = if prev_price != 0.0 {
        price_change / prev_price * 100.0
    } else {
        0.0
    };

    let bars = series.bars();
    let chart = ChartData {
        dates: series.dates(),
        open: bars.iter().map(|b| b.open).collect(),
        high: bars.iter().map(|b| b.high).collect(),
        low: bars.iter().map(|b| b.low).collect(),
        close: series.closes(),
        volume: bars.iter().map(|b| b.volume).collect(),
        ma_short: indicators.ma_short,
        ma_long: indicators.ma_long,
        bb_upper: indicators.bands.upper,
        bb_mid: indicators.bands.mid,
        bb_lower: indicators.bands.lower,
    };

    Snapshot {
        name: profile.long_name.clone().unwrap_or_else(|| ticker.clone()),
        sector: profile.sector.clone().unwrap_or_else(|| "N/A".to_string()),
        industry: profile.industry.clone().unwrap_or_else(|| "N/A".to_string()),
        ticker,

        current_price: round2(current_price),
        price_change: round2(price_change),
        price_change_pct: round2(price_change_pct),

        market_cap: profile.market_cap,
        pe_ratio: profile.trailing_pe,
        forward_pe: profile.forward_pe,
        pb_ratio: profile.price_to_book,
        dividend_yield: round2(profile.dividend_yield.unwrap_or(0.0) * 100.0),
        eps: profile.trailing_eps,
        beta: profile.beta,

        period_high: round2(range.period_high),
        period_low: round2(range.period_low),
        volume: range.latest_volume,
        avg_volume: range.avg_volume as u64,

        volatility: round2(risk.volatility),
        sharpe_ratio: round3(risk.risk_adjusted_return),

        rsi: latest_defined(&indicators.rsi).map(round1),
        ma_short: latest_defined(&chart.ma_short).map(round2),
        ma_long: latest_defined(&chart.ma_long).map(round2),
        bb_upper: latest_defined(&chart.bb_upper).map(round2),
        bb_lower: latest_defined(&chart.bb_lower).map(round2),

        chart,
    }
}

/// Rightmost defined entry of an aligned indicator sequence.
fn latest_defined(seq: &[Option<f64>]) -> Option<f64> {
    seq.iter().rev().find_map(|v| *v)
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::range::summarize_range;
    use crate::analytics::returns::daily_returns;
    use crate::analytics::risk::risk_metrics;
    use crate::market_data::Bar;

    fn series(closes: &[f64]) -> Series {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                date: NaiveDate::from_ymd_opt(2024, 2, i as u32 + 1).unwrap(),
                open: close - 0.5,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1_000 + i as u64,
            })
            .collect();
        Series::from_bars("TEST", bars).unwrap()
    }

    fn params() -> IndicatorParams {
        IndicatorParams {
            ma_short_window: 3,
            ma_long_window: 5,
            rsi_period: 3,
            bollinger_window: 4,
            bollinger_k: 2.0,
        }
    }

    fn build(closes: &[f64]) -> Snapshot {
        let s = series(closes);
        let closes = s.closes();
        let indicators = IndicatorSet::compute(&closes, &params());
        let risk = risk_metrics(&daily_returns(&closes));
        let range = summarize_range(&s);
        assemble(&s, &TickerProfile::default(), indicators, &risk, &range)
    }

    #[test]
    fn rounding_helpers() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.236), 1.24);
        assert_eq!(round1(67.89), 67.9);
        assert_eq!(round3(1.23456), 1.235);
        assert_eq!(round2(-2.346), -2.35);
    }

    #[test]
    fn latest_defined_picks_rightmost_some() {
        assert_eq!(latest_defined(&[None, Some(1.0), Some(2.0), None]), Some(2.0));
        assert_eq!(latest_defined(&[None, None]), None);
        assert_eq!(latest_defined(&[]), None);
    }

    #[test]
    fn price_change_against_previous_close() {
        let snap = build(&[100.0, 101.0, 102.0, 103.0, 104.0, 106.0]);
        assert_eq!(snap.current_price, 106.0);
        assert_eq!(snap.price_change, 2.0);
        assert!((snap.price_change_pct - round2(2.0 / 104.0 * 100.0)).abs() < 1e-12);
    }

    #[test]
    fn single_bar_has_zero_change() {
        let snap = build(&[250.0]);
        assert_eq!(snap.current_price, 250.0);
        assert_eq!(snap.price_change, 0.0);
        assert_eq!(snap.price_change_pct, 0.0);
        // No window filled and no returns: nulls and zero-guards, no faults.
        assert!(snap.rsi.is_none());
        assert!(snap.ma_short.is_none());
        assert_eq!(snap.volatility, 0.0);
        assert_eq!(snap.sharpe_ratio, 0.0);
    }

    #[test]
    fn absent_profile_renders_na_and_nulls() {
        let snap = build(&[10.0, 11.0]);
        assert_eq!(snap.name, "TEST");
        assert_eq!(snap.sector, "N/A");
        assert_eq!(snap.industry, "N/A");
        assert!(snap.pe_ratio.is_none());
        assert!(snap.beta.is_none());
        // Dividend yield is a rate: absent means zero.
        assert_eq!(snap.dividend_yield, 0.0);
    }

    #[test]
    fn dividend_yield_is_scaled_to_percent() {
        let s = series(&[10.0, 11.0]);
        let closes = s.closes();
        let profile = TickerProfile {
            dividend_yield: Some(0.0055),
            ..TickerProfile::default()
        };
        let snap = assemble(
            &s,
            &profile,
            IndicatorSet::compute(&closes, &params()),
            &risk_metrics(&daily_returns(&closes)),
            &summarize_range(&s),
        );
        assert_eq!(snap.dividend_yield, 0.55);
    }

    #[test]
    fn chart_sequences_stay_aligned() {
        let snap = build(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0]);
        let n = snap.chart.close.len();
        assert_eq!(snap.chart.dates.len(), n);
        assert_eq!(snap.chart.volume.len(), n);
        assert_eq!(snap.chart.ma_short.len(), n);
        assert_eq!(snap.chart.ma_long.len(), n);
        assert_eq!(snap.chart.bb_upper.len(), n);
        assert_eq!(snap.chart.bb_lower.len(), n);
    }

    #[test]
    fn assembly_is_idempotent() {
        let closes = [100.0, 103.0, 99.5, 101.25, 104.75, 102.0, 108.5];
        let a = serde_json::to_string(&build(&closes)).unwrap();
        let b = serde_json::to_string(&build(&closes)).unwrap();
        assert_eq!(a, b);
    }
}

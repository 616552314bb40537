// =============================================================================
// Comparator — multi-ticker normalized performance
// =============================================================================
//
// Each series is normalized to percentage change from its own first available
// close, so tickers at very different price levels share one axis:
//
//   norm[i] = (close[i] / close[0] - 1) * 100        (norm[0] == 0 always)
//
// Alignment is by ordinal position, not calendar date — each series' first
// bar is its baseline. Tickers whose histories have different trading-calendar
// gaps can therefore be date-misaligned; a known limitation carried over from
// the reference behavior (see DESIGN.md).
//
// Per-ticker failures are skips, not partial errors: the comparison proceeds
// with whatever fetches succeeded, and an all-failed request yields an empty
// set for the renderer to handle.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use crate::market_data::Series;

/// One ticker's normalized track.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedSeries {
    pub dates: Vec<NaiveDate>,
    /// Percentage change from the first close; element 0 is always 0.
    pub pct_change: Vec<f64>,
}

/// Normalized tracks keyed by ticker. May be empty when every requested
/// ticker failed to produce data.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ComparisonSet {
    pub series: BTreeMap<String, NormalizedSeries>,
}

impl ComparisonSet {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Normalize a close sequence to percent change from its first element.
pub fn normalize(closes: &[f64]) -> Vec<f64> {
    match closes.first() {
        Some(&base) => closes.iter().map(|&c| (c / base - 1.0) * 100.0).collect(),
        None => Vec::new(),
    }
}

/// Fold per-ticker fetch outcomes into a [`ComparisonSet`], silently skipping
/// no-data tickers and fetch failures.
pub fn assemble_comparison(
    outcomes: Vec<(String, anyhow::Result<Option<Series>>)>,
) -> ComparisonSet {
    let mut set = ComparisonSet::default();

    for (ticker, outcome) in outcomes {
        match outcome {
            Ok(Some(series)) => {
                let track = NormalizedSeries {
                    dates: series.dates(),
                    pct_change: normalize(&series.closes()),
                };
                set.series.insert(ticker, track);
            }
            Ok(None) => {
                debug!(ticker, "no history — skipping in comparison");
            }
            Err(e) => {
                warn!(ticker, error = %e, "fetch failed — skipping in comparison");
            }
        }
    }

    set
}

// =============================================================================
// Bars & Series — the per-request price history store
// =============================================================================
//
// A `Series` holds one ticker's daily OHLCV history for one lookback window.
// It is built once from the rows the market-data client returns and never
// mutated afterwards; every derived sequence (returns, indicators, normalized
// comparisons) is produced as a fresh vector.
//
// The empty-fetch case is a distinct no-data state, not an error:
// `Series::from_bars` returns `None` for zero rows, so every downstream
// consumer is forced to handle "this ticker had no history" explicitly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily OHLCV observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Ordered daily history for a single ticker. Non-empty by construction.
#[derive(Debug, Clone)]
pub struct Series {
    ticker: String,
    bars: Vec<Bar>,
}

impl Series {
    /// Build a `Series` from fetched rows. Returns `None` when `bars` is
    /// empty — the caller decides what "no data" means at its boundary.
    ///
    /// Rows are expected in ascending date order as the provider returns
    /// them; the store structures, it does not validate ticker existence.
    pub fn from_bars(ticker: impl Into<String>, bars: Vec<Bar>) -> Option<Self> {
        if bars.is_empty() {
            return None;
        }
        Some(Self {
            ticker: ticker.into(),
            bars,
        })
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false: a `Series` is non-empty by construction
    /// ([`Series::from_bars`] rejects zero bars).
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The most recent bar. Infallible: a `Series` is never empty.
    pub fn latest(&self) -> &Bar {
        &self.bars[self.bars.len() - 1]
    }

    /// The bar before the most recent one, if the series has at least two.
    pub fn prev(&self) -> Option<&Bar> {
        if self.bars.len() >= 2 {
            Some(&self.bars[self.bars.len() - 2])
        } else {
            None
        }
    }

    /// Close prices, oldest first.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Bar dates, oldest first (the chart x-axis).
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32, close: f64) -> Bar {
        Bar {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1_000,
        }
    }

    #[test]
    fn empty_bars_is_no_data() {
        assert!(Series::from_bars("AAPL", Vec::new()).is_none());
    }

    #[test]
    fn single_bar_series_is_usable() {
        let s = Series::from_bars("AAPL", vec![bar(2, 185.0)]).unwrap();
        assert_eq!(s.len(), 1);
        assert!(!s.is_empty());
        assert_eq!(s.latest().close, 185.0);
        assert!(s.prev().is_none());
    }

    #[test]
    fn latest_and_prev() {
        let s = Series::from_bars("AAPL", vec![bar(2, 100.0), bar(3, 101.0)]).unwrap();
        assert_eq!(s.latest().close, 101.0);
        assert_eq!(s.prev().unwrap().close, 100.0);
    }

    #[test]
    fn closes_preserve_order() {
        let s =
            Series::from_bars("AAPL", vec![bar(2, 1.0), bar(3, 2.0), bar(4, 3.0)]).unwrap();
        assert_eq!(s.closes(), vec![1.0, 2.0, 3.0]);
        assert_eq!(s.dates().len(), 3);
    }
}

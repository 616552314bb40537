// =============================================================================
// Market Data Client — Yahoo-style chart & quoteSummary endpoints
// =============================================================================
//
// Both endpoints are public, unsigned GETs. The chart response arrives as
// parallel arrays (timestamps plus one quote block of open/high/low/close/
// volume arrays); rows with null entries — the provider emits them for halted
// or partial sessions — are skipped with a warning rather than failing the
// whole fetch.
//
// Failure semantics at this boundary:
//   - network / HTTP / provider-reported errors  -> Err (typed upstream as a
//     fetch failure, never converted to "no data")
//   - a well-formed response with zero usable rows -> Ok(None)
// =============================================================================

use anyhow::{Context, Result};
use chrono::DateTime;
use tracing::{debug, instrument, warn};

use crate::market_data::bars::{Bar, Series};
use crate::market_data::profile::TickerProfile;
use crate::types::Period;

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Modules requested from quoteSummary in a single call.
const PROFILE_MODULES: &str = "assetProfile,summaryDetail,defaultKeyStatistics,price";

/// HTTP client for the market-data provider. Cheap to clone; holds no
/// per-request state, so one instance is shared across all requests.
#[derive(Debug, Clone)]
pub struct MarketDataClient {
    base_url: String,
    client: reqwest::Client,
}

impl MarketDataClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Construct against an alternate base URL (used to point at a stub
    /// server in integration setups).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .user_agent("marketlens/1.0")
            .build()
            .expect("failed to build reqwest client");

        Self {
            base_url: base_url.into(),
            client,
        }
    }

    // -------------------------------------------------------------------------
    // History
    // -------------------------------------------------------------------------

    /// GET /v8/finance/chart/{ticker} — daily bars over `period`.
    ///
    /// Returns `Ok(None)` when the provider answers successfully but with
    /// zero usable rows; the caller surfaces that as its own not-found state.
    #[instrument(skip(self), name = "market_data::fetch_history")]
    pub async fn fetch_history(&self, ticker: &str, period: Period) -> Result<Option<Series>> {
        let url = format!(
            "{}/v8/finance/chart/{}?range={}&interval=1d",
            self.base_url,
            ticker,
            period.as_str()
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("GET /v8/finance/chart request failed")?;

        let status = resp.status();
        let body: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse chart response")?;

        // The provider reports symbol-level errors in-band.
        if let Some(err) = body["chart"]["error"].as_object() {
            let code = err.get("code").and_then(|v| v.as_str()).unwrap_or("unknown");
            let desc = err
                .get("description")
                .and_then(|v| v.as_str())
                .unwrap_or("no description");
            anyhow::bail!("provider chart error for {ticker}: {code}: {desc}");
        }
        if !status.is_success() {
            anyhow::bail!("GET /v8/finance/chart returned {status}");
        }

        let result = match body["chart"]["result"].as_array().and_then(|a| a.first()) {
            Some(r) => r,
            None => {
                debug!(ticker, "chart response carried no result block");
                return Ok(None);
            }
        };

        let bars = Self::parse_chart_result(ticker, result)?;
        debug!(ticker, period = %period, count = bars.len(), "history fetched");
        Ok(Series::from_bars(ticker, bars))
    }

    /// Turn the provider's parallel-array chart payload into bars, skipping
    /// rows where any OHLCV entry is null.
    fn parse_chart_result(ticker: &str, result: &serde_json::Value) -> Result<Vec<Bar>> {
        let timestamps = match result["timestamp"].as_array() {
            Some(ts) => ts,
            // A result block without timestamps means an empty history.
            None => return Ok(Vec::new()),
        };

        let quote = &result["indicators"]["quote"][0];
        let opens = quote["open"].as_array().context("quote missing 'open'")?;
        let highs = quote["high"].as_array().context("quote missing 'high'")?;
        let lows = quote["low"].as_array().context("quote missing 'low'")?;
        let closes = quote["close"].as_array().context("quote missing 'close'")?;
        let volumes = quote["volume"].as_array().context("quote missing 'volume'")?;

        let mut bars = Vec::with_capacity(timestamps.len());
        let mut skipped = 0usize;

        for (i, ts) in timestamps.iter().enumerate() {
            let row = (
                ts.as_i64(),
                opens.get(i).and_then(|v| v.as_f64()),
                highs.get(i).and_then(|v| v.as_f64()),
                lows.get(i).and_then(|v| v.as_f64()),
                closes.get(i).and_then(|v| v.as_f64()),
                volumes.get(i).and_then(|v| v.as_u64()),
            );
            match row {
                (Some(ts), Some(open), Some(high), Some(low), Some(close), Some(volume)) => {
                    let date = DateTime::from_timestamp(ts, 0)
                        .context("timestamp out of range")?
                        .date_naive();
                    bars.push(Bar {
                        date,
                        open,
                        high,
                        low,
                        close,
                        volume,
                    });
                }
                _ => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!(ticker, skipped, "skipped rows with null OHLCV entries");
        }
        Ok(bars)
    }

    // -------------------------------------------------------------------------
    // Profile metadata
    // -------------------------------------------------------------------------

    /// GET /v10/finance/quoteSummary/{ticker} — descriptive metadata and
    /// valuation ratios. Every field is optional; anything the provider omits
    /// stays `None`.
    #[instrument(skip(self), name = "market_data::fetch_profile")]
    pub async fn fetch_profile(&self, ticker: &str) -> Result<TickerProfile> {
        let url = format!(
            "{}/v10/finance/quoteSummary/{}?modules={}",
            self.base_url, ticker, PROFILE_MODULES
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("GET /v10/finance/quoteSummary request failed")?;

        let status = resp.status();
        let body: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse quoteSummary response")?;

        if !status.is_success() {
            anyhow::bail!("GET /v10/finance/quoteSummary returned {status}");
        }

        let result = body["quoteSummary"]["result"]
            .as_array()
            .and_then(|a| a.first())
            .cloned()
            .unwrap_or(serde_json::Value::Null);

        let profile = Self::parse_profile(&result);
        debug!(ticker, has_name = profile.long_name.is_some(), "profile fetched");
        Ok(profile)
    }

    /// Extract the optional profile fields from a quoteSummary result block.
    /// Numeric fields arrive wrapped as `{ "raw": 1.23, "fmt": "1.23" }`.
    fn parse_profile(result: &serde_json::Value) -> TickerProfile {
        TickerProfile {
            long_name: result["price"]["longName"].as_str().map(str::to_string),
            sector: result["assetProfile"]["sector"].as_str().map(str::to_string),
            industry: result["assetProfile"]["industry"].as_str().map(str::to_string),
            market_cap: raw_f64(&result["summaryDetail"]["marketCap"]),
            trailing_pe: raw_f64(&result["summaryDetail"]["trailingPE"]),
            forward_pe: raw_f64(&result["summaryDetail"]["forwardPE"]),
            price_to_book: raw_f64(&result["defaultKeyStatistics"]["priceToBook"]),
            dividend_yield: raw_f64(&result["summaryDetail"]["dividendYield"]),
            trailing_eps: raw_f64(&result["defaultKeyStatistics"]["trailingEps"]),
            beta: raw_f64(&result["defaultKeyStatistics"]["beta"]),
        }
    }
}

impl Default for MarketDataClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a provider numeric field that may be a bare number or a
/// `{ "raw": ..., "fmt": ... }` wrapper.
fn raw_f64(val: &serde_json::Value) -> Option<f64> {
    val.as_f64().or_else(|| val["raw"].as_f64())
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_f64_handles_both_shapes() {
        assert_eq!(raw_f64(&json!(1.5)), Some(1.5));
        assert_eq!(raw_f64(&json!({ "raw": 2.5, "fmt": "2.50" })), Some(2.5));
        assert_eq!(raw_f64(&json!(null)), None);
        assert_eq!(raw_f64(&json!({ "fmt": "N/A" })), None);
    }

    #[test]
    fn chart_rows_with_nulls_are_skipped() {
        let result = json!({
            "timestamp": [1704153600, 1704240000, 1704326400],
            "indicators": { "quote": [{
                "open":   [10.0, null, 12.0],
                "high":   [11.0, 11.5, 13.0],
                "low":    [9.0, 10.0, 11.0],
                "close":  [10.5, 11.0, 12.5],
                "volume": [1000, 2000, 3000]
            }]}
        });
        let bars = MarketDataClient::parse_chart_result("TEST", &result).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].close, 10.5);
        assert_eq!(bars[1].close, 12.5);
        assert_eq!(bars[1].volume, 3000);
    }

    #[test]
    fn chart_result_without_timestamps_is_empty() {
        let result = json!({ "meta": { "symbol": "ZZZZ" } });
        let bars = MarketDataClient::parse_chart_result("ZZZZ", &result).unwrap();
        assert!(bars.is_empty());
    }

    #[test]
    fn chart_dates_come_from_timestamps() {
        let result = json!({
            "timestamp": [1704153600],
            "indicators": { "quote": [{
                "open": [10.0], "high": [11.0], "low": [9.0],
                "close": [10.5], "volume": [1000]
            }]}
        });
        let bars = MarketDataClient::parse_chart_result("TEST", &result).unwrap();
        assert_eq!(bars[0].date.to_string(), "2024-01-02");
    }

    #[test]
    fn profile_parses_wrapped_and_plain_fields() {
        let result = json!({
            "price": { "longName": "Apple Inc." },
            "assetProfile": { "sector": "Technology", "industry": "Consumer Electronics" },
            "summaryDetail": {
                "marketCap": { "raw": 3.0e12 },
                "trailingPE": { "raw": 29.4 },
                "dividendYield": { "raw": 0.0055 }
            },
            "defaultKeyStatistics": {
                "priceToBook": { "raw": 45.1 },
                "trailingEps": { "raw": 6.42 },
                "beta": { "raw": 1.25 }
            }
        });
        let p = MarketDataClient::parse_profile(&result);
        assert_eq!(p.long_name.as_deref(), Some("Apple Inc."));
        assert_eq!(p.sector.as_deref(), Some("Technology"));
        assert_eq!(p.trailing_pe, Some(29.4));
        assert_eq!(p.dividend_yield, Some(0.0055));
        assert_eq!(p.beta, Some(1.25));
        // forwardPE absent -> None, not zero.
        assert!(p.forward_pe.is_none());
    }

    #[test]
    fn profile_of_null_result_is_fully_absent() {
        let p = MarketDataClient::parse_profile(&serde_json::Value::Null);
        assert!(p.long_name.is_none());
        assert!(p.market_cap.is_none());
    }
}

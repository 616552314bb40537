// =============================================================================
// Analysis pipeline — fetch, classify, compute, assemble
// =============================================================================
//
// Thin orchestration over the pure analytics modules. The only awaits are the
// market-data fetches; everything after them runs synchronously over data the
// request owns. The classification helpers are pure so the error-path
// contracts (no-data vs fetch failure, comparator skips) are unit-testable
// without a network.

use tracing::{debug, info, warn};

use crate::analytics::compare::{assemble_comparison, ComparisonSet};
use crate::analytics::range::summarize_range;
use crate::analytics::returns::daily_returns;
use crate::analytics::risk::risk_metrics;
use crate::analytics::snapshot::{assemble, IndicatorSet, Snapshot};
use crate::market_data::{MarketDataClient, Series};
use crate::runtime_config::IndicatorParams;
use crate::types::{ApiError, Period};

// =============================================================================
// Input normalization
// =============================================================================

/// Trim and upper-case a requested ticker; an effectively empty ticker is a
/// caller error and no fetch is attempted.
pub fn normalize_ticker(raw: &str) -> Result<String, ApiError> {
    let ticker = raw.trim().to_uppercase();
    if ticker.is_empty() {
        return Err(ApiError::BadRequest("No ticker provided".to_string()));
    }
    Ok(ticker)
}

/// Normalize a comparison ticker list: trim, upper-case, drop empties.
/// Empty result or exceeding `max` is a caller error.
pub fn normalize_tickers(raw: &[String], max: usize) -> Result<Vec<String>, ApiError> {
    let tickers: Vec<String> = raw
        .iter()
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty())
        .collect();

    if tickers.is_empty() {
        return Err(ApiError::BadRequest("No tickers provided".to_string()));
    }
    if tickers.len() > max {
        return Err(ApiError::BadRequest(format!(
            "Too many tickers: {} requested, limit is {max}",
            tickers.len()
        )));
    }
    Ok(tickers)
}

/// Map a history fetch outcome into the request error taxonomy: an upstream
/// failure stays a fetch error, a successful fetch with zero bars becomes
/// not-found. The two are never conflated.
pub fn classify_history(
    ticker: &str,
    outcome: anyhow::Result<Option<Series>>,
) -> Result<Series, ApiError> {
    match outcome {
        Ok(Some(series)) => Ok(series),
        Ok(None) => Err(ApiError::NotFound(ticker.to_string())),
        Err(e) => Err(ApiError::Fetch(e)),
    }
}

// =============================================================================
// Analyze
// =============================================================================

/// Build the full analysis snapshot for one ticker.
pub async fn build_snapshot(
    client: &MarketDataClient,
    params: &IndicatorParams,
    ticker: &str,
    period: Period,
) -> Result<Snapshot, ApiError> {
    let series = classify_history(ticker, client.fetch_history(ticker, period).await)?;

    // Metadata is best-effort: the original report degrades to an empty
    // profile rather than failing the whole analysis.
    let profile = match client.fetch_profile(ticker).await {
        Ok(p) => p,
        Err(e) => {
            warn!(ticker, error = %e, "profile fetch failed — using empty profile");
            Default::default()
        }
    };

    let closes = series.closes();
    let indicators = IndicatorSet::compute(&closes, params);
    let risk = risk_metrics(&daily_returns(&closes));
    let range = summarize_range(&series);

    let snapshot = assemble(&series, &profile, indicators, &risk, &range);
    info!(ticker, period = %period, bars = series.len(), "snapshot assembled");
    Ok(snapshot)
}

// =============================================================================
// Compare
// =============================================================================

/// Fetch each requested ticker independently and fold the outcomes into a
/// comparison set. Individual failures are skips; the set may come back
/// empty, which the renderer handles as a no-series state.
pub async fn build_comparison(
    client: &MarketDataClient,
    tickers: &[String],
    period: Period,
) -> ComparisonSet {
    let mut outcomes = Vec::with_capacity(tickers.len());
    for ticker in tickers {
        let outcome = client.fetch_history(ticker, period).await;
        outcomes.push((ticker.clone(), outcome));
    }

    let set = assemble_comparison(outcomes);
    debug!(
        requested = tickers.len(),
        included = set.series.len(),
        period = %period,
        "comparison assembled"
    );
    set
}

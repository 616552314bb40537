// =============================================================================
// Shared application state
// =============================================================================
//
// Deliberately thin: configuration behind a lock, the shared HTTP client, and
// the start instant for uptime reporting. Each request owns all of its price
// data from fetch through assembly, so nothing computation-related lives
// here — no caches, no per-ticker state.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::market_data::MarketDataClient;
use crate::runtime_config::RuntimeConfig;

/// State shared across request handlers via `Arc<AppState>`.
pub struct AppState {
    pub config: Arc<RwLock<RuntimeConfig>>,
    pub market: Arc<MarketDataClient>,
    /// Instant the service was started. Used for uptime reporting.
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(config: RuntimeConfig, market: MarketDataClient) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            market: Arc::new(market),
            start_time: std::time::Instant::now(),
        }
    }
}

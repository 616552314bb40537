pub mod bars;
pub mod client;
pub mod profile;

// Re-export the core data types for convenient access
// (e.g. `use crate::market_data::Series`).
pub use bars::{Bar, Series};
pub use client::MarketDataClient;
pub use profile::TickerProfile;

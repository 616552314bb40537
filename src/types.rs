// =============================================================================
// Shared types used across the MarketLens service
// =============================================================================

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Lookback window for a history request, mirroring the provider's standard
/// range strings ("1mo", "1y", "max", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
    #[serde(rename = "max")]
    Max,
}

impl Period {
    /// The wire string sent to the provider as the `range` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneMonth => "1mo",
            Self::ThreeMonths => "3mo",
            Self::SixMonths => "6mo",
            Self::OneYear => "1y",
            Self::TwoYears => "2y",
            Self::FiveYears => "5y",
            Self::Max => "max",
        }
    }
}

impl Default for Period {
    fn default() -> Self {
        Self::OneYear
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request-boundary error taxonomy.
///
/// Arithmetic edge cases (zero variance, loss-free RSI windows) are numeric
/// policies inside the analytics modules, never errors. Only three things can
/// fail a request:
/// - `BadRequest` — caller input error, no fetch attempted.
/// - `NotFound`   — the fetch succeeded but returned zero bars.
/// - `Fetch`      — upstream provider failure (network, rate limit, unknown
///   symbol at the provider level). Never folded into NotFound.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Fetch(anyhow::Error),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(msg) => write!(f, "{msg}"),
            Self::NotFound(ticker) => {
                write!(f, "No data found for '{ticker}'. Check the symbol and try again.")
            }
            Self::Fetch(e) => write!(f, "Market data fetch failed: {e:#}"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Fetch(_) => StatusCode::BAD_GATEWAY,
        };
        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_wire_strings() {
        assert_eq!(Period::OneMonth.as_str(), "1mo");
        assert_eq!(Period::OneYear.as_str(), "1y");
        assert_eq!(Period::Max.as_str(), "max");
    }

    #[test]
    fn period_default_is_one_year() {
        assert_eq!(Period::default(), Period::OneYear);
    }

    #[test]
    fn period_serde_round_trip() {
        for p in [
            Period::OneMonth,
            Period::ThreeMonths,
            Period::SixMonths,
            Period::OneYear,
            Period::TwoYears,
            Period::FiveYears,
            Period::Max,
        ] {
            let json = serde_json::to_string(&p).unwrap();
            assert_eq!(json, format!("\"{}\"", p.as_str()));
            let back: Period = serde_json::from_str(&json).unwrap();
            assert_eq!(back, p);
        }
    }

    #[test]
    fn period_rejects_unknown_range() {
        assert!(serde_json::from_str::<Period>("\"7d\"").is_err());
    }

    #[test]
    fn not_found_message_names_the_ticker() {
        let e = ApiError::NotFound("ZZZZ".to_string());
        assert!(e.to_string().contains("ZZZZ"));
    }
}

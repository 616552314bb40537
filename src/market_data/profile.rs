// =============================================================================
// Ticker profile — descriptive metadata and valuation ratios
// =============================================================================
//
// Everything in here is optional: the provider omits fields freely (ETFs have
// no sector, young companies have no trailing PE). Absent fields stay `None`
// and serialize as JSON null; consumers render them as "N/A". The one
// exception is dividend yield, which is semantically a rate and defaults to
// zero at snapshot-assembly time.

use serde::Serialize;

/// Descriptive metadata for one ticker, as returned by the quoteSummary
/// endpoint. All fields optional; `Default` is the fully-absent profile used
/// when the metadata fetch fails.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TickerProfile {
    pub long_name: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub market_cap: Option<f64>,
    pub trailing_pe: Option<f64>,
    pub forward_pe: Option<f64>,
    pub price_to_book: Option<f64>,
    /// Fractional yield as the provider reports it (e.g. 0.0055 for 0.55 %).
    pub dividend_yield: Option<f64>,
    pub trailing_eps: Option<f64>,
    pub beta: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_fully_absent() {
        let p = TickerProfile::default();
        assert!(p.long_name.is_none());
        assert!(p.sector.is_none());
        assert!(p.trailing_pe.is_none());
        assert!(p.dividend_yield.is_none());
    }

    #[test]
    fn absent_fields_serialize_as_null() {
        let json = serde_json::to_value(TickerProfile::default()).unwrap();
        assert!(json["sector"].is_null());
        assert!(json["beta"].is_null());
    }
}

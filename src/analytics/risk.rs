// =============================================================================
// Risk metrics — annualized volatility & risk-adjusted return
// =============================================================================
//
// Both metrics derive from the daily return series using the sample standard
// deviation (ddof = 1), annualized over 252 trading days:
//
//   volatility           = std(returns) * sqrt(252) * 100      (percent)
//   risk-adjusted return = mean(returns) * 252 / (std * sqrt(252))
//
// A return series with fewer than two elements or zero variance has no
// defined deviation; both metrics are reported as 0 in that case — a numeric
// policy, not an error. No rounding happens here; presentation rounding is
// the snapshot assembler's job.

/// Trading days per year used for annualization.
const TRADING_DAYS: f64 = 252.0;

/// Scalar risk summary for one return series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskMetrics {
    /// Annualized volatility in percent.
    pub volatility: f64,
    /// Sharpe-like ratio with a zero risk-free rate.
    pub risk_adjusted_return: f64,
}

/// Compute [`RiskMetrics`] from fractional daily returns.
pub fn risk_metrics(returns: &[f64]) -> RiskMetrics {
    let std_dev = sample_std(returns);
    if std_dev == 0.0 {
        return RiskMetrics {
            volatility: 0.0,
            risk_adjusted_return: 0.0,
        };
    }

    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    RiskMetrics {
        volatility: std_dev * TRADING_DAYS.sqrt() * 100.0,
        risk_adjusted_return: (mean * TRADING_DAYS) / (std_dev * TRADING_DAYS.sqrt()),
    }
}

/// Sample standard deviation (ddof = 1); 0 for fewer than two elements.
fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n as f64 - 1.0);
    variance.sqrt()
}

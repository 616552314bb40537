// =============================================================================
// Analytics — the indicator computation pipeline
// =============================================================================
//
// Pure, side-effect-free derivations over daily price history. Rolling-window
// indicators return sequences aligned with their input: every index where the
// window has not yet filled is `None`, never zero or NaN, so downstream
// consumers cannot mistake insufficient history for a real reading.

pub mod bollinger;
pub mod compare;
pub mod range;
pub mod returns;
pub mod risk;
pub mod rsi;
pub mod sma;
pub mod snapshot;
pub mod window;

//! Request and response types for the options endpoint.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

// ============================================================================
// Option Chain
// ============================================================================

/// A single listed option contract as reported upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionContract {
    /// Contract identifier, e.g. `AAPL240315C00100000`.
    pub contract_symbol: String,
    /// Strike price.
    pub strike: f64,
    /// Last traded price.
    #[serde(default)]
    pub last_price: Option<f64>,
    /// Current bid.
    #[serde(default)]
    pub bid: Option<f64>,
    /// Current ask.
    #[serde(default)]
    pub ask: Option<f64>,
    /// Volume for the current session.
    #[serde(default)]
    pub volume: Option<u64>,
    /// Open interest.
    #[serde(default)]
    pub open_interest: Option<u64>,
    /// Implied volatility.
    #[serde(default)]
    pub implied_volatility: Option<f64>,
    /// Whether the contract is in the money.
    #[serde(default)]
    pub in_the_money: bool,
    /// Expiration as a Unix timestamp in seconds.
    #[serde(default)]
    pub expiration: Option<i64>,
}

impl OptionContract {
    /// Creates a contract with only the fields used for quoting.
    #[must_use]
    pub fn new(
        contract_symbol: impl Into<String>,
        strike: f64,
        last_price: Option<f64>,
        bid: Option<f64>,
        ask: Option<f64>,
    ) -> Self {
        Self {
            contract_symbol: contract_symbol.into(),
            strike,
            last_price,
            bid,
            ask,
            volume: None,
            open_interest: None,
            implied_volatility: None,
            in_the_money: false,
            expiration: None,
        }
    }
}

/// All calls and puts for one underlying and expiration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionChain {
    /// Call contracts.
    pub calls: Vec<OptionContract>,
    /// Put contracts.
    pub puts: Vec<OptionContract>,
}

// ============================================================================
// Wire Envelope
// ============================================================================

/// Top-level body of `GET /v7/finance/options/{symbol}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsResponse {
    /// Chain envelope.
    pub option_chain: OptionChainEnvelope,
}

/// Result list plus an optional upstream error.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionChainEnvelope {
    /// One entry per requested symbol.
    #[serde(default)]
    pub result: Vec<OptionsResult>,
    /// Error reported by upstream, if any.
    #[serde(default)]
    pub error: Option<UpstreamError>,
}

/// Error object embedded in an upstream payload.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamError {
    /// Short error code.
    #[serde(default)]
    pub code: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}

/// Options data for a single underlying.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsResult {
    /// Underlying symbol.
    #[serde(default)]
    pub underlying_symbol: Option<String>,
    /// Published expirations as Unix timestamps (midnight UTC).
    #[serde(default)]
    pub expiration_dates: Vec<i64>,
    /// Strikes listed across the chain.
    #[serde(default)]
    pub strikes: Vec<f64>,
    /// Chains for the requested expiration (usually exactly one).
    #[serde(default)]
    pub options: Vec<ExpirationChain>,
}

/// Calls and puts for a single expiration, as sent upstream.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpirationChain {
    /// Expiration as a Unix timestamp.
    pub expiration_date: i64,
    /// Call contracts.
    #[serde(default)]
    pub calls: Vec<OptionContract>,
    /// Put contracts.
    #[serde(default)]
    pub puts: Vec<OptionContract>,
}

impl From<ExpirationChain> for OptionChain {
    fn from(chain: ExpirationChain) -> Self {
        Self {
            calls: chain.calls,
            puts: chain.puts,
        }
    }
}

// ============================================================================
// Date Conversion
// ============================================================================

/// Converts an upstream expiration timestamp to its UTC calendar date.
#[must_use]
pub fn expiration_to_date(timestamp: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp, 0).map(|dt| dt.date_naive())
}

/// Converts a calendar date to the midnight-UTC timestamp upstream expects.
#[must_use]
pub fn date_to_expiration(date: NaiveDate) -> i64 {
    date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp()
}

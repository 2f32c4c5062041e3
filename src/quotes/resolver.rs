//! Contract resolution for a (ticker, expiration, strike) triple.

use super::format_price;
use crate::contract::OptionType;
use crate::error::LookupError;
use crate::provider::MarketDataProvider;
use chrono::NaiveDate;
use market_data_client::OptionContract;
use tracing::{debug, info};

/// Default absolute tolerance when matching strikes.
pub const DEFAULT_STRIKE_TOLERANCE: f64 = 1e-6;

/// Outcome of resolving contracts at one strike.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Matching contract identifiers, calls first.
    pub identifiers: Vec<String>,
    /// One summary line per side, or the "no options" line.
    pub summary: String,
}

/// Finds call and put contracts at an exact strike.
#[derive(Debug, Clone, Copy)]
pub struct ContractResolver {
    strike_tolerance: f64,
}

impl Default for ContractResolver {
    fn default() -> Self {
        Self::new(DEFAULT_STRIKE_TOLERANCE)
    }
}

impl ContractResolver {
    /// Creates a resolver with the given absolute strike tolerance.
    #[must_use]
    pub fn new(strike_tolerance: f64) -> Self {
        Self {
            strike_tolerance: strike_tolerance.abs(),
        }
    }

    /// Strike tolerance in use.
    #[must_use]
    pub fn strike_tolerance(&self) -> f64 {
        self.strike_tolerance
    }

    /// Resolves contracts for `ticker` expiring on `date` (YYYY-MM-DD) at `strike`.
    ///
    /// A date that is not listed, or a side with no contract at the strike,
    /// produces explanatory text rather than an error.
    ///
    /// # Errors
    /// Returns [`LookupError::InvalidDate`] unless the date is written exactly
    /// as YYYY-MM-DD, and [`LookupError::Provider`] when upstream fails.
    pub async fn resolve(
        &self,
        provider: &dyn MarketDataProvider,
        ticker: &str,
        date: &str,
        strike: f64,
    ) -> Result<Resolution, LookupError> {
        let date = date.trim();
        let expiration = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .ok()
            .filter(|d| d.format("%Y-%m-%d").to_string() == date)
            .ok_or_else(|| LookupError::InvalidDate(date.to_string()))?;

        let expirations = provider.expirations(ticker).await?;
        if !expirations.contains(&expiration) {
            info!("{} has no expiration on {}", ticker, date);
            return Ok(Resolution {
                identifiers: Vec::new(),
                summary: format!("No options available for {}.\n", date),
            });
        }

        let chain = provider.option_chain(ticker, expiration).await?;
        let strike_label = format_price(Some(strike));
        let mut identifiers = Vec::new();
        let mut summary = String::new();

        for (side, contracts) in [
            (OptionType::Call, &chain.calls),
            (OptionType::Put, &chain.puts),
        ] {
            let matches = self.matching(contracts, strike);
            if matches.is_empty() {
                summary.push_str(&format!(
                    "No {} option with a strike price of {} for {}.\n",
                    side, strike_label, date
                ));
            } else {
                summary.push_str(&format!(
                    "{} option for strike price {} on {}: {}\n",
                    side.label(),
                    strike_label,
                    date,
                    matches.join(", ")
                ));
                identifiers.extend(matches);
            }
        }

        debug!(
            "resolved {} contracts for {} {} @ {}",
            identifiers.len(),
            ticker,
            date,
            strike_label
        );

        Ok(Resolution {
            identifiers,
            summary,
        })
    }

    /// Contract symbols whose strike is within tolerance of `strike`.
    #[must_use]
    pub fn matching(&self, contracts: &[OptionContract], strike: f64) -> Vec<String> {
        contracts
            .iter()
            .filter(|c| (c.strike - strike).abs() <= self.strike_tolerance)
            .map(|c| c.contract_symbol.clone())
            .collect()
    }
}

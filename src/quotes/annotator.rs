//! Per-contract quote lines with market session awareness.

use super::format_price;
use crate::contract::{ContractId, OptionType};
use crate::error::LookupError;
use crate::market::{Clock, MarketCalendar, MarketStatus};
use crate::provider::MarketDataProvider;
use market_data_client::OptionContract;
use std::sync::Arc;
use tracing::debug;

/// Result of annotating one contract identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    /// Contract found upstream.
    Found {
        /// Last traded price.
        price: Option<f64>,
        /// Session state used to pick the line format.
        status: MarketStatus,
        /// Formatted line, newline-terminated.
        text: String,
    },
    /// No row matched the identifier.
    NotFound {
        /// Explanatory line.
        text: String,
    },
}

impl Annotation {
    /// The formatted line for either outcome.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Found { text, .. } | Self::NotFound { text } => text,
        }
    }

    /// Last price, if the contract was found and has one.
    #[must_use]
    pub fn price(&self) -> Option<f64> {
        match self {
            Self::Found { price, .. } => *price,
            Self::NotFound { .. } => None,
        }
    }
}

/// Produces quote lines for individual contracts.
#[derive(Clone)]
pub struct QuoteAnnotator {
    calendar: MarketCalendar,
    clock: Arc<dyn Clock>,
}

impl QuoteAnnotator {
    /// Creates an annotator over an exchange calendar and clock.
    #[must_use]
    pub fn new(calendar: MarketCalendar, clock: Arc<dyn Clock>) -> Self {
        Self { calendar, clock }
    }

    /// Exchange calendar in use.
    #[must_use]
    pub fn calendar(&self) -> &MarketCalendar {
        &self.calendar
    }

    /// Session state at the clock's current instant.
    #[must_use]
    pub fn current_status(&self) -> MarketStatus {
        self.calendar.status_at(self.clock.now())
    }

    /// Decodes `identifier`, looks it up upstream and formats a quote line.
    ///
    /// # Errors
    /// Returns [`LookupError::MalformedIdentifier`] if the identifier does not
    /// tokenize, or [`LookupError::Provider`] when upstream fails.
    pub async fn annotate(
        &self,
        provider: &dyn MarketDataProvider,
        identifier: &str,
    ) -> Result<Annotation, LookupError> {
        let id: ContractId = identifier.parse()?;
        let chain = provider.option_chain(id.ticker(), id.expiration()).await?;

        let side = match id.option_type() {
            OptionType::Call => &chain.calls,
            OptionType::Put => &chain.puts,
        };

        let Some(row) = side.iter().find(|c| c.contract_symbol == identifier) else {
            debug!("{} not present in upstream chain", identifier);
            return Ok(Annotation::NotFound {
                text: format!("No specific option found for {}.", identifier),
            });
        };

        Ok(self.describe(identifier, row, self.current_status()))
    }

    /// Formats the quote line for a contract row under a given session state.
    #[must_use]
    pub fn describe(
        &self,
        identifier: &str,
        row: &OptionContract,
        status: MarketStatus,
    ) -> Annotation {
        let last = format_price(row.last_price);
        let text = match status {
            MarketStatus::Weekend | MarketStatus::Holiday => {
                let reason = if status == MarketStatus::Weekend {
                    "weekend"
                } else {
                    "a holiday"
                };
                format!(
                    "Today is {}, the market is closed.\nThe last price of {} was {}.\n",
                    reason, identifier, last
                )
            }
            MarketStatus::Open => format!(
                "Market is open. Last: {}, Ask: {}, Bid: {}.\n",
                last,
                format_price(row.ask),
                format_price(row.bid)
            ),
            MarketStatus::AfterHours => format!(
                "Market is closed. The last price of {} was {}.\n",
                identifier, last
            ),
        };

        Annotation::Found {
            price: row.last_price,
            status,
            text,
        }
    }
}

//! Application state management.

use crate::config::{Config, ConfigError};
use crate::holidays::{HolidayCalendar, UsFederalHolidays};
use crate::market::{Clock, MarketCalendar, SessionHours, SystemClock};
use crate::provider::MarketDataProvider;
use crate::quotes::{ContractResolver, QuoteAnnotator, QuoteService};
use chrono_tz::Tz;
use market_data_client::{ClientConfig, MarketDataClient};
use std::sync::Arc;
use tracing::info;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Quote lookup service.
    pub quotes: QuoteService,
    /// Application configuration.
    pub config: Config,
}

impl AppState {
    /// Creates state around an already-built lookup service.
    #[must_use]
    pub fn new(quotes: QuoteService, config: Config) -> Self {
        Self { quotes, config }
    }

    /// Assembles state from explicit collaborators.
    ///
    /// Lets callers substitute the provider, clock and holiday calendar.
    #[must_use]
    pub fn with_collaborators(
        provider: Arc<dyn MarketDataProvider>,
        clock: Arc<dyn Clock>,
        holidays: Arc<dyn HolidayCalendar>,
        timezone: Tz,
        hours: SessionHours,
        strike_tolerance: f64,
    ) -> Self {
        let calendar = MarketCalendar::new(timezone, hours, holidays);
        let quotes = QuoteService::new(
            provider,
            ContractResolver::new(strike_tolerance),
            QuoteAnnotator::new(calendar, clock),
        );
        Self::new(quotes, Config::default())
    }

    /// Creates production state from configuration: HTTP provider, system
    /// clock and US federal holidays.
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or the client cannot be built.
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let client = MarketDataClient::new(ClientConfig {
            base_url: config.provider.base_url.clone(),
            timeout: config.provider.timeout(),
            user_agent: config.provider.user_agent.clone(),
        })?;
        info!(
            "Using market data provider at {} (timeout {}s)",
            client.base_url(),
            config.provider.timeout_secs
        );

        let timezone = config.market.tz()?;
        let hours = config.market.session_hours()?;
        info!(
            "Exchange session {}-{} {}",
            hours.open.format("%H:%M"),
            hours.close.format("%H:%M"),
            timezone
        );

        let mut state = Self::with_collaborators(
            Arc::new(client),
            Arc::new(SystemClock),
            Arc::new(UsFederalHolidays::new()),
            timezone,
            hours,
            config.market.strike_tolerance,
        );
        state.config = config;
        Ok(state)
    }
}

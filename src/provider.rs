//! Market data provider abstraction.
//!
//! The lookup code only needs two operations from upstream: the list of
//! published expirations for a ticker and the chain for one of those dates.
//! [`MarketDataClient`] implements them over HTTP. [`StaticProvider`] serves
//! fixtures from memory.

use async_trait::async_trait;
use chrono::NaiveDate;
use market_data_client::{MarketDataClient, OptionChain};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Provider failure.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Upstream client error.
    #[error(transparent)]
    Client(#[from] market_data_client::Error),

    /// Requested data does not exist upstream.
    #[error("no data for {0}")]
    NotFound(String),

    /// Provider could not be reached or answered with an error.
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

/// Source of option expirations and chains.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Published expiration dates for `ticker`.
    async fn expirations(&self, ticker: &str) -> Result<Vec<NaiveDate>, ProviderError>;

    /// Chain for `ticker` expiring on `date`.
    async fn option_chain(&self, ticker: &str, date: NaiveDate)
    -> Result<OptionChain, ProviderError>;
}

#[async_trait]
impl MarketDataProvider for MarketDataClient {
    async fn expirations(&self, ticker: &str) -> Result<Vec<NaiveDate>, ProviderError> {
        Ok(MarketDataClient::expirations(self, ticker).await?)
    }

    async fn option_chain(
        &self,
        ticker: &str,
        date: NaiveDate,
    ) -> Result<OptionChain, ProviderError> {
        Ok(MarketDataClient::option_chain(self, ticker, date).await?)
    }
}

// ============================================================================
// In-memory provider
// ============================================================================

/// Provider backed by fixed in-memory chains.
///
/// Tickers are matched case-insensitively. A ticker marked unavailable fails
/// every call with [`ProviderError::Unavailable`].
#[derive(Debug, Default)]
pub struct StaticProvider {
    chains: HashMap<String, Vec<(NaiveDate, OptionChain)>>,
    unavailable: Vec<String>,
    calls: Mutex<usize>,
}

impl StaticProvider {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a chain for `ticker` expiring on `date`.
    #[must_use]
    pub fn with_chain(mut self, ticker: &str, date: NaiveDate, chain: OptionChain) -> Self {
        let entry = self.chains.entry(ticker.to_uppercase()).or_default();
        entry.retain(|(d, _)| *d != date);
        entry.push((date, chain));
        entry.sort_by_key(|(d, _)| *d);
        self
    }

    /// Makes every call for `ticker` fail.
    #[must_use]
    pub fn with_unavailable(mut self, ticker: &str) -> Self {
        self.unavailable.push(ticker.to_uppercase());
        self
    }

    /// Number of provider calls served so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        *self.calls.lock()
    }

    fn check(&self, ticker: &str) -> Result<String, ProviderError> {
        *self.calls.lock() += 1;
        let key = ticker.to_uppercase();
        if self.unavailable.contains(&key) {
            return Err(ProviderError::Unavailable(format!("{} is unreachable", ticker)));
        }
        Ok(key)
    }
}

#[async_trait]
impl MarketDataProvider for StaticProvider {
    async fn expirations(&self, ticker: &str) -> Result<Vec<NaiveDate>, ProviderError> {
        let key = self.check(ticker)?;
        Ok(self
            .chains
            .get(&key)
            .map(|list| list.iter().map(|(d, _)| *d).collect())
            .unwrap_or_default())
    }

    async fn option_chain(
        &self,
        ticker: &str,
        date: NaiveDate,
    ) -> Result<OptionChain, ProviderError> {
        let key = self.check(ticker)?;
        self.chains
            .get(&key)
            .and_then(|list| list.iter().find(|(d, _)| *d == date))
            .map(|(_, chain)| chain.clone())
            .ok_or_else(|| ProviderError::NotFound(format!("{} options expiring {}", ticker, date)))
    }
}

// ============================================================================
// Per-request memo
// ============================================================================

/// Wraps a provider for the lifetime of one request so each chain is fetched
/// at most once.
pub struct ChainMemo {
    inner: Arc<dyn MarketDataProvider>,
    chains: Mutex<HashMap<(String, NaiveDate), OptionChain>>,
}

impl ChainMemo {
    /// Creates an empty memo over `inner`.
    #[must_use]
    pub fn new(inner: Arc<dyn MarketDataProvider>) -> Self {
        Self {
            inner,
            chains: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl MarketDataProvider for ChainMemo {
    async fn expirations(&self, ticker: &str) -> Result<Vec<NaiveDate>, ProviderError> {
        self.inner.expirations(ticker).await
    }

    async fn option_chain(
        &self,
        ticker: &str,
        date: NaiveDate,
    ) -> Result<OptionChain, ProviderError> {
        let key = (ticker.to_uppercase(), date);
        let cached = self.chains.lock().get(&key).cloned();
        if let Some(chain) = cached {
            debug!("chain cache hit for {} {}", ticker, date);
            return Ok(chain);
        }

        let chain = self.inner.option_chain(ticker, date).await?;
        self.chains.lock().insert(key, chain.clone());
        Ok(chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_data_client::OptionContract;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn chain() -> OptionChain {
        OptionChain {
            calls: vec![OptionContract::new(
                "AAPL240315C00100000",
                100.0,
                Some(72.5),
                Some(72.1),
                Some(73.0),
            )],
            puts: vec![],
        }
    }

    #[tokio::test]
    async fn test_static_provider_expirations_sorted() {
        let provider = StaticProvider::new()
            .with_chain("AAPL", date(2024, 3, 22), OptionChain::default())
            .with_chain("aapl", date(2024, 3, 15), chain());

        let exps = provider.expirations("AAPL").await.unwrap();
        assert_eq!(exps, vec![date(2024, 3, 15), date(2024, 3, 22)]);
    }

    #[tokio::test]
    async fn test_static_provider_unknown_ticker_has_no_expirations() {
        let provider = StaticProvider::new();
        assert!(provider.expirations("MSFT").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_static_provider_missing_chain() {
        let provider = StaticProvider::new().with_chain("AAPL", date(2024, 3, 15), chain());
        let result = provider.option_chain("AAPL", date(2024, 3, 22)).await;
        assert!(matches!(result, Err(ProviderError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_static_provider_unavailable() {
        let provider = StaticProvider::new().with_unavailable("AAPL");
        let result = provider.expirations("aapl").await;
        assert!(matches!(result, Err(ProviderError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_chain_memo_fetches_once() {
        let provider = Arc::new(StaticProvider::new().with_chain("AAPL", date(2024, 3, 15), chain()));
        let memo = ChainMemo::new(provider.clone());

        let first = memo.option_chain("AAPL", date(2024, 3, 15)).await.unwrap();
        let second = memo.option_chain("aapl", date(2024, 3, 15)).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_chain_memo_does_not_cache_errors() {
        let provider = Arc::new(StaticProvider::new());
        let memo = ChainMemo::new(provider.clone());

        assert!(memo.option_chain("AAPL", date(2024, 3, 15)).await.is_err());
        assert!(memo.option_chain("AAPL", date(2024, 3, 15)).await.is_err());
        assert_eq!(provider.call_count(), 2);
    }

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError::Unavailable("timeout".to_string());
        assert_eq!(err.to_string(), "provider unavailable: timeout");
    }
}

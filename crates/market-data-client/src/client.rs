//! HTTP client for the options endpoint.

use crate::error::Error;
use crate::types::*;
use chrono::NaiveDate;
use reqwest::Client;
use std::time::Duration;
use url::Url;


/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the data provider (e.g., "https://query2.finance.yahoo.com").
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User-Agent header sent with each request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query2.finance.yahoo.com".to_string(),
            timeout: Duration::from_secs(10),
            user_agent: concat!("option-quote-lookup/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// HTTP client for listed-option market data.
#[derive(Debug, Clone)]
pub struct MarketDataClient {
    client: Client,
    base_url: String,
}

impl MarketDataClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates a new client with default configuration and a custom base URL.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::new(ClientConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        })
    }

    /// Returns the configured base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // Options
    // ========================================================================

    /// Lists the published expiration dates for an underlying.
    ///
    /// # Errors
    /// Returns error if the request fails or the symbol is unknown.
    pub async fn expirations(&self, ticker: &str) -> Result<Vec<NaiveDate>, Error> {
        let url = self.options_url(ticker, None)?;
        let result = self.fetch_result(url, ticker).await?;

        Ok(result
            .expiration_dates
            .into_iter()
            .filter_map(expiration_to_date)
            .collect())
    }

    /// Fetches the option chain for one expiration date.
    ///
    /// # Errors
    /// Returns error if the request fails or no chain is returned.
    pub async fn option_chain(&self, ticker: &str, date: NaiveDate) -> Result<OptionChain, Error> {
        let url = self.options_url(ticker, Some(date))?;
        let result = self.fetch_result(url, ticker).await?;

        result
            .options
            .into_iter()
            .next()
            .map(OptionChain::from)
            .ok_or_else(|| Error::NotFound(format!("{} options expiring {}", ticker, date)))
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    /// Builds `{base}/v7/finance/options/{ticker}[?date=<ts>]`.
    pub(crate) fn options_url(&self, ticker: &str, date: Option<NaiveDate>) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| Error::UnexpectedResponse(format!("cannot-be-a-base URL: {}", self.base_url)))?
            .extend(["v7", "finance", "options", ticker]);

        if let Some(date) = date {
            url.query_pairs_mut()
                .append_pair("date", &date_to_expiration(date).to_string());
        }

        Ok(url)
    }

    async fn fetch_result(&self, url: Url, ticker: &str) -> Result<OptionsResult, Error> {
        let resp = self.client.get(url).send().await?;
        let body: OptionsResponse = self.handle_response(resp).await?;

        if let Some(err) = body.option_chain.error {
            return Err(Error::Api {
                status: 200,
                message: format!("{}: {}", err.code, err.description),
            });
        }

        body.option_chain
            .result
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(ticker.to_string()))
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();

        if status.is_success() {
            let bytes = resp.bytes().await?;
            Ok(serde_json::from_slice(&bytes)?)
        } else if status.as_u16() == 404 {
            let text = resp.text().await.unwrap_or_default();
            Err(Error::NotFound(text))
        } else {
            let text = resp.text().await.unwrap_or_default();
            Err(Error::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}

//! HTTP client library for listed-option market data.
//!
//! This crate talks to a Yahoo Finance style `v7/finance/options` endpoint and
//! exposes two typed operations: listing the published expiration dates of an
//! underlying, and fetching the option chain (calls and puts) for one of those
//! dates.
//!
//! # Example
//!
//! ```no_run
//! use market_data_client::{ClientConfig, MarketDataClient};
//! use chrono::NaiveDate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), market_data_client::Error> {
//!     let client = MarketDataClient::new(ClientConfig::default())?;
//!
//!     let expirations = client.expirations("AAPL").await?;
//!     println!("{} expirations", expirations.len());
//!
//!     let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//!     let chain = client.option_chain("AAPL", date).await?;
//!     println!("{} calls, {} puts", chain.calls.len(), chain.puts.len());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::{ClientConfig, MarketDataClient};
pub use error::Error;
pub use types::*;

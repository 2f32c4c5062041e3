//! # Option Quote Lookup
//!
//! A small web service that looks up listed option contracts for an equity
//! ticker, expiration date and strike price, and reports last/bid/ask pricing
//! together with whether the exchange session is currently open.
//!
//! Built with [Axum](https://crates.io/crates/axum) for async HTTP handling;
//! upstream data comes from the `market-data-client` crate.
//!
//! ## Request Flow
//!
//! ```text
//! POST /  (company, date, strike)
//!   └── ContractResolver   expirations + chain  → identifiers at the strike
//!         └── QuoteAnnotator (per identifier)   → session-aware price line
//!               └── QuoteReport::render         → plain-text report
//! ```
//!
//! Chains are fetched at most once per request through a per-request memo.
//! Failures on one contract are reported inline and do not abort the others.
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | Route handlers, HTML pages and router configuration |
//! | [`config`] | TOML configuration |
//! | [`contract`] | Contract identifier tokenizer |
//! | [`error`] | Lookup and API error types |
//! | [`holidays`] | Public holiday calendars |
//! | [`market`] | Exchange session state and clocks |
//! | [`models`] | Request/response DTOs with OpenAPI schemas |
//! | [`provider`] | Market data provider trait and implementations |
//! | [`quotes`] | Resolver, annotator and lookup service |
//! | [`state`] | Application state assembly |
//!
//! ## API Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/` | Lookup form |
//! | POST | `/` | Submit form, HTML report |
//! | GET | `/api/v1/quotes?company=&date=&strike=` | JSON report |
//! | GET | `/health` | Health check |
//!
//! ## Example Usage
//!
//! ```bash
//! # Defaults: 0.0.0.0:8080, Yahoo Finance upstream, US/Eastern session
//! cargo run
//!
//! # With a config file and custom port
//! QUOTES_CONFIG=config.toml PORT=3000 cargo run
//!
//! curl -d 'company=AAPL&date=2024-03-15&strike=100' http://localhost:8080/
//! curl 'http://localhost:8080/api/v1/quotes?company=AAPL&date=2024-03-15&strike=100'
//! ```

pub mod api;
pub mod config;
pub mod contract;
pub mod error;
pub mod holidays;
pub mod market;
pub mod models;
pub mod provider;
pub mod quotes;
pub mod state;

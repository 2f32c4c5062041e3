//! Option contract identifiers.
//!
//! Identifiers follow the OCC-style layout used by the data provider:
//!
//! ```text
//! AAPL 240315 C 00100000
//! ^^^^ ^^^^^^ ^ ^^^^^^^^
//! |    |      | strike digits
//! |    |      type flag (C/P)
//! |    expiration YYMMDD
//! underlying ticker
//! ```

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

/// Errors produced while tokenizing a contract identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractIdError {
    /// No ticker before the first digit.
    #[error("missing ticker in contract identifier: {0:?}")]
    MissingTicker(String),
    /// Ticker contains characters other than letters, '.' or '-'.
    #[error("invalid ticker in contract identifier: {0:?}")]
    InvalidTicker(String),
    /// Fewer than six digits follow the ticker, or they do not form a date.
    #[error("invalid expiration in contract identifier: {0:?}")]
    InvalidExpiration(String),
    /// Missing or unrecognized type flag.
    #[error("invalid option type in contract identifier: {0:?}")]
    InvalidOptionType(String),
    /// Strike suffix is empty or not numeric.
    #[error("invalid strike in contract identifier: {0:?}")]
    InvalidStrike(String),
}

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Right to buy.
    Call,
    /// Right to sell.
    Put,
}

impl OptionType {
    /// Single-character flag used inside identifiers.
    #[must_use]
    pub fn flag(self) -> char {
        match self {
            Self::Call => 'C',
            Self::Put => 'P',
        }
    }

    /// Capitalized label, e.g. "Call".
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Call => "Call",
            Self::Put => "Put",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Put => write!(f, "put"),
        }
    }
}

/// A decoded option contract identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContractId {
    ticker: String,
    expiration: NaiveDate,
    option_type: OptionType,
    strike_code: String,
}

impl ContractId {
    /// Builds an identifier from its parts.
    ///
    /// # Errors
    /// Returns error if the ticker or strike code would not survive a parse, or
    /// the expiration is outside 2000–2099.
    pub fn new(
        ticker: &str,
        expiration: NaiveDate,
        option_type: OptionType,
        strike_code: &str,
    ) -> Result<Self, ContractIdError> {
        validate_ticker(ticker)?;
        if !(2000..=2099).contains(&expiration.year()) {
            return Err(ContractIdError::InvalidExpiration(expiration.to_string()));
        }
        if strike_code.is_empty() || !strike_code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ContractIdError::InvalidStrike(strike_code.to_string()));
        }

        Ok(Self {
            ticker: ticker.to_string(),
            expiration,
            option_type,
            strike_code: strike_code.to_string(),
        })
    }

    /// Underlying ticker.
    #[must_use]
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Expiration date.
    #[must_use]
    pub fn expiration(&self) -> NaiveDate {
        self.expiration
    }

    /// Call or put.
    #[must_use]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Raw strike suffix, e.g. `00100000`.
    #[must_use]
    pub fn strike_code(&self) -> &str {
        &self.strike_code
    }

    /// Strike implied by the suffix, assuming the usual three implied decimals.
    #[must_use]
    pub fn strike(&self) -> Option<f64> {
        self.strike_code.parse::<u64>().ok().map(|v| v as f64 / 1000.0)
    }
}

fn validate_ticker(ticker: &str) -> Result<(), ContractIdError> {
    if ticker.is_empty() {
        return Err(ContractIdError::MissingTicker(ticker.to_string()));
    }
    let starts_alpha = ticker.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    let all_valid = ticker
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c == '.' || c == '-');
    if !starts_alpha || !all_valid {
        return Err(ContractIdError::InvalidTicker(ticker.to_string()));
    }
    Ok(())
}

impl FromStr for ContractId {
    type Err = ContractIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digit_at = s
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| ContractIdError::InvalidExpiration(s.to_string()))?;

        let (ticker, rest) = s.split_at(digit_at);
        if ticker.is_empty() {
            return Err(ContractIdError::MissingTicker(s.to_string()));
        }
        validate_ticker(ticker).map_err(|_| ContractIdError::InvalidTicker(s.to_string()))?;

        let date_part = rest
            .get(..6)
            .filter(|d| d.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| ContractIdError::InvalidExpiration(s.to_string()))?;
        let expiration = NaiveDate::parse_from_str(&format!("20{}", date_part), "%Y%m%d")
            .map_err(|_| ContractIdError::InvalidExpiration(s.to_string()))?;

        let rest = &rest[6..];
        let mut chars = rest.chars();
        let option_type = match chars.next().map(|c| c.to_ascii_uppercase()) {
            Some('C') => OptionType::Call,
            Some('P') => OptionType::Put,
            _ => return Err(ContractIdError::InvalidOptionType(s.to_string())),
        };

        let strike_code = chars.as_str();
        if strike_code.is_empty() || !strike_code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ContractIdError::InvalidStrike(s.to_string()));
        }

        Ok(Self {
            ticker: ticker.to_string(),
            expiration,
            option_type,
            strike_code: strike_code.to_string(),
        })
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            self.ticker,
            self.expiration.format("%y%m%d"),
            self.option_type.flag(),
            self.strike_code
        )
    }
}

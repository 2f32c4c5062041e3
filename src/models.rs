//! Request and response models for the form and JSON API.

use crate::error::ApiError;
use crate::market::MarketStatus;
use crate::quotes::{Annotation, ContractReport, QuoteReport};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// ============================================================================
// Requests
// ============================================================================

/// Lookup parameters, as submitted by the HTML form or the query string.
///
/// All fields arrive as text and are validated by [`QuoteRequest::validate`].
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct QuoteRequest {
    /// Underlying ticker symbol (e.g., "AAPL").
    #[serde(default)]
    pub company: String,
    /// Expiration date, YYYY-MM-DD.
    #[serde(default)]
    pub date: String,
    /// Strike price.
    #[serde(default)]
    pub strike: String,
}

/// Validated lookup parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidQuoteRequest {
    /// Ticker, trimmed.
    pub company: String,
    /// Date text, trimmed.
    pub date: String,
    /// Parsed strike.
    pub strike: f64,
}

impl QuoteRequest {
    /// Checks that a ticker is present and the strike is a finite number.
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidRequest`] describing the first bad field.
    pub fn validate(&self) -> Result<ValidQuoteRequest, ApiError> {
        let company = self.company.trim();
        if company.is_empty() {
            return Err(ApiError::InvalidRequest(
                "company symbol is required".to_string(),
            ));
        }

        let strike_text = self.strike.trim();
        let strike: f64 = strike_text.parse().map_err(|_| {
            ApiError::InvalidRequest(format!("strike must be a number, got {:?}", strike_text))
        })?;
        if !strike.is_finite() {
            return Err(ApiError::InvalidRequest(format!(
                "strike must be a finite number, got {:?}",
                strike_text
            )));
        }

        Ok(ValidQuoteRequest {
            company: company.to_string(),
            date: self.date.trim().to_string(),
            strike,
        })
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Per-contract result in the JSON report.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContractQuoteResponse {
    /// Contract identifier.
    pub identifier: String,
    /// Whether the contract was found upstream.
    pub found: bool,
    /// Session state, when the contract was found.
    pub status: Option<MarketStatus>,
    /// Last traded price.
    pub price: Option<f64>,
    /// Formatted quote line.
    pub text: Option<String>,
    /// Lookup failure for this contract.
    pub error: Option<String>,
}

impl From<&ContractReport> for ContractQuoteResponse {
    fn from(report: &ContractReport) -> Self {
        let identifier = report.identifier.clone();
        match &report.outcome {
            Ok(Annotation::Found {
                price,
                status,
                text,
            }) => Self {
                identifier,
                found: true,
                status: Some(*status),
                price: *price,
                text: Some(text.clone()),
                error: None,
            },
            Ok(Annotation::NotFound { text }) => Self {
                identifier,
                found: false,
                status: None,
                price: None,
                text: Some(text.clone()),
                error: None,
            },
            Err(reason) => Self {
                identifier,
                found: false,
                status: None,
                price: None,
                text: None,
                error: Some(reason.clone()),
            },
        }
    }
}

/// Structured lookup report.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuoteReportResponse {
    /// Resolver summary text.
    pub summary: String,
    /// Identifiers found at the strike.
    pub identifiers: Vec<String>,
    /// One entry per identifier.
    pub contracts: Vec<ContractQuoteResponse>,
    /// Full plain-text report.
    pub report: String,
    /// Resolution failure, if any.
    pub error: Option<String>,
}

impl From<&QuoteReport> for QuoteReportResponse {
    fn from(report: &QuoteReport) -> Self {
        Self {
            summary: report.summary.clone(),
            identifiers: report.identifiers.clone(),
            contracts: report.contracts.iter().map(ContractQuoteResponse::from).collect(),
            report: report.render(),
            error: report.error.clone(),
        }
    }
}

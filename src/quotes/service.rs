//! Request orchestration: resolve, annotate each contract, assemble the report.

use super::{Annotation, ContractResolver, QuoteAnnotator};
use crate::provider::{ChainMemo, MarketDataProvider};
use std::sync::Arc;
use tracing::{info, warn};

/// Annotation outcome for one resolved contract.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractReport {
    /// Contract identifier as returned upstream.
    pub identifier: String,
    /// Annotation, or the reason it failed.
    pub outcome: Result<Annotation, String>,
}

impl ContractReport {
    /// Report section for this contract, newline-terminated.
    #[must_use]
    pub fn text(&self) -> String {
        match &self.outcome {
            Ok(annotation) => {
                let mut text = annotation.text().to_string();
                if !text.ends_with('\n') {
                    text.push('\n');
                }
                text
            }
            Err(reason) => format!("Error looking up {}: {}\n", self.identifier, reason),
        }
    }
}

/// Full result of one lookup request.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteReport {
    /// Resolver summary, or the error line if resolution failed.
    pub summary: String,
    /// Identifiers found at the requested strike.
    pub identifiers: Vec<String>,
    /// One entry per identifier, in the same order.
    pub contracts: Vec<ContractReport>,
    /// Resolution failure, if any.
    pub error: Option<String>,
}

impl QuoteReport {
    /// Plain-text report with a blank line after each section.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.summary.len() + 128 * self.contracts.len());
        out.push_str(&self.summary);
        out.push('\n');
        for contract in &self.contracts {
            out.push_str(&contract.text());
            out.push('\n');
        }
        out
    }
}

/// Lookup service shared by all requests.
#[derive(Clone)]
pub struct QuoteService {
    provider: Arc<dyn MarketDataProvider>,
    resolver: ContractResolver,
    annotator: QuoteAnnotator,
}

impl QuoteService {
    /// Creates the service from its collaborators.
    #[must_use]
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        resolver: ContractResolver,
        annotator: QuoteAnnotator,
    ) -> Self {
        Self {
            provider,
            resolver,
            annotator,
        }
    }

    /// Annotator in use.
    #[must_use]
    pub fn annotator(&self) -> &QuoteAnnotator {
        &self.annotator
    }

    /// Runs a lookup for `ticker` expiring on `date` at `strike`.
    ///
    /// Never fails: upstream and parsing errors are rendered into the report.
    /// A failure on one contract does not stop the others.
    pub async fn handle(&self, ticker: &str, date: &str, strike: f64) -> QuoteReport {
        let ticker = ticker.trim().to_uppercase();
        info!("quote lookup {} {} @ {}", ticker, date, strike);

        let memo = ChainMemo::new(Arc::clone(&self.provider));

        let resolution = match self.resolver.resolve(&memo, &ticker, date, strike).await {
            Ok(resolution) => resolution,
            Err(e) => {
                warn!("resolution failed for {} {}: {}", ticker, date, e);
                return QuoteReport {
                    summary: format!("Error: {}\n", e),
                    identifiers: Vec::new(),
                    contracts: Vec::new(),
                    error: Some(e.to_string()),
                };
            }
        };

        let mut contracts = Vec::with_capacity(resolution.identifiers.len());
        for identifier in &resolution.identifiers {
            let outcome = self
                .annotator
                .annotate(&memo, identifier)
                .await
                .map_err(|e| {
                    warn!("annotation failed for {}: {}", identifier, e);
                    e.to_string()
                });
            contracts.push(ContractReport {
                identifier: identifier.clone(),
                outcome,
            });
        }

        QuoteReport {
            summary: resolution.summary,
            identifiers: resolution.identifiers,
            contracts,
            error: None,
        }
    }
}

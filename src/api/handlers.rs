//! API request handlers.

use crate::api::pages::{self, HtmlError};
use crate::error::ApiError;
use crate::models::{HealthResponse, QuoteReportResponse, QuoteRequest};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Form, Query, State};
use axum::http::Uri;
use axum::response::Html;
use std::sync::Arc;

// ============================================================================
// Health Check
// ============================================================================

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// HTML Form
// ============================================================================

/// Renders the lookup form.
pub async fn form_page() -> Html<String> {
    Html(pages::form_page())
}

/// Handles a form submission and renders the plain-text report.
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    Form(request): Form<QuoteRequest>,
) -> Result<Html<String>, HtmlError> {
    let request = request.validate()?;
    let report = state
        .quotes
        .handle(&request.company, &request.date, request.strike)
        .await;

    Ok(Html(pages::result_page(&report.render())))
}

// ============================================================================
// JSON Lookup
// ============================================================================

/// Look up option quotes for a ticker, expiration and strike.
#[utoipa::path(
    get,
    path = "/api/v1/quotes",
    params(QuoteRequest),
    responses(
        (status = 200, description = "Lookup report", body = QuoteReportResponse),
        (status = 400, description = "Invalid parameters", body = crate::error::ErrorResponse)
    ),
    tag = "Quotes"
)]
pub async fn get_quote_report(
    State(state): State<Arc<AppState>>,
    Query(request): Query<QuoteRequest>,
) -> Result<Json<QuoteReportResponse>, ApiError> {
    let request = request.validate()?;
    let report = state
        .quotes
        .handle(&request.company, &request.date, request.strike)
        .await;

    Ok(Json(QuoteReportResponse::from(&report)))
}

// ============================================================================
// Fallback
// ============================================================================

/// Unknown route.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}

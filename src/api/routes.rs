//! Route configuration.

use crate::api::handlers;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use std::sync::Arc;

/// Creates the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Lookup form
        .route("/", get(handlers::form_page).post(handlers::submit_form))
        // Health check
        .route("/health", get(handlers::health_check))
        // JSON lookup
        .route("/api/v1/quotes", get(handlers::get_quote_report))
        .fallback(handlers::not_found)
        .with_state(state)
}

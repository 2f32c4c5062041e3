//! Option Quote Lookup Server
//!
//! Serves the lookup form and JSON API.

use option_quote_lookup::api::create_router;
use option_quote_lookup::config::Config;
use option_quote_lookup::state::AppState;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use option_quote_lookup::error::ErrorResponse;
use option_quote_lookup::market::MarketStatus;
use option_quote_lookup::models::{ContractQuoteResponse, HealthResponse, QuoteReportResponse};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        option_quote_lookup::api::handlers::health_check,
        option_quote_lookup::api::handlers::get_quote_report,
    ),
    components(
        schemas(
            HealthResponse,
            QuoteReportResponse,
            ContractQuoteResponse,
            MarketStatus,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Quotes", description = "Option quote lookup"),
    ),
    info(
        title = "Option Quote Lookup API",
        version = "0.1.0",
        description = "Look up option contracts and quotes by ticker, expiration and strike",
        license(name = "MIT")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let mut config = match std::env::var("QUOTES_CONFIG") {
        Ok(path) => {
            info!("Loading configuration from {}", path);
            Config::load(&path)?
        }
        Err(_) => Config::default(),
    };

    // Environment overrides for host and port
    if let Ok(host) = std::env::var("HOST") {
        config.server.host = host;
    }
    if let Ok(port) = std::env::var("PORT") {
        config.server.port = port.parse()?;
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(AppState::from_config(config)?);

    info!("Starting Option Quote Lookup on {}", addr);
    info!("Swagger UI available at http://{}/swagger-ui/", addr);

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = create_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start the server
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

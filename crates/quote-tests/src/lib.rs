//! Integration test harness for the option quote lookup server.
//!
//! Each test boots the real router on an ephemeral local port, backed by an
//! in-memory provider and a pinned clock, and talks to it over HTTP.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use market_data_client::{OptionChain, OptionContract};
use option_quote_lookup::api::create_router;
use option_quote_lookup::holidays::UsFederalHolidays;
use option_quote_lookup::market::{FixedClock, SessionHours};
use option_quote_lookup::provider::StaticProvider;
use option_quote_lookup::state::AppState;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Instant in New York local time, converted to UTC.
///
/// # Panics
/// Panics if the local time is ambiguous or does not exist.
#[must_use]
pub fn eastern(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    chrono_tz::America::New_York
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .expect("unambiguous local time")
        .with_timezone(&Utc)
}

/// Provider with a single AAPL 2024-03-15 chain: a call and put at 95, a call
/// at 100, and a put at 105 with no quote.
#[must_use]
pub fn aapl_provider() -> StaticProvider {
    StaticProvider::new()
        .with_chain(
            "AAPL",
            NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date"),
            OptionChain {
                calls: vec![
                    OptionContract::new("AAPL240315C00095000", 95.0, Some(77.3), Some(77.0), Some(77.6)),
                    OptionContract::new("AAPL240315C00100000", 100.0, Some(72.5), Some(72.1), Some(73.0)),
                ],
                puts: vec![
                    OptionContract::new("AAPL240315P00095000", 95.0, Some(0.01), Some(0.0), Some(0.02)),
                    OptionContract::new("AAPL240315P00105000", 105.0, None, None, None),
                ],
            },
        )
        .with_chain(
            "AAPL",
            NaiveDate::from_ymd_opt(2024, 3, 22).expect("valid date"),
            OptionChain::default(),
        )
        .with_unavailable("DOWN")
}

/// Starts the server with `provider` and a clock pinned at `now`.
///
/// Returns the base URL, e.g. `http://127.0.0.1:54321`.
///
/// # Errors
/// Returns error if the listener cannot be bound.
pub async fn spawn_server(
    provider: StaticProvider,
    now: DateTime<Utc>,
) -> std::io::Result<String> {
    let state = Arc::new(AppState::with_collaborators(
        Arc::new(provider),
        Arc::new(FixedClock(now)),
        Arc::new(UsFederalHolidays::new()),
        chrono_tz::America::New_York,
        SessionHours::default(),
        1e-6,
    ));

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = create_router(state);

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(format!("http://{}", addr))
}

/// Submits the lookup form and returns (status, body).
///
/// # Errors
/// Returns error if the request fails.
pub async fn post_form(
    base_url: &str,
    company: &str,
    date: &str,
    strike: &str,
) -> Result<(u16, String), reqwest::Error> {
    let body = serde_urlencoded::to_string([
        ("company", company),
        ("date", date),
        ("strike", strike),
    ])
    .unwrap_or_default();

    let resp = reqwest::Client::new()
        .post(format!("{}/", base_url))
        .header("content-type", "application/x-www-form-urlencoded")
        .body(body)
        .send()
        .await?;
    let status = resp.status().as_u16();
    Ok((status, resp.text().await?))
}

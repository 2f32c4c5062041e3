//! HTML form tests.

use quote_tests::{aapl_provider, eastern, post_form, spawn_server};

#[tokio::test]
async fn test_get_form() {
    let base = spawn_server(aapl_provider(), eastern(2024, 3, 14, 10, 0))
        .await
        .expect("Failed to start server");

    let page = reqwest::get(format!("{}/", base))
        .await
        .expect("Request failed")
        .text()
        .await
        .expect("Invalid body");

    assert!(page.contains("<form method=\"post\""));
    assert!(page.contains("name=\"company\""));
    assert!(page.contains("name=\"date\""));
    assert!(page.contains("name=\"strike\""));
}

#[tokio::test]
async fn test_call_without_put_during_session() {
    let base = spawn_server(aapl_provider(), eastern(2024, 3, 14, 10, 0))
        .await
        .expect("Failed to start server");

    let (status, page) = post_form(&base, "AAPL", "2024-03-15", "100")
        .await
        .expect("Form post failed");

    assert_eq!(status, 200);
    assert!(page.contains(
        "<pre>Call option for strike price 100.0 on 2024-03-15: AAPL240315C00100000\n\
         No put option with a strike price of 100.0 for 2024-03-15.\n\
         \n\
         Market is open. Last: 72.5, Ask: 73.0, Bid: 72.1.\n\
         \n</pre>"
    ));
    assert!(page.contains("Try another"));
}

#[tokio::test]
async fn test_both_sides_after_hours() {
    let base = spawn_server(aapl_provider(), eastern(2024, 3, 14, 17, 0))
        .await
        .expect("Failed to start server");

    let (_, page) = post_form(&base, "aapl", "2024-03-15", "95")
        .await
        .expect("Form post failed");

    assert!(page.contains(
        "Call option for strike price 95.0 on 2024-03-15: AAPL240315C00095000\n\
         Put option for strike price 95.0 on 2024-03-15: AAPL240315P00095000\n"
    ));
    assert!(page.contains("Market is closed. The last price of AAPL240315C00095000 was 77.3.\n"));
    assert!(page.contains("Market is closed. The last price of AAPL240315P00095000 was 0.01.\n"));
}

#[tokio::test]
async fn test_weekend_uses_last_price() {
    let base = spawn_server(aapl_provider(), eastern(2024, 3, 16, 11, 0))
        .await
        .expect("Failed to start server");

    let (_, page) = post_form(&base, "AAPL", "2024-03-15", "105")
        .await
        .expect("Form post failed");

    assert!(page.contains("No call option with a strike price of 105.0 for 2024-03-15.\n"));
    assert!(page.contains(
        "Today is weekend, the market is closed.\nThe last price of AAPL240315P00105000 was N/A.\n"
    ));
}

#[tokio::test]
async fn test_unlisted_date() {
    let base = spawn_server(aapl_provider(), eastern(2024, 3, 14, 10, 0))
        .await
        .expect("Failed to start server");

    let (status, page) = post_form(&base, "AAPL", "2024-04-19", "100")
        .await
        .expect("Form post failed");

    assert_eq!(status, 200);
    assert!(page.contains("<pre>No options available for 2024-04-19.\n\n</pre>"));
}

#[tokio::test]
async fn test_upstream_failure_is_reported() {
    let base = spawn_server(aapl_provider(), eastern(2024, 3, 14, 10, 0))
        .await
        .expect("Failed to start server");

    let (status, page) = post_form(&base, "DOWN", "2024-03-15", "100")
        .await
        .expect("Form post failed");

    assert_eq!(status, 200);
    assert!(page.contains("Error: provider unavailable"));
}

#[tokio::test]
async fn test_non_numeric_strike_rejected() {
    let base = spawn_server(aapl_provider(), eastern(2024, 3, 14, 10, 0))
        .await
        .expect("Failed to start server");

    let (status, page) = post_form(&base, "AAPL", "2024-03-15", "abc")
        .await
        .expect("Form post failed");

    assert_eq!(status, 400);
    assert!(page.contains("strike must be a number"));
}

#[tokio::test]
async fn test_missing_company_rejected() {
    let base = spawn_server(aapl_provider(), eastern(2024, 3, 14, 10, 0))
        .await
        .expect("Failed to start server");

    let (status, _) = post_form(&base, "", "2024-03-15", "100")
        .await
        .expect("Form post failed");

    assert_eq!(status, 400);
}

//! Unit tests for types module.

use super::*;

const SAMPLE: &str = r#"{
  "optionChain": {
    "result": [{
      "underlyingSymbol": "AAPL",
      "expirationDates": [1710460800, 1711065600],
      "strikes": [95.0, 100.0, 105.0],
      "options": [{
        "expirationDate": 1710460800,
        "hasMiniOptions": false,
        "calls": [{
          "contractSymbol": "AAPL240315C00100000",
          "strike": 100.0,
          "currency": "USD",
          "lastPrice": 72.5,
          "bid": 72.1,
          "ask": 73.0,
          "volume": 12,
          "openInterest": 340,
          "impliedVolatility": 1.02,
          "inTheMoney": true,
          "expiration": 1710460800
        }],
        "puts": [{
          "contractSymbol": "AAPL240315P00100000",
          "strike": 100.0,
          "lastPrice": 0.01
        }]
      }]
    }],
    "error": null
  }
}"#;

// ============================================================================
// Envelope Tests
// ============================================================================

#[test]
fn test_options_response_deserialization() {
    let resp: OptionsResponse = serde_json::from_str(SAMPLE).unwrap();
    let result = &resp.option_chain.result[0];

    assert_eq!(result.underlying_symbol.as_deref(), Some("AAPL"));
    assert_eq!(result.expiration_dates, vec![1710460800, 1711065600]);
    assert_eq!(result.strikes.len(), 3);
    assert_eq!(result.options.len(), 1);
    assert!(resp.option_chain.error.is_none());
}

#[test]
fn test_contract_missing_quote_fields_default_to_none() {
    let resp: OptionsResponse = serde_json::from_str(SAMPLE).unwrap();
    let put = &resp.option_chain.result[0].options[0].puts[0];

    assert_eq!(put.contract_symbol, "AAPL240315P00100000");
    assert_eq!(put.last_price, Some(0.01));
    assert_eq!(put.bid, None);
    assert_eq!(put.ask, None);
    assert!(!put.in_the_money);
}

#[test]
fn test_contract_full_fields() {
    let resp: OptionsResponse = serde_json::from_str(SAMPLE).unwrap();
    let call = &resp.option_chain.result[0].options[0].calls[0];

    assert_eq!(call.strike, 100.0);
    assert_eq!(call.bid, Some(72.1));
    assert_eq!(call.ask, Some(73.0));
    assert_eq!(call.open_interest, Some(340));
    assert!(call.in_the_money);
}

#[test]
fn test_envelope_with_upstream_error() {
    let json = r#"{"optionChain":{"result":[],"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
    let resp: OptionsResponse = serde_json::from_str(json).unwrap();

    assert!(resp.option_chain.result.is_empty());
    let err = resp.option_chain.error.unwrap();
    assert_eq!(err.code, "Not Found");
    assert!(err.description.contains("delisted"));
}

#[test]
fn test_expiration_chain_into_option_chain() {
    let resp: OptionsResponse = serde_json::from_str(SAMPLE).unwrap();
    let chain: OptionChain = resp.option_chain.result[0].options[0].clone().into();

    assert_eq!(chain.calls.len(), 1);
    assert_eq!(chain.puts.len(), 1);
}

// ============================================================================
// Date Conversion Tests
// ============================================================================

#[test]
fn test_expiration_to_date() {
    let date = expiration_to_date(1710460800).unwrap();
    assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
}

#[test]
fn test_date_to_expiration() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    assert_eq!(date_to_expiration(date), 1710460800);
}

#[test]
fn test_option_contract_new() {
    let contract = OptionContract::new("SPY240621P00500000", 500.0, Some(3.2), None, Some(3.4));

    assert_eq!(contract.contract_symbol, "SPY240621P00500000");
    assert_eq!(contract.last_price, Some(3.2));
    assert_eq!(contract.bid, None);
    assert_eq!(contract.expiration, None);
}

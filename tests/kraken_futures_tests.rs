mod common;

use common::MockRest;
use krakenx::core::errors::{DecodeError, ExchangeError};
use krakenx::core::traits::{FundingRateSource, OrderBookSource};
use krakenx::core::types::TradeSide;
use krakenx::exchanges::kraken_futures::{FuturesMarketDataSource, KrakenFuturesConnector};
use rust_decimal::Decimal;

const INSTRUMENTS: &str = "/derivatives/api/v3/instruments";
const HISTORY: &str = "/derivatives/api/v3/history";

fn dec(s: &str) -> Decimal {
    Decimal::from_str_exact(s).unwrap()
}

fn connector(rest: &MockRest) -> KrakenFuturesConnector<MockRest> {
    KrakenFuturesConnector::new(rest.clone())
}

#[tokio::test]
async fn test_instrument_status_reports_api_error() {
    let rest = MockRest::new().route(
        "/derivatives/api/v3/instruments/PF_NOPE/status",
        r#"{"result":"error","error":"symbol not found","serverTime":"2024-01-01T00:00:00.000Z"}"#,
    );
    let futures = connector(&rest);

    let err = futures.get_instrument_status("PF_NOPE").await.unwrap_err();
    match err {
        ExchangeError::Api(api) => assert_eq!(api.messages, vec!["symbol not found".to_string()]),
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_instrument_status_success() {
    let rest = MockRest::new().route(
        "/derivatives/api/v3/instruments/PF_XBTUSD/status",
        r#"{"result":"success","serverTime":"2024-01-01T00:00:00.000Z","symbol":"PF_XBTUSD",
            "isExperiencingDislocation":false,"priceDislocationDirection":null,
            "isExperiencingExtremeVolatility":false,"extremeVolatilityInitialMarginMultiplier":1}"#,
    );
    let futures = connector(&rest);

    let status = futures.get_instrument_status("PF_XBTUSD").await.unwrap();
    assert_eq!(status.symbol, "PF_XBTUSD");
    assert!(!status.is_experiencing_dislocation);
    assert_eq!(
        status.extreme_volatility_initial_margin_multiplier,
        Some(Decimal::ONE)
    );
}

#[tokio::test]
async fn test_path_symbol_is_percent_encoded() {
    let rest = MockRest::new();
    let futures = connector(&rest);

    // no route, so the call fails at the transport; only the path matters here
    let _ = futures.get_ticker("PF XBT/USD").await;
    assert_eq!(
        rest.last_request().endpoint,
        "/derivatives/api/v3/tickers/PF%20XBT%2FUSD"
    );
}

#[tokio::test]
async fn test_ticker_sparse_fields() {
    let rest = MockRest::new().route(
        "/derivatives/api/v3/tickers/PF_XBTUSD",
        r#"{"result":"success","serverTime":"2024-01-01T00:00:00.000Z","ticker":{
            "symbol":"PF_XBTUSD","last":30000.5,"lastTime":"2024-01-01T00:00:00.000Z",
            "markPrice":30001,"bid":30000,"bidSize":2.5,"ask":30001.5,"askSize":1,
            "fundingRate":0,"suspended":false,"postOnly":false,"tag":"perpetual","pair":"XBT:USD"}}"#,
    );
    let futures = connector(&rest);

    let ticker = futures.get_ticker("PF_XBTUSD").await.unwrap();
    assert_eq!(ticker.last, Some(dec("30000.5")));
    assert_eq!(ticker.bid_size, Some(dec("2.5")));
    assert_eq!(ticker.funding_rate, Some(Decimal::ZERO));
    assert_eq!(ticker.funding_rate_prediction, None);
    assert_eq!(ticker.open_interest, None);
    assert_eq!(ticker.tag.as_deref(), Some("perpetual"));
}

#[tokio::test]
async fn test_all_tickers() {
    let rest = MockRest::new().route(
        "/derivatives/api/v3/tickers",
        r#"{"result":"success","tickers":[{"symbol":"PF_XBTUSD","last":30000},{"symbol":"in_xbtusd"}]}"#,
    );
    let futures = connector(&rest);

    let tickers = futures.get_tickers().await.unwrap();
    assert_eq!(tickers.len(), 2);
    assert_eq!(tickers[1].last, None);
}

#[tokio::test]
async fn test_instrument_lookup() {
    let rest = MockRest::new().route(
        INSTRUMENTS,
        r#"{"result":"success","instruments":[
            {"symbol":"PF_XBTUSD","type":"flexible_futures","tradeable":true,"tickSize":0.5},
            {"symbol":"PF_ETHUSD","type":"flexible_futures","tradeable":true,"tickSize":0.1}]}"#,
    );
    let futures = connector(&rest);

    assert_eq!(futures.get_instruments().await.unwrap().len(), 2);

    let eth = futures.get_instrument("PF_ETHUSD").await.unwrap();
    assert_eq!(eth.tick_size, Some(dec("0.1")));

    let err = futures.get_instrument("PF_SOLUSD").await.unwrap_err();
    assert!(matches!(err, ExchangeError::NotFound { ref key } if key == "PF_SOLUSD"));
}

#[tokio::test]
async fn test_trade_history_last_time_omission() {
    let rest = MockRest::new().route(
        HISTORY,
        r#"{"result":"success","serverTime":"2024-01-01T00:00:00.000Z","history":[
            {"time":"2024-01-01T00:00:00.000Z","trade_id":1,"price":30000,"size":0.5,
             "side":"sell","type":"fill","uid":"u-1"}]}"#,
    );
    let futures = connector(&rest);

    let trades = futures.get_trade_history("PF_XBTUSD", Some("")).await.unwrap();
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].side, Some(TradeSide::Sell));
    assert_eq!(trades[0].size.map(|s| s.value()), Some(dec("0.5")));

    let request = rest.last_request();
    assert_eq!(request.param("symbol"), Some("PF_XBTUSD"));
    assert_eq!(request.param("lastTime"), None);

    futures
        .get_trade_history("PF_XBTUSD", Some("2024-01-01T00:00:00.000Z"))
        .await
        .unwrap();
    assert_eq!(
        rest.last_request().param("lastTime"),
        Some("2024-01-01T00:00:00.000Z")
    );
}

#[tokio::test]
async fn test_order_book() {
    let rest = MockRest::new().route(
        "/derivatives/api/v3/orderbook",
        r#"{"result":"success","serverTime":"2024-01-01T00:00:00.000Z","orderBook":{
            "bids":[[30000,1.5],[29999.5,2]],"asks":[[30000.5,0.25],[30001,4]]}}"#,
    );
    let futures = connector(&rest);

    let book = futures.get_order_book("PF_XBTUSD", None).await.unwrap();
    assert_eq!(book.symbol, "PF_XBTUSD");
    assert_eq!(book.bids.len(), 2);
    assert_eq!(book.best_bid().unwrap().quantity.value(), dec("1.5"));
    assert_eq!(book.best_ask().unwrap().price.value(), dec("30000.5"));
    assert_eq!(rest.last_request().param("symbol"), Some("PF_XBTUSD"));

    let top = futures.get_order_book("PF_XBTUSD", Some(1)).await.unwrap();
    assert_eq!(top.asks.len(), 1);
}

#[tokio::test]
async fn test_funding_rates() {
    let rest = MockRest::new().route(
        "/derivatives/api/v3/historical-funding-rates",
        r#"{"result":"success","serverTime":"2024-01-01T00:00:00.000Z","rates":[
            {"timestamp":"2024-01-01T00:00:00.000Z","fundingRate":0.5,"relativeFundingRate":0.0001},
            {"timestamp":"2024-01-01T01:00:00.000Z","fundingRate":0,"relativeFundingRate":0}]}"#,
    );
    let futures = connector(&rest);

    let rates = futures.get_funding_rate_history("PF_XBTUSD").await.unwrap();
    assert_eq!(rates.len(), 2);
    assert_eq!(rates[0].funding_rate, Some(dec("0.5")));
    assert_eq!(rates[1].funding_rate, Some(Decimal::ZERO));
    assert!(rates.iter().all(|r| r.symbol == "PF_XBTUSD"));
}

#[tokio::test]
async fn test_error_and_errors_are_concatenated() {
    let rest = MockRest::new().route(
        HISTORY,
        r#"{"result":"error","error":"invalidArgument","errors":["symbol","lastTime"]}"#,
    );
    let futures = connector(&rest);

    let err = futures.get_trade_history("PF_XBTUSD", None).await.unwrap_err();
    assert_eq!(
        err.api_messages().unwrap(),
        &[
            "invalidArgument".to_string(),
            "symbol".to_string(),
            "lastTime".to_string()
        ]
    );
}

#[tokio::test]
async fn test_success_without_payload_field_is_decode_failure() {
    let rest = MockRest::new().route(INSTRUMENTS, r#"{"result":"success"}"#);
    let futures = connector(&rest);

    let err = futures.get_instruments().await.unwrap_err();
    assert!(matches!(
        err,
        ExchangeError::Decode(DecodeError::MissingField(ref field)) if field == "instruments"
    ));
}

#[tokio::test]
async fn test_empty_symbol_is_rejected_before_any_request() {
    let rest = MockRest::new();
    let futures = connector(&rest);

    let err = futures.get_ticker("").await.unwrap_err();
    assert!(matches!(err, ExchangeError::InvalidParameters(_)));
    assert!(rest.requests().is_empty());
}

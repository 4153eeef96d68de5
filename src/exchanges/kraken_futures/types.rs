use crate::core::errors::DecodeError;
use crate::core::kernel::tuple::{decimal_number, slot, DecodedTuple, SlotKind, TupleRecord, TupleSchema};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw futures envelope. Payload fields sit next to `result` at the top level
/// and are collected into `payload`.
#[derive(Debug, Clone, Deserialize)]
pub struct KrakenFuturesEnvelope {
    pub result: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub errors: Option<Vec<Value>>,
    #[serde(rename = "serverTime", default)]
    pub server_time: Option<String>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

/// Successful futures response with the envelope fields stripped
#[derive(Debug, Clone, PartialEq)]
pub struct FuturesPayload {
    pub server_time: Option<String>,
    pub fields: Map<String, Value>,
}

impl FuturesPayload {
    /// Remove a named payload field, failing if it was not sent
    pub fn take(&mut self, field: &str) -> Result<Value, DecodeError> {
        self.fields
            .remove(field)
            .ok_or_else(|| DecodeError::missing(field))
    }

    /// The whole payload as one JSON object
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KrakenFuturesMarginLevel {
    #[serde(default)]
    pub contracts: Option<i64>,
    #[serde(default)]
    pub num_non_contract_units: Option<Decimal>,
    pub initial_margin: Decimal,
    pub maintenance_margin: Decimal,
}

/// Contract specification from `/instruments`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KrakenFuturesInstrument {
    pub symbol: String,
    #[serde(rename = "type", default)]
    pub instrument_type: Option<String>,
    #[serde(default)]
    pub underlying: Option<String>,
    #[serde(default)]
    pub tick_size: Option<Decimal>,
    #[serde(default)]
    pub contract_size: Option<Decimal>,
    #[serde(default)]
    pub tradeable: bool,
    #[serde(default)]
    pub impact_mid_size: Option<Decimal>,
    #[serde(default)]
    pub max_position_size: Option<Decimal>,
    #[serde(default)]
    pub opening_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_trading_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub margin_levels: Vec<KrakenFuturesMarginLevel>,
    #[serde(default)]
    pub funding_rate_coefficient: Option<Decimal>,
    #[serde(default)]
    pub max_relative_funding_rate: Option<Decimal>,
    #[serde(default)]
    pub contract_value_trade_precision: Option<i64>,
    #[serde(default)]
    pub post_only: Option<bool>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Flat payload of `/instruments/{symbol}/status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KrakenFuturesInstrumentStatus {
    pub symbol: String,
    pub is_experiencing_dislocation: bool,
    #[serde(default)]
    pub price_dislocation_direction: Option<String>,
    pub is_experiencing_extreme_volatility: bool,
    #[serde(default)]
    pub extreme_volatility_initial_margin_multiplier: Option<Decimal>,
}

/// Futures ticker.
///
/// Instruments only populate the fields that apply to them, e.g. spot indices
/// carry no bid or ask and fixed maturities carry no funding rate. Absent
/// fields are `None`; a reported zero is `Some(0)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KrakenFuturesTicker {
    pub symbol: String,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub pair: Option<String>,
    #[serde(default)]
    pub last: Option<Decimal>,
    #[serde(default)]
    pub last_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_size: Option<Decimal>,
    #[serde(default)]
    pub mark_price: Option<Decimal>,
    #[serde(default)]
    pub index_price: Option<Decimal>,
    #[serde(default)]
    pub bid: Option<Decimal>,
    #[serde(default)]
    pub bid_size: Option<Decimal>,
    #[serde(default)]
    pub ask: Option<Decimal>,
    #[serde(default)]
    pub ask_size: Option<Decimal>,
    #[serde(default)]
    pub vol24h: Option<Decimal>,
    #[serde(default)]
    pub volume_quote: Option<Decimal>,
    #[serde(default)]
    pub open_interest: Option<Decimal>,
    #[serde(default)]
    pub open24h: Option<Decimal>,
    #[serde(default)]
    pub high24h: Option<Decimal>,
    #[serde(default)]
    pub low24h: Option<Decimal>,
    #[serde(default)]
    pub change24h: Option<Decimal>,
    #[serde(default)]
    pub funding_rate: Option<Decimal>,
    #[serde(default)]
    pub funding_rate_prediction: Option<Decimal>,
    #[serde(default)]
    pub suspended: bool,
    #[serde(default)]
    pub post_only: bool,
}

/// One entry of `/history`
#[derive(Debug, Clone, Deserialize)]
pub struct KrakenFuturesHistoryEntry {
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub trade_id: Option<i64>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub size: Option<Decimal>,
    #[serde(default)]
    pub side: Option<String>,
    #[serde(rename = "type", default)]
    pub trade_type: Option<String>,
    #[serde(default)]
    pub uid: Option<String>,
}

/// One entry of `/historical-funding-rates`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KrakenFuturesFundingRateEntry {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub funding_rate: Option<Decimal>,
    #[serde(default)]
    pub relative_funding_rate: Option<Decimal>,
}

/// Raw `orderBook` payload field
#[derive(Debug, Clone, Deserialize)]
pub struct KrakenFuturesOrderBook {
    #[serde(default)]
    pub bids: Vec<Value>,
    #[serde(default)]
    pub asks: Vec<Value>,
}

/// `[<price>, <size>]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KrakenFuturesPriceLevel {
    pub price: Decimal,
    pub size: Decimal,
}

pub static FUTURES_PRICE_LEVEL: TupleSchema = TupleSchema::new(
    "futures price level",
    &[
        slot("price", SlotKind::Decimal),
        slot("size", SlotKind::Decimal),
    ],
);

impl TupleRecord for KrakenFuturesPriceLevel {
    const SCHEMA: &'static TupleSchema = &FUTURES_PRICE_LEVEL;

    fn from_tuple(tuple: &DecodedTuple) -> Result<Self, DecodeError> {
        Ok(Self {
            price: tuple.decimal(0)?,
            size: tuple.decimal(1)?,
        })
    }

    fn to_tuple(&self) -> Vec<Value> {
        vec![decimal_number(self.price), decimal_number(self.size)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    #[test]
    fn test_ticker_distinguishes_absent_from_zero() {
        let ticker: KrakenFuturesTicker = serde_json::from_value(json!({
            "symbol": "PF_XBTUSD",
            "last": 30000.5,
            "fundingRate": 0,
            "suspended": false
        }))
        .unwrap();

        assert_eq!(ticker.last, Some(dec("30000.5")));
        assert_eq!(ticker.funding_rate, Some(Decimal::ZERO));
        assert_eq!(ticker.funding_rate_prediction, None);
        assert_eq!(ticker.bid, None);
    }

    #[test]
    fn test_ticker_null_is_absent() {
        let ticker: KrakenFuturesTicker =
            serde_json::from_value(json!({"symbol": "in_xbtusd", "markPrice": null})).unwrap();
        assert_eq!(ticker.mark_price, None);
        assert!(!ticker.suspended);
    }

    #[test]
    fn test_instrument_status_fields() {
        let status: KrakenFuturesInstrumentStatus = serde_json::from_value(json!({
            "symbol": "PF_XBTUSD",
            "isExperiencingDislocation": false,
            "priceDislocationDirection": null,
            "isExperiencingExtremeVolatility": true,
            "extremeVolatilityInitialMarginMultiplier": 2
        }))
        .unwrap();

        assert!(status.is_experiencing_extreme_volatility);
        assert_eq!(status.price_dislocation_direction, None);
        assert_eq!(
            status.extreme_volatility_initial_margin_multiplier,
            Some(Decimal::from(2))
        );
    }

    #[test]
    fn test_instrument_with_margin_levels() {
        let instrument: KrakenFuturesInstrument = serde_json::from_value(json!({
            "symbol": "PF_XBTUSD",
            "type": "flexible_futures",
            "tickSize": 0.5,
            "contractSize": 1,
            "tradeable": true,
            "openingDate": "2022-01-01T00:00:00.000Z",
            "marginLevels": [
                {"numNonContractUnits": 0, "initialMargin": 0.02, "maintenanceMargin": 0.01}
            ],
            "tags": []
        }))
        .unwrap();

        assert_eq!(instrument.instrument_type.as_deref(), Some("flexible_futures"));
        assert_eq!(instrument.tick_size, Some(dec("0.5")));
        assert_eq!(instrument.margin_levels.len(), 1);
        assert_eq!(instrument.margin_levels[0].initial_margin, dec("0.02"));
        assert!(instrument.opening_date.is_some());
        assert_eq!(instrument.funding_rate_coefficient, None);
    }

    #[test]
    fn test_price_level_round_trip() {
        let level = KrakenFuturesPriceLevel {
            price: dec("30000.5"),
            size: dec("1.25"),
        };
        let raw = Value::Array(level.to_tuple());
        assert_eq!(KrakenFuturesPriceLevel::decode(&raw).unwrap(), level);
    }

    #[test]
    fn test_payload_take_reports_missing_field() {
        let mut payload = FuturesPayload {
            server_time: None,
            fields: Map::new(),
        };
        assert!(matches!(
            payload.take("ticker"),
            Err(DecodeError::MissingField(ref field)) if field == "ticker"
        ));
    }
}

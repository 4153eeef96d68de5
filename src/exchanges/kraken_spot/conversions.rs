use crate::core::errors::{DecodeError, ExchangeError};
use crate::core::kernel::tuple::{decode_all, parse_decimal, TupleRecord};
use crate::core::types::{OrderBook, Price, PriceLevel, Quantity, Trade, TradeHistory};
use crate::exchanges::kraken_spot::types::{
    BookTop, FeeTier, KrakenSpotAssetInfo, KrakenSpotAssetPair, KrakenSpotOrderBook,
    KrakenSpotPriceLevel, KrakenSpotServerTime, KrakenSpotSystemStatus, KrakenSpotTickerInfo,
    KrakenSpotTradeEntry, LastTrade, RollingCount, RollingWindow, SpotTicker,
};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Key next to the per-pair trade arrays holding the paging cursor
const TRADES_CURSOR_KEY: &str = "last";

/// Convert Kraken spot `/public/Time` result to `KrakenSpotServerTime`
pub fn convert_server_time(payload: Value) -> Result<KrakenSpotServerTime, DecodeError> {
    Ok(serde_json::from_value(payload)?)
}

/// Convert Kraken spot `/public/SystemStatus` result to `KrakenSpotSystemStatus`
pub fn convert_system_status(payload: Value) -> Result<KrakenSpotSystemStatus, DecodeError> {
    Ok(serde_json::from_value(payload)?)
}

/// Convert Kraken spot `/public/Assets` result to an asset map keyed by name
pub fn convert_asset_info(
    payload: Value,
) -> Result<BTreeMap<String, KrakenSpotAssetInfo>, DecodeError> {
    Ok(serde_json::from_value(payload)?)
}

/// Convert Kraken spot `/public/AssetPairs` result, decoding every pair's fee tiers
pub fn convert_asset_pairs(
    payload: Value,
) -> Result<BTreeMap<String, KrakenSpotAssetPair>, DecodeError> {
    into_object(payload)?
        .into_iter()
        .map(|(pair, value)| Ok((pair, convert_asset_pair(value)?)))
        .collect()
}

/// Convert one asset pair entry. `fees` and `fees_maker` are positional tiers
/// decoded separately; a missing list is empty.
pub fn convert_asset_pair(value: Value) -> Result<KrakenSpotAssetPair, DecodeError> {
    let fees = tuple_list::<FeeTier>(&value, "fees")?;
    let fees_maker = tuple_list::<FeeTier>(&value, "fees_maker")?;

    let mut pair: KrakenSpotAssetPair = serde_json::from_value(value)?;
    pair.fees = fees;
    pair.fees_maker = fees_maker;
    Ok(pair)
}

/// Convert the `pair` entry of a `/public/Ticker` result; `NotFound` when absent
pub fn convert_ticker(pair: &str, payload: Value) -> Result<SpotTicker, ExchangeError> {
    let entry = take_entry(payload, pair)?;
    let raw: KrakenSpotTickerInfo = serde_json::from_value(entry).map_err(DecodeError::from)?;

    let ticker = SpotTicker {
        pair: pair.to_string(),
        ask: BookTop::decode(&Value::Array(raw.a))?,
        bid: BookTop::decode(&Value::Array(raw.b))?,
        last_trade: LastTrade::decode(&Value::Array(raw.c))?,
        volume: RollingWindow::decode(&Value::Array(raw.v))?,
        vwap: RollingWindow::decode(&Value::Array(raw.p))?,
        trade_count: RollingCount::decode(&Value::Array(raw.t))?,
        low: RollingWindow::decode(&Value::Array(raw.l))?,
        high: RollingWindow::decode(&Value::Array(raw.h))?,
        open: decimal_field("o", &raw.o)?,
    };
    Ok(ticker)
}

/// Convert the `pair` entry of a `/public/Depth` result; `NotFound` when absent.
/// Levels keep the order the exchange sent them in.
pub fn convert_order_book(pair: &str, payload: Value) -> Result<OrderBook, ExchangeError> {
    let entry = take_entry(payload, pair)?;
    let raw: KrakenSpotOrderBook = serde_json::from_value(entry).map_err(DecodeError::from)?;

    Ok(OrderBook {
        symbol: pair.to_string(),
        bids: convert_price_levels(&raw.bids)?,
        asks: convert_price_levels(&raw.asks)?,
    })
}

/// Convert `[price, volume, timestamp]` levels, failing on the first bad one
pub fn convert_price_levels(raw: &[Value]) -> Result<Vec<PriceLevel>, DecodeError> {
    Ok(decode_all::<KrakenSpotPriceLevel>(raw)?
        .into_iter()
        .map(convert_price_level)
        .collect())
}

/// Convert Kraken spot price level to core `PriceLevel`
pub fn convert_price_level(level: KrakenSpotPriceLevel) -> PriceLevel {
    PriceLevel {
        price: Price::new(level.price),
        quantity: Quantity::new(level.volume),
        timestamp: Some(level.timestamp),
    }
}

/// Convert Kraken spot `/public/Trades` result: `{<pair>: [[...], ...], "last": <cursor>}`.
///
/// One malformed trade fails the whole page.
pub fn convert_trades(pair: &str, payload: Value) -> Result<TradeHistory, ExchangeError> {
    let mut result = into_object(payload)?;

    let last = match result.remove(TRADES_CURSOR_KEY) {
        Some(Value::String(cursor)) => cursor,
        Some(other) => return Err(DecodeError::unexpected(TRADES_CURSOR_KEY, other).into()),
        None => return Err(DecodeError::missing(TRADES_CURSOR_KEY).into()),
    };

    let entries = match result.remove(pair) {
        Some(Value::Array(entries)) => entries,
        Some(other) => return Err(DecodeError::unexpected(pair, other).into()),
        None => return Err(ExchangeError::not_found(pair)),
    };

    let trades = decode_all::<KrakenSpotTradeEntry>(&entries)?
        .into_iter()
        .map(convert_trade)
        .collect();

    Ok(TradeHistory { trades, last })
}

/// Convert Kraken spot trade entry to core `Trade`
pub fn convert_trade(entry: KrakenSpotTradeEntry) -> Trade {
    Trade {
        price: Price::new(entry.price),
        quantity: Quantity::new(entry.volume),
        transact_time: entry.time,
        aggressor_side: entry.side,
        aggressor_order_type: entry.order_type,
        misc: entry.misc,
        trade_id: entry.trade_id,
    }
}

/// Pull the entry for `key` out of a keyed result map
pub fn take_entry(payload: Value, key: &str) -> Result<Value, ExchangeError> {
    into_object(payload)?
        .remove(key)
        .ok_or_else(|| ExchangeError::not_found(key))
}

fn into_object(payload: Value) -> Result<Map<String, Value>, DecodeError> {
    match payload {
        Value::Object(map) => Ok(map),
        other => Err(DecodeError::unexpected("result", other)),
    }
}

fn tuple_list<T: TupleRecord>(value: &Value, field: &str) -> Result<Vec<T>, DecodeError> {
    match value.get(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => decode_all(items),
        Some(other) => Err(DecodeError::unexpected(field, other)),
    }
}

fn decimal_field(field: &str, value: &Value) -> Result<Decimal, DecodeError> {
    let parsed = match value {
        Value::String(s) => parse_decimal(s),
        Value::Number(n) => parse_decimal(&n.to_string()),
        _ => None,
    };
    parsed.ok_or_else(|| DecodeError::unexpected(field, value))
}

use crate::core::errors::{DecodeError, ExchangeError};
use crate::core::kernel::tuple::decode_all;
use crate::core::types::{
    FundingRate, FuturesTrade, OrderBook, Price, PriceLevel, Quantity, TradeSide,
};
use crate::exchanges::kraken_futures::types::{
    FuturesPayload, KrakenFuturesFundingRateEntry, KrakenFuturesHistoryEntry,
    KrakenFuturesInstrument, KrakenFuturesInstrumentStatus, KrakenFuturesOrderBook,
    KrakenFuturesPriceLevel, KrakenFuturesTicker,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Convert the `instruments` list of `/instruments`
pub fn convert_instruments(
    mut payload: FuturesPayload,
) -> Result<Vec<KrakenFuturesInstrument>, DecodeError> {
    field(&mut payload, "instruments")
}

/// Find `symbol` in the instrument list
pub fn find_instrument(
    instruments: Vec<KrakenFuturesInstrument>,
    symbol: &str,
) -> Result<KrakenFuturesInstrument, ExchangeError> {
    instruments
        .into_iter()
        .find(|instrument| instrument.symbol == symbol)
        .ok_or_else(|| ExchangeError::not_found(symbol))
}

/// Convert `/instruments/{symbol}/status`; the payload itself is the status
pub fn convert_instrument_status(
    payload: FuturesPayload,
) -> Result<KrakenFuturesInstrumentStatus, DecodeError> {
    Ok(serde_json::from_value(payload.into_value())?)
}

/// Convert the `ticker` field of `/tickers/{symbol}`
pub fn convert_ticker(mut payload: FuturesPayload) -> Result<KrakenFuturesTicker, DecodeError> {
    field(&mut payload, "ticker")
}

/// Convert every ticker from `/tickers`
pub fn convert_tickers(
    mut payload: FuturesPayload,
) -> Result<Vec<KrakenFuturesTicker>, DecodeError> {
    field(&mut payload, "tickers")
}

/// Convert `/history` entries to core `FuturesTrade`; an unknown side fails the whole list
pub fn convert_trade_history(
    mut payload: FuturesPayload,
) -> Result<Vec<FuturesTrade>, DecodeError> {
    let entries: Vec<KrakenFuturesHistoryEntry> = field(&mut payload, "history")?;
    entries.into_iter().map(convert_trade).collect()
}

/// Convert one history entry to core `FuturesTrade`.
/// Fields the exchange left out stay `None`.
pub fn convert_trade(entry: KrakenFuturesHistoryEntry) -> Result<FuturesTrade, DecodeError> {
    let side = entry.side.as_deref().map(str::parse::<TradeSide>).transpose()?;

    Ok(FuturesTrade {
        trade_id: entry.trade_id,
        time: entry.time,
        price: entry.price.map(Price::new),
        size: entry.size.map(Quantity::new),
        side,
        trade_type: entry.trade_type,
        uid: entry.uid,
    })
}

/// Convert an `orderBook` payload, keeping at most `depth` levels per side when
/// a non-zero depth is given
pub fn convert_order_book(
    symbol: &str,
    mut payload: FuturesPayload,
    depth: Option<u32>,
) -> Result<OrderBook, DecodeError> {
    let raw: KrakenFuturesOrderBook = field(&mut payload, "orderBook")?;

    let mut bids = convert_price_levels(&raw.bids)?;
    let mut asks = convert_price_levels(&raw.asks)?;
    if let Some(depth) = depth.filter(|depth| *depth > 0) {
        bids.truncate(depth as usize);
        asks.truncate(depth as usize);
    }

    Ok(OrderBook {
        symbol: symbol.to_string(),
        bids,
        asks,
    })
}

/// Convert `[price, size]` levels to core `PriceLevel` without timestamps
pub fn convert_price_levels(raw: &[Value]) -> Result<Vec<PriceLevel>, DecodeError> {
    Ok(decode_all::<KrakenFuturesPriceLevel>(raw)?
        .into_iter()
        .map(|level| PriceLevel {
            price: Price::new(level.price),
            quantity: Quantity::new(level.size),
            timestamp: None,
        })
        .collect())
}

/// Convert `/historical-funding-rates` to core `FundingRate`, tagging each with `symbol`
pub fn convert_funding_rates(
    symbol: &str,
    mut payload: FuturesPayload,
) -> Result<Vec<FundingRate>, DecodeError> {
    let entries: Vec<KrakenFuturesFundingRateEntry> = field(&mut payload, "rates")?;
    Ok(entries
        .into_iter()
        .map(|entry| FundingRate {
            symbol: symbol.to_string(),
            timestamp: entry.timestamp,
            funding_rate: entry.funding_rate,
            relative_funding_rate: entry.relative_funding_rate,
        })
        .collect())
}

fn field<T: DeserializeOwned>(payload: &mut FuturesPayload, name: &str) -> Result<T, DecodeError> {
    Ok(serde_json::from_value(payload.take(name)?)?)
}

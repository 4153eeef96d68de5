use crate::core::errors::DecodeError;
use crate::core::kernel::tuple::{
    decimal_number, decimal_string, slot, DecodedTuple, SlotKind, TupleRecord, TupleSchema,
};
use crate::core::types::{OrderKind, TradeSide};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw spot envelope: `{"error": [...], "result": ...}`
#[derive(Debug, Clone, Deserialize)]
pub struct KrakenSpotEnvelope {
    pub error: Option<Vec<String>>,
    pub result: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KrakenSpotServerTime {
    pub unixtime: i64,
    pub rfc1123: String,
}

impl KrakenSpotServerTime {
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.unixtime, 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KrakenSpotSystemState {
    Online,
    Maintenance,
    CancelOnly,
    PostOnly,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KrakenSpotSystemStatus {
    pub status: KrakenSpotSystemState,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KrakenSpotAssetInfo {
    #[serde(rename = "aclass")]
    pub asset_class: String,
    pub altname: String,
    pub decimals: u32,
    pub display_decimals: u32,
    #[serde(default)]
    pub collateral_value: Option<Decimal>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub margin_rate: Option<Decimal>,
}

/// Asset pair metadata. `fees` and `fees_maker` are positional tiers and are
/// filled in by the pair mapper, not by serde.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KrakenSpotAssetPair {
    pub altname: String,
    #[serde(default)]
    pub wsname: Option<String>,
    pub aclass_base: String,
    pub base: String,
    pub aclass_quote: String,
    pub quote: String,
    #[serde(default)]
    pub lot: Option<String>,
    pub cost_decimals: u32,
    pub pair_decimals: u32,
    pub lot_decimals: u32,
    pub lot_multiplier: u32,
    #[serde(default)]
    pub leverage_buy: Vec<u32>,
    #[serde(default)]
    pub leverage_sell: Vec<u32>,
    #[serde(skip_deserializing)]
    pub fees: Vec<FeeTier>,
    #[serde(skip_deserializing)]
    pub fees_maker: Vec<FeeTier>,
    #[serde(default)]
    pub fee_volume_currency: Option<String>,
    #[serde(default)]
    pub margin_call: Option<u32>,
    #[serde(default)]
    pub margin_stop: Option<u32>,
    #[serde(default)]
    pub ordermin: Option<Decimal>,
    #[serde(default)]
    pub costmin: Option<Decimal>,
    #[serde(default)]
    pub tick_size: Option<Decimal>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub long_position_limit: Option<i64>,
    #[serde(default)]
    pub short_position_limit: Option<i64>,
}

/// `[<volume>, <percent fee>]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeTier {
    pub volume: Decimal,
    pub percent_fee: Decimal,
}

pub static FEE_TIER: TupleSchema = TupleSchema::new(
    "fee tier",
    &[
        slot("volume", SlotKind::Decimal),
        slot("percent_fee", SlotKind::Decimal),
    ],
);

impl TupleRecord for FeeTier {
    const SCHEMA: &'static TupleSchema = &FEE_TIER;

    fn from_tuple(tuple: &DecodedTuple) -> Result<Self, DecodeError> {
        Ok(Self {
            volume: tuple.decimal(0)?,
            percent_fee: tuple.decimal(1)?,
        })
    }

    fn to_tuple(&self) -> Vec<Value> {
        vec![decimal_number(self.volume), decimal_number(self.percent_fee)]
    }
}

/// Raw ticker entry; every field is positional
#[derive(Debug, Clone, Deserialize)]
pub struct KrakenSpotTickerInfo {
    pub a: Vec<Value>,
    pub b: Vec<Value>,
    pub c: Vec<Value>,
    pub v: Vec<Value>,
    pub p: Vec<Value>,
    pub t: Vec<Value>,
    pub l: Vec<Value>,
    pub h: Vec<Value>,
    pub o: Value,
}

/// `[<price>, <whole lot volume>, <lot volume>]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookTop {
    pub price: Decimal,
    pub whole_lot_volume: Decimal,
    pub lot_volume: Decimal,
}

pub static BOOK_TOP: TupleSchema = TupleSchema::new(
    "ticker book top",
    &[
        slot("price", SlotKind::DecimalString),
        slot("whole_lot_volume", SlotKind::DecimalString),
        slot("lot_volume", SlotKind::DecimalString),
    ],
);

impl TupleRecord for BookTop {
    const SCHEMA: &'static TupleSchema = &BOOK_TOP;

    fn from_tuple(tuple: &DecodedTuple) -> Result<Self, DecodeError> {
        Ok(Self {
            price: tuple.decimal(0)?,
            whole_lot_volume: tuple.decimal(1)?,
            lot_volume: tuple.decimal(2)?,
        })
    }

    fn to_tuple(&self) -> Vec<Value> {
        vec![
            decimal_string(self.price),
            decimal_string(self.whole_lot_volume),
            decimal_string(self.lot_volume),
        ]
    }
}

/// `[<price>, <lot volume>]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastTrade {
    pub price: Decimal,
    pub lot_volume: Decimal,
}

pub static LAST_TRADE: TupleSchema = TupleSchema::new(
    "ticker last trade",
    &[
        slot("price", SlotKind::DecimalString),
        slot("lot_volume", SlotKind::DecimalString),
    ],
);

impl TupleRecord for LastTrade {
    const SCHEMA: &'static TupleSchema = &LAST_TRADE;

    fn from_tuple(tuple: &DecodedTuple) -> Result<Self, DecodeError> {
        Ok(Self {
            price: tuple.decimal(0)?,
            lot_volume: tuple.decimal(1)?,
        })
    }

    fn to_tuple(&self) -> Vec<Value> {
        vec![decimal_string(self.price), decimal_string(self.lot_volume)]
    }
}

/// `[<today>, <last 24 hours>]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollingWindow {
    pub today: Decimal,
    pub last_24h: Decimal,
}

pub static ROLLING_WINDOW: TupleSchema = TupleSchema::new(
    "ticker rolling window",
    &[
        slot("today", SlotKind::DecimalString),
        slot("last_24h", SlotKind::DecimalString),
    ],
);

impl TupleRecord for RollingWindow {
    const SCHEMA: &'static TupleSchema = &ROLLING_WINDOW;

    fn from_tuple(tuple: &DecodedTuple) -> Result<Self, DecodeError> {
        Ok(Self {
            today: tuple.decimal(0)?,
            last_24h: tuple.decimal(1)?,
        })
    }

    fn to_tuple(&self) -> Vec<Value> {
        vec![decimal_string(self.today), decimal_string(self.last_24h)]
    }
}

/// Trade counts, `[<today>, <last 24 hours>]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollingCount {
    pub today: i64,
    pub last_24h: i64,
}

pub static ROLLING_COUNT: TupleSchema = TupleSchema::new(
    "ticker trade count",
    &[
        slot("today", SlotKind::Integer),
        slot("last_24h", SlotKind::Integer),
    ],
);

impl TupleRecord for RollingCount {
    const SCHEMA: &'static TupleSchema = &ROLLING_COUNT;

    fn from_tuple(tuple: &DecodedTuple) -> Result<Self, DecodeError> {
        Ok(Self {
            today: tuple.integer(0)?,
            last_24h: tuple.integer(1)?,
        })
    }

    fn to_tuple(&self) -> Vec<Value> {
        vec![Value::from(self.today), Value::from(self.last_24h)]
    }
}

/// Decoded spot ticker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotTicker {
    pub pair: String,
    pub ask: BookTop,
    pub bid: BookTop,
    pub last_trade: LastTrade,
    pub volume: RollingWindow,
    pub vwap: RollingWindow,
    pub trade_count: RollingCount,
    pub low: RollingWindow,
    pub high: RollingWindow,
    pub open: Decimal,
}

/// Raw order book entry for one pair
#[derive(Debug, Clone, Deserialize)]
pub struct KrakenSpotOrderBook {
    pub asks: Vec<Value>,
    pub bids: Vec<Value>,
}

/// `[<price>, <volume>, <timestamp>]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KrakenSpotPriceLevel {
    pub price: Decimal,
    pub volume: Decimal,
    pub timestamp: Decimal,
}

pub static SPOT_PRICE_LEVEL: TupleSchema = TupleSchema::new(
    "spot price level",
    &[
        slot("price", SlotKind::Decimal),
        slot("volume", SlotKind::Decimal),
        slot("timestamp", SlotKind::Number),
    ],
);

impl TupleRecord for KrakenSpotPriceLevel {
    const SCHEMA: &'static TupleSchema = &SPOT_PRICE_LEVEL;

    fn from_tuple(tuple: &DecodedTuple) -> Result<Self, DecodeError> {
        Ok(Self {
            price: tuple.decimal(0)?,
            volume: tuple.decimal(1)?,
            timestamp: tuple.decimal(2)?,
        })
    }

    fn to_tuple(&self) -> Vec<Value> {
        vec![
            decimal_string(self.price),
            decimal_string(self.volume),
            decimal_number(self.timestamp),
        ]
    }
}

/// `[<price>, <volume>, <time>, <buy/sell>, <market/limit>, <miscellaneous>, <trade_id>]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KrakenSpotTradeEntry {
    pub price: Decimal,
    pub volume: Decimal,
    pub time: Decimal,
    pub side: TradeSide,
    pub order_type: OrderKind,
    pub misc: String,
    pub trade_id: i64,
}

pub static SPOT_TRADE: TupleSchema = TupleSchema::new(
    "spot trade",
    &[
        slot("price", SlotKind::DecimalString),
        slot("volume", SlotKind::DecimalString),
        slot("time", SlotKind::Number),
        slot("side", SlotKind::OneOf(&["b", "s"])),
        slot("order_type", SlotKind::OneOf(&["m", "l"])),
        slot("misc", SlotKind::Text),
        slot("trade_id", SlotKind::Integer),
    ],
);

impl TupleRecord for KrakenSpotTradeEntry {
    const SCHEMA: &'static TupleSchema = &SPOT_TRADE;

    fn from_tuple(tuple: &DecodedTuple) -> Result<Self, DecodeError> {
        Ok(Self {
            price: tuple.decimal(0)?,
            volume: tuple.decimal(1)?,
            time: tuple.decimal(2)?,
            side: tuple.text(3)?.parse()?,
            order_type: tuple.text(4)?.parse()?,
            misc: tuple.text(5)?.to_string(),
            trade_id: tuple.integer(6)?,
        })
    }

    fn to_tuple(&self) -> Vec<Value> {
        vec![
            decimal_string(self.price),
            decimal_string(self.volume),
            decimal_number(self.time),
            Value::from(self.side.code()),
            Value::from(self.order_type.code()),
            Value::from(self.misc.clone()),
            Value::from(self.trade_id),
        ]
    }
}

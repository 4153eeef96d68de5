use crate::core::errors::DecodeError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe price representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::str")] pub Decimal);

impl Price {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type-safe quantity representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(#[serde(with = "rust_decimal::serde::str")] pub Decimal);

impl Quantity {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Aggressor side of a trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    /// Single-letter form used in spot trade tuples
    pub const fn code(self) -> &'static str {
        match self {
            Self::Buy => "b",
            Self::Sell => "s",
        }
    }
}

impl FromStr for TradeSide {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "b" | "buy" => Ok(Self::Buy),
            "s" | "sell" => Ok(Self::Sell),
            other => Err(DecodeError::unexpected("side", other)),
        }
    }
}

/// Order type of the aggressing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
    Market,
    Limit,
}

impl OrderKind {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Market => "m",
            Self::Limit => "l",
        }
    }
}

impl FromStr for OrderKind {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "m" | "market" => Ok(Self::Market),
            "l" | "limit" => Ok(Self::Limit),
            other => Err(DecodeError::unexpected("order type", other)),
        }
    }
}

/// One level of an order book.
///
/// `timestamp` is only reported by the spot product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevel {
    pub price: Price,
    pub quantity: Quantity,
    pub timestamp: Option<Decimal>,
}

/// Order book snapshot. Level order is whatever the exchange sent: bids
/// descending and asks ascending by price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBook {
    pub symbol: String,
    pub bids: Vec<PriceLevel>,
    pub asks: Vec<PriceLevel>,
}

impl OrderBook {
    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bids.first()
    }

    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.first()
    }
}

/// Spot public trade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub price: Price,
    pub quantity: Quantity,
    /// Seconds since the epoch, with sub-second precision
    pub transact_time: Decimal,
    pub aggressor_side: TradeSide,
    pub aggressor_order_type: OrderKind,
    pub misc: String,
    pub trade_id: i64,
}

/// A page of spot trades plus the cursor for the next page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeHistory {
    pub trades: Vec<Trade>,
    /// Opaque cursor; pass it back unchanged as `since` to continue paging
    pub last: String,
}

/// Futures public trade (fill or liquidation)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuturesTrade {
    pub trade_id: Option<i64>,
    pub time: DateTime<Utc>,
    pub price: Option<Price>,
    pub size: Option<Quantity>,
    pub side: Option<TradeSide>,
    pub trade_type: Option<String>,
    pub uid: Option<String>,
}

/// Historical funding rate of a perpetual contract.
///
/// Absent rates stay `None`; a reported rate of zero is `Some(0)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingRate {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub funding_rate: Option<Decimal>,
    pub relative_funding_rate: Option<Decimal>,
}

//! Venue data types: positions, price books, orders and acknowledgements.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Signed holdings per instrument id (positive = long, negative = short).
pub type Positions = HashMap<String, i64>;

/// Order side (buy or sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// Signed position change for `volume` units traded on this side.
    pub fn signed(&self, volume: u32) -> i64 {
        match self {
            OrderSide::Buy => i64::from(volume),
            OrderSide::Sell => -i64::from(volume),
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "BUY"),
            OrderSide::Sell => write!(f, "SELL"),
        }
    }
}

/// Order type. Hedges only ever go out as immediate-or-cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Ioc, // Immediate or Cancel
}

/// Order status as reported back by the venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Filled,
    PartiallyFilled,
    /// Nothing traded; the whole IOC quantity was cancelled
    Cancelled,
}

/// One price level in a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevel {
    pub price: Decimal,
    pub volume: u32,
}

impl PriceLevel {
    pub fn new(price: Decimal, volume: u32) -> Self {
        Self { price, volume }
    }
}

/// Snapshot of the resting orders for an instrument, best level first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBook {
    pub instrument_id: String,
    /// Highest bid first
    pub bids: Vec<PriceLevel>,
    /// Lowest ask first
    pub asks: Vec<PriceLevel>,
}

impl PriceBook {
    pub fn new(instrument_id: impl Into<String>, bids: Vec<PriceLevel>, asks: Vec<PriceLevel>) -> Self {
        Self {
            instrument_id: instrument_id.into(),
            bids,
            asks,
        }
    }

    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bids.first()
    }

    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.first()
    }
}

/// A stock order built by the dispatcher for one cycle. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HedgeOrder {
    pub instrument_id: String,
    pub side: OrderSide,
    pub volume: u32,
    pub price: Decimal,
    pub order_type: OrderType,
}

/// Venue acknowledgement for an inserted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderAck {
    pub order_id: u64,
    pub status: OrderStatus,
    pub filled_volume: u32,
}

//! Hedge sizing: from net delta to a stock trade.

use crate::error::DataError;
use crate::exchange::OrderSide;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Rule for turning `-net_delta` into a whole number of shares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// 2.5 -> 3, -2.5 -> -3
    #[default]
    HalfAwayFromZero,
    /// 2.5 -> 2, 3.5 -> 4 (banker's rounding)
    HalfEven,
}

impl RoundingMode {
    pub fn round(&self, value: f64) -> f64 {
        match self {
            RoundingMode::HalfAwayFromZero => value.round(),
            RoundingMode::HalfEven => value.round_ties_even(),
        }
    }
}

/// What the sizer wants done with the stock this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum HedgeDecision {
    /// Stock position already equals the target
    NoTrade { target: i64 },
    Trade {
        side: OrderSide,
        volume: u32,
        target: i64,
    },
}

impl HedgeDecision {
    pub fn target(&self) -> i64 {
        match self {
            HedgeDecision::NoTrade { target } | HedgeDecision::Trade { target, .. } => *target,
        }
    }

    pub fn volume(&self) -> u32 {
        match self {
            HedgeDecision::NoTrade { .. } => 0,
            HedgeDecision::Trade { volume, .. } => *volume,
        }
    }
}

/// Converts a delta imbalance into a signed stock trade.
#[derive(Debug, Clone, Copy, Default)]
pub struct HedgeSizer {
    rounding: RoundingMode,
}

impl HedgeSizer {
    pub fn new(rounding: RoundingMode) -> Self {
        Self { rounding }
    }

    /// Size the hedge for `net_delta` against the current `stock_position`.
    ///
    /// The target stock position is `round(-net_delta)`; the trade is the
    /// difference between target and current position.
    pub fn size(&self, net_delta: f64, stock_position: i64) -> Result<HedgeDecision, DataError> {
        if !net_delta.is_finite() {
            return Err(DataError::InvalidNetDelta(net_delta));
        }

        let target = self.rounding.round(-net_delta);
        if target.abs() >= i64::MAX as f64 {
            return Err(DataError::InvalidNetDelta(net_delta));
        }
        let target = target as i64;

        let diff = target
            .checked_sub(stock_position)
            .ok_or(DataError::InvalidNetDelta(net_delta))?;
        let volume = u32::try_from(diff.unsigned_abs())
            .map_err(|_| DataError::InvalidNetDelta(net_delta))?;

        let decision = match diff {
            0 => HedgeDecision::NoTrade { target },
            d if d > 0 => HedgeDecision::Trade {
                side: OrderSide::Buy,
                volume,
                target,
            },
            _ => HedgeDecision::Trade {
                side: OrderSide::Sell,
                volume,
                target,
            },
        };

        debug!(
            net_delta,
            stock_position,
            target,
            decision = ?decision,
            "Hedge sized"
        );

        Ok(decision)
    }
}

//! The venue interface consumed by the hedging core.
//!
//! Everything the engine knows about the outside world goes through
//! [`Venue`]: one positions snapshot and one price book per cycle, plus
//! order insertion and the position-limit rule.

use super::types::{HedgeOrder, OrderAck, OrderSide, Positions, PriceBook};
use crate::error::VenueError;
use async_trait::async_trait;

/// Trading venue as seen by the hedger.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Venue: Send + Sync {
    /// Current signed holdings for every instrument the account has traded.
    async fn get_positions(&self) -> Result<Positions, VenueError>;

    /// Latest order book snapshot for an instrument.
    async fn get_last_price_book(&self, instrument_id: &str) -> Result<PriceBook, VenueError>;

    /// Insert an order. Fire-and-forget: the ack is final, there is no
    /// follow-up confirmation.
    async fn insert_order(&self, order: &HedgeOrder) -> Result<OrderAck, VenueError>;

    /// Hard cap on the absolute net position per instrument.
    fn position_limit(&self) -> i64;

    /// Whether trading `volume` on `side` from `current_position` would leave
    /// `|position|` above the limit.
    ///
    /// `current_position` comes from the cycle's positions snapshot; the
    /// default does not read positions again.
    async fn would_breach_position_limit(
        &self,
        _instrument_id: &str,
        current_position: i64,
        volume: u32,
        side: OrderSide,
    ) -> Result<bool, VenueError> {
        Ok(breaches_limit(
            current_position,
            volume,
            side,
            self.position_limit(),
        ))
    }
}

/// `|current + signed(volume)| > limit`, saturating at the `i64` bounds.
pub fn breaches_limit(current: i64, volume: u32, side: OrderSide, limit: i64) -> bool {
    projected_position(current, volume, side).unsigned_abs() > limit.unsigned_abs()
}

/// Position after trading `volume` on `side`, saturating at the `i64` bounds.
pub fn projected_position(current: i64, volume: u32, side: OrderSide) -> i64 {
    current.saturating_add(side.signed(volume))
}

//! Position-limit-aware order dispatch.

use crate::error::VenueError;
use crate::exchange::{projected_position, HedgeOrder, OrderAck, OrderSide, OrderType, Venue};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

/// What happened to the proposed hedge trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// Nothing to trade
    Skipped,
    /// The trade would push the position past the limit; nothing was sent
    Suppressed {
        side: OrderSide,
        volume: u32,
        projected_position: i64,
    },
    /// Order sent; the ack is final for this cycle
    Submitted { order: HedgeOrder, ack: OrderAck },
}

/// Sends hedge orders as aggressive IOC limits, all-or-nothing against the
/// position limit.
///
/// Sells go out at `sell_price` and buys at `buy_price`, both far enough
/// through the book to take whatever liquidity is resting. The prices are not
/// protective: they assume the real touch sits somewhere between them.
#[derive(Debug, Clone)]
pub struct OrderDispatcher {
    sell_price: Decimal,
    buy_price: Decimal,
}

impl OrderDispatcher {
    pub fn new(sell_price: Decimal, buy_price: Decimal) -> Self {
        Self {
            sell_price,
            buy_price,
        }
    }

    fn aggressive_price(&self, side: OrderSide) -> Decimal {
        match side {
            OrderSide::Sell => self.sell_price,
            OrderSide::Buy => self.buy_price,
        }
    }

    /// Check the limit and, if clear, submit one IOC order.
    ///
    /// `current_position` is the cycle's snapshot; the limit is judged against
    /// it and positions are not read again. Rejections are returned as errors
    /// and never retried.
    pub async fn dispatch<V: Venue + ?Sized>(
        &self,
        venue: &V,
        instrument_id: &str,
        side: OrderSide,
        volume: u32,
        current_position: i64,
    ) -> Result<DispatchOutcome, VenueError> {
        if volume == 0 {
            return Ok(DispatchOutcome::Skipped);
        }

        if venue
            .would_breach_position_limit(instrument_id, current_position, volume, side)
            .await?
        {
            let projected_position = projected_position(current_position, volume, side);
            warn!(
                instrument = %instrument_id,
                %side,
                volume,
                projected_position,
                limit = venue.position_limit(),
                "Hedge suppressed: trade would breach position limit"
            );
            return Ok(DispatchOutcome::Suppressed {
                side,
                volume,
                projected_position,
            });
        }

        let order = HedgeOrder {
            instrument_id: instrument_id.to_string(),
            side,
            volume,
            price: self.aggressive_price(side),
            order_type: OrderType::Ioc,
        };

        info!(
            instrument = %instrument_id,
            %side,
            volume,
            price = %order.price,
            "Submitting hedge order"
        );

        let ack = venue.insert_order(&order).await?;

        info!(
            order_id = ack.order_id,
            status = ?ack.status,
            filled = ack.filled_volume,
            "Hedge order acknowledged"
        );

        Ok(DispatchOutcome::Submitted { order, ack })
    }
}

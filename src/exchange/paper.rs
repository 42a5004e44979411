//! In-memory venue for paper trading and tests.

use super::traits::Venue;
use super::types::*;
use crate::config::Config;
use crate::error::VenueError;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct PaperVenueState {
    positions: Positions,
    books: HashMap<String, PriceBook>,
    /// Every order that reached `insert_order`, in arrival order
    orders: Vec<HedgeOrder>,
    /// Reason to reject the next inserted order with
    reject_next: Option<String>,
}

/// Paper venue that matches IOC orders against its stored books.
///
/// Fills consume book liquidity and move positions; the unfilled remainder of
/// an order is cancelled, as on a real venue.
pub struct PaperVenue {
    state: RwLock<PaperVenueState>,
    order_id_counter: AtomicU64,
    position_limit: i64,
}

impl PaperVenue {
    /// Create an empty venue with the given per-instrument position limit.
    pub fn new(position_limit: i64) -> Self {
        Self {
            state: RwLock::new(PaperVenueState::default()),
            order_id_counter: AtomicU64::new(1),
            position_limit,
        }
    }

    /// Seed holdings for an instrument.
    pub async fn set_position(&self, instrument_id: &str, quantity: i64) {
        self.state
            .write()
            .await
            .positions
            .insert(instrument_id.to_string(), quantity);
    }

    /// Replace the book for an instrument.
    pub async fn set_book(&self, book: PriceBook) {
        self.state
            .write()
            .await
            .books
            .insert(book.instrument_id.clone(), book);
    }

    /// Reject the next inserted order with `reason`.
    pub async fn reject_next_order(&self, reason: impl Into<String>) {
        self.state.write().await.reject_next = Some(reason.into());
    }

    /// Orders received so far.
    pub async fn orders(&self) -> Vec<HedgeOrder> {
        self.state.read().await.orders.clone()
    }

    pub async fn position(&self, instrument_id: &str) -> i64 {
        self.state
            .read()
            .await
            .positions
            .get(instrument_id)
            .copied()
            .unwrap_or(0)
    }

    /// Venue seeded with the configured holdings and stock book.
    pub async fn from_config(config: &Config) -> Self {
        let venue = Self::new(config.hedge.position_limit);
        for entry in &config.paper.positions {
            venue.set_position(&entry.id, entry.quantity).await;
        }
        venue
            .set_book(PriceBook::new(
                config.hedge.stock_id.clone(),
                config.paper.bids.clone(),
                config.paper.asks.clone(),
            ))
            .await;
        venue
    }

    fn next_order_id(&self) -> u64 {
        self.order_id_counter.fetch_add(1, Ordering::SeqCst)
    }
}

/// Take up to `volume` from `levels` at prices acceptable to `crosses`.
fn sweep(levels: &mut Vec<PriceLevel>, volume: u32, crosses: impl Fn(Decimal) -> bool) -> u32 {
    let mut filled = 0;
    for level in levels.iter_mut() {
        if filled == volume || !crosses(level.price) {
            break;
        }
        let take = level.volume.min(volume - filled);
        level.volume -= take;
        filled += take;
    }
    levels.retain(|level| level.volume > 0);
    filled
}

#[async_trait]
impl Venue for PaperVenue {
    async fn get_positions(&self) -> Result<Positions, VenueError> {
        Ok(self.state.read().await.positions.clone())
    }

    async fn get_last_price_book(&self, instrument_id: &str) -> Result<PriceBook, VenueError> {
        let state = self.state.read().await;
        Ok(state
            .books
            .get(instrument_id)
            .cloned()
            .unwrap_or_else(|| PriceBook::new(instrument_id, Vec::new(), Vec::new())))
    }

    async fn insert_order(&self, order: &HedgeOrder) -> Result<OrderAck, VenueError> {
        let mut state = self.state.write().await;
        state.orders.push(order.clone());

        if let Some(reason) = state.reject_next.take() {
            warn!(instrument = %order.instrument_id, %reason, "Paper order rejected");
            return Err(VenueError::Rejected {
                instrument_id: order.instrument_id.clone(),
                reason,
            });
        }

        let limit_price = order.price;
        let book = state
            .books
            .entry(order.instrument_id.clone())
            .or_insert_with(|| PriceBook::new(order.instrument_id.clone(), Vec::new(), Vec::new()));

        let filled = match order.side {
            OrderSide::Buy => sweep(&mut book.asks, order.volume, |ask| ask <= limit_price),
            OrderSide::Sell => sweep(&mut book.bids, order.volume, |bid| bid >= limit_price),
        };

        *state
            .positions
            .entry(order.instrument_id.clone())
            .or_insert(0) += order.side.signed(filled);

        let status = if filled == order.volume {
            OrderStatus::Filled
        } else if filled > 0 {
            OrderStatus::PartiallyFilled
        } else {
            OrderStatus::Cancelled
        };

        let order_id = self.next_order_id();

        info!(
            order_id,
            instrument = %order.instrument_id,
            side = %order.side,
            volume = order.volume,
            filled,
            price = %order.price,
            status = ?status,
            "Paper IOC order executed"
        );

        if filled < order.volume {
            debug!(
                order_id,
                cancelled = order.volume - filled,
                "Unfilled IOC remainder cancelled"
            );
        }

        Ok(OrderAck {
            order_id,
            status,
            filled_volume: filled,
        })
    }

    fn position_limit(&self) -> i64 {
        self.position_limit
    }
}

//! One hedging cycle: aggregate, size, dispatch.

use super::aggregator::DeltaAggregator;
use super::dispatcher::{DispatchOutcome, OrderDispatcher};
use super::sizer::{HedgeDecision, HedgeSizer};
use crate::config::Config;
use crate::error::HedgeError;
use crate::exchange::Venue;
use crate::pricing::{DeltaModel, OptionContract};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, instrument, warn};

/// Everything one cycle saw and decided.
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    pub stock_id: String,
    pub underlying_price: f64,
    pub net_delta: f64,
    pub stock_position: i64,
    pub best_bid: Option<Decimal>,
    pub best_ask: Option<Decimal>,
    pub decision: HedgeDecision,
    pub outcome: DispatchOutcome,
}

/// Stateless delta hedger for one stock and the options written on it.
///
/// The venue and delta model are injected; nothing is carried between cycles.
pub struct HedgeEngine<V, M> {
    venue: V,
    stock_id: String,
    options: Vec<OptionContract>,
    aggregator: DeltaAggregator<M>,
    sizer: HedgeSizer,
    dispatcher: OrderDispatcher,
}

impl<V: Venue, M: DeltaModel> HedgeEngine<V, M> {
    /// Build an engine from configuration.
    pub fn new(config: &Config, venue: V, model: M) -> Self {
        Self {
            venue,
            stock_id: config.hedge.stock_id.clone(),
            options: config.options.clone(),
            aggregator: DeltaAggregator::new(
                model,
                config.pricing.risk_free_rate,
                config.pricing.volatility,
            ),
            sizer: HedgeSizer::new(config.hedge.rounding),
            dispatcher: OrderDispatcher::new(config.hedge.sell_price, config.hedge.buy_price),
        }
    }

    pub fn venue(&self) -> &V {
        &self.venue
    }

    /// Run one cycle against a single positions snapshot and price book.
    #[instrument(skip(self), fields(stock = %self.stock_id))]
    pub async fn run_cycle(&self, underlying_price: f64) -> Result<CycleReport, HedgeError> {
        let positions = self.venue.get_positions().await?;
        let book = self.venue.get_last_price_book(&self.stock_id).await?;

        let best_bid = book.best_bid().map(|level| level.price);
        let best_ask = book.best_ask().map(|level| level.price);
        if best_bid.is_none() || best_ask.is_none() {
            warn!(
                has_bid = best_bid.is_some(),
                has_ask = best_ask.is_some(),
                "Stock book is one-sided or empty; IOC hedge may not fill"
            );
        }

        let net_delta = self
            .aggregator
            .net_delta(&self.options, &positions, underlying_price)?;
        let stock_position = positions.get(&self.stock_id).copied().unwrap_or(0);

        info!(
            net_delta,
            stock_position,
            residual = net_delta + stock_position as f64,
            best_bid = ?best_bid,
            best_ask = ?best_ask,
            "Delta position"
        );

        let decision = self.sizer.size(net_delta, stock_position)?;

        let outcome = match decision {
            HedgeDecision::NoTrade { .. } => {
                debug!("Already delta neutral");
                DispatchOutcome::Skipped
            }
            HedgeDecision::Trade { side, volume, .. } => {
                self.dispatcher
                    .dispatch(&self.venue, &self.stock_id, side, volume, stock_position)
                    .await?
            }
        };

        Ok(CycleReport {
            stock_id: self.stock_id.clone(),
            underlying_price,
            net_delta,
            stock_position,
            best_bid,
            best_ask,
            decision,
            outcome,
        })
    }

    /// Run cycles every `interval` until `shutdown` is set.
    ///
    /// Cycles never overlap. A failed cycle is logged and the next tick runs
    /// from fresh snapshots. `price_source` returning `None` skips the tick.
    pub async fn run<F>(&self, mut price_source: F, interval: Duration, shutdown: Arc<AtomicBool>)
    where
        F: FnMut() -> Option<f64>,
    {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut cycle: u64 = 0;
        while !shutdown.load(Ordering::SeqCst) {
            ticker.tick().await;
            if shutdown.load(Ordering::SeqCst) {
                break;
            }
            cycle += 1;

            let Some(price) = price_source() else {
                warn!(cycle, "No underlying price available, skipping cycle");
                continue;
            };

            match self.run_cycle(price).await {
                Ok(report) => debug!(cycle, outcome = ?report.outcome, "Cycle complete"),
                Err(e) => error!(cycle, error = %e, "Hedge cycle aborted"),
            }
        }

        info!(cycles = cycle, "Hedge loop stopped");
    }
}

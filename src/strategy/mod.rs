//! Delta hedging logic.
//!
//! Contains the core of the hedger:
//! - Net delta aggregation across the option book
//! - Hedge sizing from delta imbalance to a stock trade
//! - Limit-checked IOC order dispatch
//! - The per-cycle engine tying them together

mod aggregator;
mod dispatcher;
mod engine;
mod sizer;

pub use aggregator::DeltaAggregator;
pub use dispatcher::{DispatchOutcome, OrderDispatcher};
pub use engine::{CycleReport, HedgeEngine};
pub use sizer::{HedgeDecision, HedgeSizer, RoundingMode};

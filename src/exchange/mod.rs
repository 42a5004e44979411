//! Trading venue integration.
//!
//! Provides:
//! - Venue data types (positions, price books, IOC orders)
//! - The [`Venue`] trait the hedging core is written against
//! - An in-memory [`PaperVenue`] for paper trading and tests

pub mod paper;
mod traits;
mod types;

pub use paper::PaperVenue;
#[cfg(test)]
pub use traits::MockVenue;
pub use traits::{breaches_limit, projected_position, Venue};
pub use types::*;

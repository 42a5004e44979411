//! Error taxonomy for a hedging cycle.
//!
//! Both error kinds stop the current cycle. A position-limit breach is not an
//! error: it is reported as [`crate::strategy::DispatchOutcome::Suppressed`].

use thiserror::Error;

/// Missing or malformed input data. Not retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("no position record for option {option_id}")]
    MissingPosition { option_id: String },

    #[error("invalid contract {option_id}: {reason}")]
    InvalidContract { option_id: String, reason: String },

    #[error("net delta {0} cannot be sized into a stock trade")]
    InvalidNetDelta(f64),
}

/// Failure talking to the trading venue. Fatal for the cycle, never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VenueError {
    #[error("order for {instrument_id} rejected: {reason}")]
    Rejected {
        instrument_id: String,
        reason: String,
    },

    #[error("venue transport error: {0}")]
    Transport(String),
}

/// Any error that aborts a hedging cycle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HedgeError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Venue(#[from] VenueError),
}

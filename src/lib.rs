//! # Delta Hedger
//!
//! Keeps a book of options on a single stock delta-neutral by trading the
//! stock itself.
//!
//! ## Architecture
//!
//! - `config`: Configuration management and validation
//! - `pricing`: Option reference data and delta models (Black-Scholes)
//! - `exchange`: Venue interface, data types and a paper venue
//! - `strategy`: Delta aggregation, hedge sizing and order dispatch
//! - `error`: Data and venue error types

pub mod config;
pub mod error;
pub mod exchange;
pub mod pricing;
pub mod strategy;

pub use config::Config;
pub use error::{DataError, HedgeError, VenueError};
pub use strategy::{CycleReport, HedgeEngine};

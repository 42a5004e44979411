//! Option reference data and delta models.
//!
//! The hedging core only needs one number per option: its delta. That number
//! comes from a [`DeltaModel`], so the engine can run against Black-Scholes in
//! production and against fixed deltas in tests.

mod black_scholes;

pub use black_scholes::BlackScholes;

use crate::error::DataError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    Call,
    Put,
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKind::Call => write!(f, "call"),
            OptionKind::Put => write!(f, "put"),
        }
    }
}

/// An option on the hedged stock. Immutable reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    /// Venue instrument id (e.g., "NVDA_202612_100C")
    pub id: String,
    pub expiry: DateTime<Utc>,
    pub strike: f64,
    pub kind: OptionKind,
}

impl OptionContract {
    pub fn new(id: impl Into<String>, expiry: DateTime<Utc>, strike: f64, kind: OptionKind) -> Self {
        Self {
            id: id.into(),
            expiry,
            strike,
            kind,
        }
    }
}

/// Per-unit option delta as a function of market inputs.
///
/// Implementations return a value in `[0, 1]` for calls and `[-1, 0]` for
/// puts, or [`DataError::InvalidContract`] when the inputs cannot be priced.
pub trait DeltaModel: Send + Sync {
    fn delta(
        &self,
        contract: &OptionContract,
        underlying_price: f64,
        risk_free_rate: f64,
        volatility: f64,
    ) -> Result<f64, DataError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_contract_deserializes_from_config_shape() {
        let json = r#"{"id":"NVDA_P_90","expiry":"2027-03-19T21:00:00Z","strike":90.0,"kind":"put"}"#;
        let contract: OptionContract = serde_json::from_str(json).unwrap();

        assert_eq!(contract.kind, OptionKind::Put);
        assert_eq!(
            contract.expiry,
            Utc.with_ymd_and_hms(2027, 3, 19, 21, 0, 0).unwrap()
        );
    }
}

//! European Black-Scholes delta (no dividends).

use super::{DeltaModel, OptionContract, OptionKind};
use crate::error::DataError;
use chrono::{DateTime, Utc};

const SECONDS_PER_YEAR: f64 = 365.0 * 24.0 * 60.0 * 60.0;

/// Black-Scholes delta model.
///
/// Time to expiry is measured ACT/365 from the valuation time, which is the
/// wall clock unless pinned with [`BlackScholes::at`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BlackScholes {
    valuation_time: Option<DateTime<Utc>>,
}

impl BlackScholes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Price as of a fixed instant instead of `Utc::now()`.
    pub fn at(valuation_time: DateTime<Utc>) -> Self {
        Self {
            valuation_time: Some(valuation_time),
        }
    }

    fn years_to_expiry(&self, expiry: DateTime<Utc>) -> f64 {
        let now = self.valuation_time.unwrap_or_else(Utc::now);
        (expiry - now).num_seconds() as f64 / SECONDS_PER_YEAR
    }
}

impl DeltaModel for BlackScholes {
    fn delta(
        &self,
        contract: &OptionContract,
        underlying_price: f64,
        risk_free_rate: f64,
        volatility: f64,
    ) -> Result<f64, DataError> {
        let invalid = |reason: String| DataError::InvalidContract {
            option_id: contract.id.clone(),
            reason,
        };

        if !contract.strike.is_finite() || contract.strike <= 0.0 {
            return Err(invalid(format!("strike must be positive, got {}", contract.strike)));
        }
        if !underlying_price.is_finite() || underlying_price <= 0.0 {
            return Err(invalid(format!(
                "underlying price must be positive, got {underlying_price}"
            )));
        }
        if !volatility.is_finite() || volatility <= 0.0 {
            return Err(invalid(format!("volatility must be positive, got {volatility}")));
        }
        if !risk_free_rate.is_finite() {
            return Err(invalid(format!("risk-free rate is not finite: {risk_free_rate}")));
        }

        let t = self.years_to_expiry(contract.expiry);
        if t <= 0.0 {
            return Err(invalid(format!("expired at {}", contract.expiry)));
        }

        let d1 = ((underlying_price / contract.strike).ln()
            + (risk_free_rate + 0.5 * volatility * volatility) * t)
            / (volatility * t.sqrt());

        Ok(match contract.kind {
            OptionKind::Call => normal_cdf(d1),
            OptionKind::Put => normal_cdf(d1) - 1.0,
        })
    }
}

/// Standard normal CDF: Phi(x) = 0.5 * (1 + erf(x / sqrt(2)))
fn normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + libm::erf(x / std::f64::consts::SQRT_2))
}

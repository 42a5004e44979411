//! Net delta of the option book.

use crate::error::DataError;
use crate::exchange::Positions;
use crate::pricing::{DeltaModel, OptionContract};
use tracing::debug;

/// Sums `delta × quantity` across every option in the book.
pub struct DeltaAggregator<M> {
    model: M,
    risk_free_rate: f64,
    volatility: f64,
}

impl<M: DeltaModel> DeltaAggregator<M> {
    /// Create an aggregator pricing every option with the same rate and volatility.
    pub fn new(model: M, risk_free_rate: f64, volatility: f64) -> Self {
        Self {
            model,
            risk_free_rate,
            volatility,
        }
    }

    /// Compute the net delta of `options` held in `positions` at `underlying_price`.
    ///
    /// Every option must have a position entry, even a zero one. Options are
    /// priced regardless of size, so a malformed contract fails the cycle.
    pub fn net_delta(
        &self,
        options: &[OptionContract],
        positions: &Positions,
        underlying_price: f64,
    ) -> Result<f64, DataError> {
        options.iter().try_fold(0.0, |net_delta, option| {
            let quantity = positions
                .get(&option.id)
                .copied()
                .ok_or_else(|| DataError::MissingPosition {
                    option_id: option.id.clone(),
                })?;

            let unit_delta = self.model.delta(
                option,
                underlying_price,
                self.risk_free_rate,
                self.volatility,
            )?;
            let contribution = unit_delta * quantity as f64;

            debug!(
                option = %option.id,
                kind = %option.kind,
                strike = option.strike,
                position = quantity,
                unit_delta,
                contribution,
                "Option delta"
            );

            Ok(net_delta + contribution)
        })
    }
}

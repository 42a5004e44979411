//! Configuration management for the delta hedger.
//!
//! Loads settings from an optional `config` file and `DH__`-prefixed
//! environment variables.

use crate::exchange::PriceLevel;
use crate::pricing::OptionContract;
use crate::strategy::RoundingMode;
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Hedge sizing and order dispatch
    #[serde(default)]
    pub hedge: HedgeConfig,
    /// Inputs to the delta model
    #[serde(default)]
    pub pricing: PricingConfig,
    /// Option book written on the hedged stock
    #[serde(default)]
    pub options: Vec<OptionContract>,
    /// Initial state of the paper venue
    #[serde(default)]
    pub paper: PaperConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HedgeConfig {
    /// Instrument id of the stock used to hedge
    #[serde(default = "default_stock_id")]
    pub stock_id: String,
    /// Hard cap on |net position| per instrument
    #[serde(default = "default_position_limit")]
    pub position_limit: i64,
    /// Limit price for hedge sells; low enough to cross any sane bid
    #[serde(default = "default_sell_price")]
    pub sell_price: Decimal,
    /// Limit price for hedge buys; high enough to cross any sane ask
    #[serde(default = "default_buy_price")]
    pub buy_price: Decimal,
    /// How a fractional delta becomes a whole-share target
    #[serde(default)]
    pub rounding: RoundingMode,
    /// Seconds between cycles in `run` mode
    #[serde(default = "default_cycle_interval")]
    pub cycle_interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,
    /// Annualised volatility (3.0 = 300%)
    #[serde(default = "default_volatility")]
    pub volatility: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaperConfig {
    /// Starting holdings, one entry per instrument id
    #[serde(default)]
    pub positions: Vec<PositionEntry>,
    /// Resting bids on the stock, best first
    #[serde(default)]
    pub bids: Vec<PriceLevel>,
    /// Resting asks on the stock, best first
    #[serde(default)]
    pub asks: Vec<PriceLevel>,
}

/// Starting holding for one instrument.
///
/// Kept as a list of entries rather than a map: config map keys are
/// lowercased on load, and instrument ids are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionEntry {
    pub id: String,
    pub quantity: i64,
}

impl PositionEntry {
    pub fn new(id: impl Into<String>, quantity: i64) -> Self {
        Self {
            id: id.into(),
            quantity,
        }
    }
}

// Default value functions
fn default_stock_id() -> String {
    "NVDA".to_string()
}

fn default_position_limit() -> i64 {
    100
}

fn default_sell_price() -> Decimal {
    Decimal::ONE
}

fn default_buy_price() -> Decimal {
    Decimal::new(10_000, 0)
}

fn default_cycle_interval() -> u64 {
    5
}

fn default_risk_free_rate() -> f64 {
    0.03
}

fn default_volatility() -> f64 {
    3.0
}

impl Config {
    /// Load configuration from environment variables and config files.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::default().separator("__").prefix("DH"))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            !self.hedge.stock_id.is_empty(),
            "stock_id must not be empty"
        );

        anyhow::ensure!(
            self.hedge.position_limit > 0,
            "position_limit must be positive"
        );

        anyhow::ensure!(
            self.hedge.sell_price > Decimal::ZERO && self.hedge.sell_price < self.hedge.buy_price,
            "sell_price must be positive and below buy_price"
        );

        anyhow::ensure!(
            self.pricing.volatility.is_finite() && self.pricing.volatility > 0.0,
            "volatility must be positive"
        );

        anyhow::ensure!(
            self.pricing.risk_free_rate.is_finite(),
            "risk_free_rate must be finite"
        );

        let mut seen = HashSet::new();
        for option in &self.options {
            anyhow::ensure!(
                seen.insert(option.id.as_str()),
                "duplicate option id {}",
                option.id
            );
            anyhow::ensure!(
                option.id != self.hedge.stock_id,
                "option id {} collides with the stock id",
                option.id
            );
        }

        let mut seeded = HashSet::new();
        for entry in &self.paper.positions {
            anyhow::ensure!(
                seeded.insert(entry.id.as_str()),
                "duplicate paper position for {}",
                entry.id
            );
        }

        Ok(())
    }
}

impl Default for HedgeConfig {
    fn default() -> Self {
        Self {
            stock_id: default_stock_id(),
            position_limit: default_position_limit(),
            sell_price: default_sell_price(),
            buy_price: default_buy_price(),
            rounding: RoundingMode::default(),
            cycle_interval_secs: default_cycle_interval(),
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: default_risk_free_rate(),
            volatility: default_volatility(),
        }
    }
}

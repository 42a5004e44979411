//! End-to-end hedging cycles against the paper venue.

use chrono::{Duration, TimeZone, Utc};
use delta_hedger::config::Config;
use delta_hedger::exchange::{OrderSide, OrderType, PaperVenue, PriceBook, PriceLevel};
use delta_hedger::pricing::{BlackScholes, DeltaModel, OptionContract, OptionKind};
use delta_hedger::strategy::{DispatchOutcome, HedgeDecision, HedgeEngine};
use delta_hedger::DataError;
use rust_decimal_macros::dec;
use std::collections::HashMap;

/// Delta looked up by option id.
struct FixedDeltas(HashMap<String, f64>);

impl FixedDeltas {
    fn new(entries: &[(&str, f64)]) -> Self {
        Self(entries.iter().map(|(id, d)| (id.to_string(), *d)).collect())
    }
}

impl DeltaModel for FixedDeltas {
    fn delta(&self, contract: &OptionContract, _: f64, _: f64, _: f64) -> Result<f64, DataError> {
        Ok(self.0[&contract.id])
    }
}

fn config_with(options: &[(&str, OptionKind)]) -> Config {
    let mut config = Config::default();
    config.options = options
        .iter()
        .map(|(id, kind)| OptionContract::new(*id, Utc::now() + Duration::days(30), 100.0, *kind))
        .collect();
    config
}

async fn paper_venue(positions: &[(&str, i64)]) -> PaperVenue {
    let venue = PaperVenue::new(100);
    for (id, quantity) in positions {
        venue.set_position(id, *quantity).await;
    }
    venue
        .set_book(PriceBook::new(
            "NVDA",
            vec![PriceLevel::new(dec!(99.9), 200)],
            vec![PriceLevel::new(dec!(100.1), 200)],
        ))
        .await;
    venue
}

#[tokio::test]
async fn test_long_book_delta_sells_stock_at_floor_price() {
    let config = config_with(&[("C100", OptionKind::Call), ("P90", OptionKind::Put)]);
    let venue = paper_venue(&[("C100", 50), ("P90", -52), ("NVDA", -40)]).await;
    let model = FixedDeltas::new(&[("C100", 0.6), ("P90", -0.3)]);

    let engine = HedgeEngine::new(&config, venue, model);
    let report = engine.run_cycle(100.0).await.unwrap();

    assert!((report.net_delta - 45.6).abs() < 1e-9);
    assert_eq!(
        report.decision,
        HedgeDecision::Trade {
            side: OrderSide::Sell,
            volume: 6,
            target: -46,
        }
    );

    let orders = engine.venue().orders().await;
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].side, OrderSide::Sell);
    assert_eq!(orders[0].volume, 6);
    assert_eq!(orders[0].price, dec!(1));
    assert_eq!(orders[0].order_type, OrderType::Ioc);
    assert_eq!(engine.venue().position("NVDA").await, -46);
}

#[tokio::test]
async fn test_flat_book_and_flat_stock_sends_nothing() {
    let config = config_with(&[("C100", OptionKind::Call)]);
    let venue = paper_venue(&[("C100", 0), ("NVDA", 0)]).await;

    let engine = HedgeEngine::new(&config, venue, FixedDeltas::new(&[("C100", 0.5)]));
    let report = engine.run_cycle(100.0).await.unwrap();

    assert_eq!(report.decision, HedgeDecision::NoTrade { target: 0 });
    assert_eq!(report.outcome, DispatchOutcome::Skipped);
    assert!(engine.venue().orders().await.is_empty());
}

#[tokio::test]
async fn test_neutral_book_sends_nothing() {
    // 60 puts at -0.5 give -30 delta, offset by 30 long shares
    let config = config_with(&[("P100", OptionKind::Put)]);
    let venue = paper_venue(&[("P100", 60), ("NVDA", 30)]).await;

    let engine = HedgeEngine::new(&config, venue, FixedDeltas::new(&[("P100", -0.5)]));
    let report = engine.run_cycle(100.0).await.unwrap();

    assert_eq!(report.net_delta, -30.0);
    assert_eq!(report.outcome, DispatchOutcome::Skipped);
    assert!(engine.venue().orders().await.is_empty());
}

#[tokio::test]
async fn test_trade_past_limit_is_suppressed() {
    // Book delta -105 wants 105 shares; holding 95, buying 10 would land on 105
    let config = config_with(&[("P100", OptionKind::Put)]);
    let venue = paper_venue(&[("P100", 105), ("NVDA", 95)]).await;

    let engine = HedgeEngine::new(&config, venue, FixedDeltas::new(&[("P100", -1.0)]));
    let report = engine.run_cycle(100.0).await.unwrap();

    assert_eq!(
        report.outcome,
        DispatchOutcome::Suppressed {
            side: OrderSide::Buy,
            volume: 10,
            projected_position: 105,
        }
    );
    assert!(engine.venue().orders().await.is_empty());
    assert_eq!(engine.venue().position("NVDA").await, 95);
}

#[tokio::test]
async fn test_trade_landing_on_limit_is_allowed() {
    let config = config_with(&[("P100", OptionKind::Put)]);
    let venue = paper_venue(&[("P100", 100), ("NVDA", 95)]).await;

    let engine = HedgeEngine::new(&config, venue, FixedDeltas::new(&[("P100", -1.0)]));
    engine.run_cycle(100.0).await.unwrap();

    assert_eq!(engine.venue().position("NVDA").await, 100);
}

#[tokio::test]
async fn test_second_cycle_on_unchanged_market_is_idle() {
    let valuation = Utc.with_ymd_and_hms(2026, 6, 1, 14, 0, 0).unwrap();
    let mut config = Config::default();
    config.options = vec![
        OptionContract::new("C100", valuation + Duration::days(90), 100.0, OptionKind::Call),
        OptionContract::new("P95", valuation + Duration::days(30), 95.0, OptionKind::Put),
    ];
    let venue = paper_venue(&[("C100", 40), ("P95", -25), ("NVDA", 0)]).await;

    let engine = HedgeEngine::new(&config, venue, BlackScholes::at(valuation));

    let first = engine.run_cycle(100.0).await.unwrap();
    let expected_target = (-first.net_delta).round() as i64;
    assert_eq!(first.decision.target(), expected_target);
    assert!(matches!(first.outcome, DispatchOutcome::Submitted { .. }));
    assert_eq!(engine.venue().position("NVDA").await, expected_target);

    let second = engine.run_cycle(100.0).await.unwrap();
    assert_eq!(second.net_delta, first.net_delta);
    assert_eq!(second.outcome, DispatchOutcome::Skipped);
    assert_eq!(engine.venue().orders().await.len(), 1);
}

#[tokio::test]
async fn test_expired_option_aborts_cycle() {
    let valuation = Utc.with_ymd_and_hms(2026, 6, 1, 14, 0, 0).unwrap();
    let mut config = Config::default();
    config.options = vec![OptionContract::new(
        "C100",
        valuation - Duration::days(1),
        100.0,
        OptionKind::Call,
    )];
    let venue = paper_venue(&[("C100", 10), ("NVDA", 0)]).await;

    let engine = HedgeEngine::new(&config, venue, BlackScholes::at(valuation));
    let err = engine.run_cycle(100.0).await.unwrap_err();

    assert!(err.to_string().contains("invalid contract C100"));
    assert!(engine.venue().orders().await.is_empty());
}

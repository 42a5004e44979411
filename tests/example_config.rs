//! The shipped example configuration drives a full cycle on the paper venue.

use chrono::{TimeZone, Utc};
use delta_hedger::config::Config;
use delta_hedger::exchange::PaperVenue;
use delta_hedger::pricing::BlackScholes;
use delta_hedger::strategy::{DispatchOutcome, HedgeEngine};

fn example_config() -> Config {
    config::Config::builder()
        .add_source(config::File::from_str(
            include_str!("../config.example.toml"),
            config::FileFormat::Toml,
        ))
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap()
}

#[test]
fn test_example_config_keeps_instrument_ids() {
    let config = example_config();
    config.validate().unwrap();

    let ids: Vec<&str> = config.paper.positions.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["NVDA_202703_100C", "NVDA_202703_90P", "NVDA"]);
    assert_eq!(config.hedge.stock_id, "NVDA");
}

#[tokio::test]
async fn test_example_config_hedges_in_one_cycle() {
    let config = example_config();
    let venue = PaperVenue::from_config(&config).await;
    let valuation = Utc.with_ymd_and_hms(2026, 6, 1, 14, 0, 0).unwrap();

    let engine = HedgeEngine::new(&config, venue, BlackScholes::at(valuation));
    let report = engine.run_cycle(100.0).await.unwrap();

    assert_eq!(report.stock_position, -10);
    assert!(matches!(report.outcome, DispatchOutcome::Submitted { .. }));
    assert_eq!(
        engine.venue().position("NVDA").await,
        report.decision.target()
    );
}

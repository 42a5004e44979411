//! Delta Hedger - Main Entry Point
//!
//! Runs the hedger against a paper venue seeded from configuration.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use delta_hedger::config::Config;
use delta_hedger::exchange::PaperVenue;
use delta_hedger::pricing::BlackScholes;
use delta_hedger::strategy::HedgeEngine;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

/// Delta Hedger CLI
#[derive(Parser)]
#[command(name = "delta-hedger")]
#[command(version, about = "Delta-neutral stock hedging for an option book")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single hedging cycle and print the report as JSON
    Once {
        /// Underlying stock price used for option deltas
        #[arg(short, long)]
        price: f64,
    },

    /// Hedge continuously until Ctrl-C
    Run {
        /// Underlying stock price used for option deltas
        #[arg(short, long)]
        price: f64,

        /// Seconds between cycles (overrides config)
        #[arg(short, long)]
        interval_secs: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging()?;

    let config = Config::load()?;
    config.validate().context("Invalid configuration")?;
    log_config(&config);

    let venue = PaperVenue::from_config(&config).await;
    let engine = HedgeEngine::new(&config, venue, BlackScholes::new());

    match cli.command {
        Commands::Once { price } => {
            let report = engine.run_cycle(price).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Run {
            price,
            interval_secs,
        } => {
            let interval =
                Duration::from_secs(interval_secs.unwrap_or(config.hedge.cycle_interval_secs));

            let shutdown = Arc::new(AtomicBool::new(false));
            let shutdown_clone = shutdown.clone();
            tokio::spawn(async move {
                tokio::signal::ctrl_c().await.ok();
                info!("Shutdown signal received");
                shutdown_clone.store(true, Ordering::SeqCst);
            });

            info!(interval_secs = interval.as_secs(), "Starting hedge loop");
            engine.run(|| Some(price), interval, shutdown).await;
        }
    }

    Ok(())
}

/// Initialize logging to stderr and an hourly rolling file.
fn init_logging() -> Result<()> {
    use tracing_subscriber::fmt::writer::MakeWriterExt;

    std::fs::create_dir_all("logs")?;

    let file_appender = tracing_appender::rolling::hourly("logs", "delta-hedger.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    // Keep the writer alive for the program duration
    Box::leak(Box::new(guard));

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("delta_hedger=debug".parse()?)
                .add_directive(Level::INFO.into()),
        )
        .with_writer(std::io::stderr.and(file_writer))
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .init();

    Ok(())
}

/// Log configuration on startup.
fn log_config(config: &Config) {
    info!(
        stock = %config.hedge.stock_id,
        options = config.options.len(),
        position_limit = config.hedge.position_limit,
        sell_price = %config.hedge.sell_price,
        buy_price = %config.hedge.buy_price,
        rounding = ?config.hedge.rounding,
        risk_free_rate = config.pricing.risk_free_rate,
        volatility = config.pricing.volatility,
        "Configuration loaded"
    );
}

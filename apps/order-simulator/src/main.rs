//! Order Simulator Binary
//!
//! Runs the simulator against a batch of sample orders, logs every order-book
//! change, and prints the CSV exports on exit.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin order-simulator
//! ```
//!
//! # Environment Variables
//!
//! - `ORDER_SIMULATOR_CONFIG`: YAML config path (default: built-in defaults)
//! - `ORDER_SIMULATOR_SEED`: Seed for reproducible runs (default: system RNG)
//! - `ORDER_SIMULATOR_RUN_SECS`: How long to run before exporting (default: 30)
//! - `RUST_LOG`: Overrides the configured log level

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use order_simulator::telemetry::init_tracing;
use order_simulator::{
    Config, Order, OrderChanges, OrderSide, OrderSimulator, PlaceOrderCommand, RandomSource,
    SeededRandomSource, SubscriberError, ThreadRandomSource, load_config,
};
use rust_decimal_macros::dec;
use tokio::signal;

/// Default run duration.
const DEFAULT_RUN_SECS: u64 = 30;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let config = match std::env::var("ORDER_SIMULATOR_CONFIG") {
        Ok(path) => load_config(Some(&path)).with_context(|| format!("loading {path}"))?,
        Err(_) => Config::default(),
    };
    init_tracing(&config.logging);

    let random = create_random_source()?;
    let run_for = run_duration();

    let simulator = OrderSimulator::new(config, random).context("starting simulator")?;

    let _subscription = simulator.subscribe(|orders: &[Order]| -> Result<(), SubscriberError> {
        let active = orders.iter().filter(|o| o.status().is_active()).count();
        tracing::info!(orders = orders.len(), active, "Order book updated");
        Ok(())
    });

    place_sample_orders(&simulator);

    tracing::info!(run_secs = run_for.as_secs(), "Simulation running");

    tokio::select! {
        () = tokio::time::sleep(run_for) => {
            tracing::info!("Run duration elapsed");
        }
        result = signal::ctrl_c() => {
            result.context("listening for Ctrl-C")?;
            tracing::info!("Received Ctrl-C");
        }
    }

    simulator.shutdown();

    let stats = simulator.stats();
    tracing::info!(
        total_orders = stats.total_orders,
        filled = stats.filled,
        partially_filled = stats.partially_filled,
        pending = stats.pending,
        cancelled = stats.cancelled,
        rejected = stats.rejected,
        total_trades = stats.total_trades,
        total_commission = %stats.total_commission,
        filled_notional = %stats.filled_notional,
        "Simulation finished"
    );

    println!("{}\n", simulator.export_orders_csv());
    println!("{}", simulator.export_trades_csv());

    Ok(())
}

/// Seeded when `ORDER_SIMULATOR_SEED` is set, system RNG otherwise.
fn create_random_source() -> anyhow::Result<Arc<dyn RandomSource>> {
    match std::env::var("ORDER_SIMULATOR_SEED") {
        Ok(seed) => {
            let seed: u64 = seed
                .parse()
                .with_context(|| format!("ORDER_SIMULATOR_SEED must be a u64, got {seed:?}"))?;
            tracing::info!(seed, "Using seeded random source");
            Ok(Arc::new(SeededRandomSource::new(seed)))
        }
        Err(_) => Ok(Arc::new(ThreadRandomSource)),
    }
}

fn run_duration() -> Duration {
    let secs = std::env::var("ORDER_SIMULATOR_RUN_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_RUN_SECS);
    Duration::from_secs(secs)
}

/// A mix of order types, one invalid placement, a cancel, and a modify.
fn place_sample_orders(simulator: &OrderSimulator) {
    let orders = [
        PlaceOrderCommand::market("AAPL", OrderSide::Buy, dec!(100)).with_strategy("momentum"),
        PlaceOrderCommand::market("MSFT", OrderSide::Sell, dec!(40)).with_strategy("momentum"),
        PlaceOrderCommand::limit("TSLA", OrderSide::Sell, dec!(50), dec!(500))
            .with_strategy("mean-reversion")
            .with_tag("swing"),
        PlaceOrderCommand::stop("NVDA", OrderSide::Sell, dec!(25), dec!(880))
            .with_strategy("risk")
            .with_tag("protective"),
        PlaceOrderCommand::limit("AMZN", OrderSide::Buy, dec!(10), dec!(180)),
        PlaceOrderCommand::market("SPY", OrderSide::Buy, dec!(0)),
    ];

    let placed: Vec<Order> = orders
        .into_iter()
        .map(|cmd| simulator.place_order(cmd))
        .collect();

    if let Some(order) = placed.iter().rev().find(|o| o.status().is_active()) {
        simulator.cancel_order(order.id());
    }

    if let Some(order) = placed.iter().find(|o| o.price().is_some() && o.status().is_active()) {
        let new_price = order.price().map_or(dec!(1), |p| p * dec!(1.01));
        simulator.modify_order(order.id(), &OrderChanges::price(new_price));
    }
}

/// Load .env file from current directory or any ancestor directory.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

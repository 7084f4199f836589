//! Route Advisor - Main Entry Point

use advisor::{init_logging, Args, RouteAdvisor, Settings};
use anyhow::Context;
use clap::Parser;
use storage::{InMemoryStore, Snapshot};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let settings = Settings::load(args.config.as_deref()).context("loading settings")?;
    init_logging(&settings.logging)?;

    info!("=== Route Advisor v{} ===", env!("CARGO_PKG_VERSION"));

    let json = std::fs::read_to_string(&args.snapshot)
        .with_context(|| format!("reading {}", args.snapshot.display()))?;
    let store = InMemoryStore::from_snapshot(Snapshot::from_json(&json)?);

    let advisor = RouteAdvisor::new(store, settings);
    let report = advisor.report(
        args.delivery_id,
        args.include_weight,
        args.consider_perishable,
    )?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

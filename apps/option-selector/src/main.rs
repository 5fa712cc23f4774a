//! Option Selector Binary
//!
//! Runs one strategy decision tick per configured underlying against the
//! chain snapshots on disk and prints each outcome as a JSON line.
//! Instructions are recorded, never routed to a broker.
//!
//! The wheel reads the market session and each underlying's holdings from
//! the `portfolio` config section; unlisted underlyings are flat.
//!
//! # Usage
//!
//! ```bash
//! option-selector [config.yaml]
//! ```
//!
//! # Environment Variables
//!
//! - `OPTION_SELECTOR_CONFIG`: Config path when no argument is given (default: config.yaml)
//! - `OPTION_SELECTOR_NOW`: RFC 3339 timestamp to replay instead of the wall clock
//! - `RUST_LOG`: Overrides `observability.logging.level`

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use option_selector::config::{Config, StrategyMode, load_config};
use option_selector::infrastructure::{JsonFileChainProvider, RecordingOrderSink};
use option_selector::telemetry::init_tracing;
use option_selector::{OtmEntryUseCase, Symbol, TickOutcome, UseCaseError, WheelUseCase};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv();

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("OPTION_SELECTOR_CONFIG").ok());
    let config = load_config(config_path.as_deref()).context("loading configuration")?;
    init_tracing(&config.observability.logging).context("installing tracing subscriber")?;

    let now = decision_time()?;
    tracing::info!(
        mode = %config.strategy.mode,
        underlyings = ?config.strategy.underlyings,
        snapshot_dir = %config.feed.snapshot_dir.display(),
        %now,
        "Starting option selector"
    );

    let chains = Arc::new(
        JsonFileChainProvider::new(&config.feed.snapshot_dir)
            .with_filter(config.filter.to_filter()?),
    );
    let orders = Arc::new(RecordingOrderSink::new());

    let mut failures = 0_usize;
    for underlying in config.underlyings() {
        match run_tick(&config, &chains, &orders, &underlying, now).await {
            Ok(outcome) => {
                if let Some(code) = outcome.skip_reason().and_then(|r| r.code()) {
                    tracing::warn!(underlying = %underlying, code = %code, "Tick skipped");
                }
                let report = json!({ "underlying": underlying, "outcome": outcome });
                println!("{report}");
            }
            Err(e) => {
                failures += 1;
                tracing::error!(
                    underlying = %underlying,
                    code = %e.code(),
                    error = %e,
                    "Tick failed"
                );
                let report = json!({
                    "underlying": underlying,
                    "error": { "code": e.code(), "message": e.to_string() },
                });
                println!("{report}");
            }
        }
    }

    tracing::info!(orders = orders.len(), failures, "Option selector finished");
    if failures > 0 {
        bail!("{failures} tick(s) failed");
    }
    Ok(())
}

async fn run_tick(
    config: &Config,
    chains: &Arc<JsonFileChainProvider>,
    orders: &Arc<RecordingOrderSink>,
    underlying: &Symbol,
    now: DateTime<Utc>,
) -> Result<TickOutcome, UseCaseError> {
    match config.strategy.mode {
        StrategyMode::Wheel => {
            let wheel = WheelUseCase::new(
                Arc::clone(chains),
                Arc::clone(orders),
                config.wheel.to_params(),
            )?;
            wheel
                .on_tick(
                    underlying,
                    config.portfolio.holdings_for(underlying),
                    config.portfolio.market_open,
                    now,
                )
                .await
        }
        StrategyMode::OtmCall => {
            let entry = OtmEntryUseCase::new(
                Arc::clone(chains),
                Arc::clone(orders),
                config.selection.to_params()?,
            );
            entry.buy_otm_call(underlying, now).await
        }
        StrategyMode::OtmPut => {
            let entry = OtmEntryUseCase::new(
                Arc::clone(chains),
                Arc::clone(orders),
                config.selection.to_params()?,
            );
            entry.sell_otm_put(underlying, now).await
        }
    }
}

fn decision_time() -> Result<DateTime<Utc>> {
    match std::env::var("OPTION_SELECTOR_NOW") {
        Ok(raw) => Ok(DateTime::parse_from_rfc3339(&raw)
            .with_context(|| format!("parsing OPTION_SELECTOR_NOW={raw}"))?
            .with_timezone(&Utc)),
        Err(_) => Ok(Utc::now()),
    }
}

/// Load `.env` from the working directory or the nearest ancestor holding one.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        for dir in cwd.ancestors().skip(1) {
            let env_path = dir.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
        }
    }
}

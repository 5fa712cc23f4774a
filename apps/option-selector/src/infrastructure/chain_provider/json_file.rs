//! JSON snapshot file chain provider.
//!
//! Snapshots live under a directory, one file per underlying:
//!
//! ```text
//! {snapshot_dir}/{UNDERLYING}/{YYYY-MM-DD}.json   dated snapshot (preferred)
//! {snapshot_dir}/{UNDERLYING}.json                latest snapshot
//! ```
//!
//! A file carries the snapshot header plus fully described `contracts`
//! and/or bare OCC `symbols`. Bare symbols are decoded into contracts
//! without greeks.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use super::apply_subscription;
use crate::application::ports::{ChainProviderError, ChainProviderPort};
use crate::domain::option_chain::{ChainFilter, ChainSnapshot, OptionContract};
use crate::domain::shared::Symbol;

/// On-disk snapshot layout.
#[derive(Debug, Deserialize)]
struct ChainFile {
    underlying: Symbol,
    underlying_price: Decimal,
    as_of: NaiveDate,
    #[serde(default)]
    contracts: Vec<OptionContract>,
    #[serde(default)]
    symbols: Vec<Symbol>,
}

/// Chain provider reading JSON snapshot files.
#[derive(Debug, Clone)]
pub struct JsonFileChainProvider {
    snapshot_dir: PathBuf,
    filter: Option<ChainFilter>,
}

impl JsonFileChainProvider {
    /// Create a provider rooted at `snapshot_dir`.
    #[must_use]
    pub fn new(snapshot_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshot_dir: snapshot_dir.into(),
            filter: None,
        }
    }

    /// Re-apply `filter` to every snapshot read.
    #[must_use]
    pub fn with_filter(mut self, filter: ChainFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Directory snapshots are read from.
    #[must_use]
    pub fn snapshot_dir(&self) -> &Path {
        &self.snapshot_dir
    }

    fn candidate_paths(&self, underlying: &Symbol, as_of: NaiveDate) -> [PathBuf; 2] {
        [
            self.snapshot_dir
                .join(underlying.as_str())
                .join(format!("{}.json", as_of.format("%Y-%m-%d"))),
            self.snapshot_dir.join(format!("{}.json", underlying.as_str())),
        ]
    }

    fn decode(underlying: &Symbol, raw: &str) -> Result<ChainSnapshot, ChainProviderError> {
        let malformed = |message: String| ChainProviderError::Malformed {
            underlying: underlying.to_string(),
            message,
        };

        let file: ChainFile = serde_json::from_str(raw).map_err(|e| malformed(e.to_string()))?;
        if &file.underlying != underlying {
            return Err(malformed(format!(
                "snapshot is for {}, expected {underlying}",
                file.underlying
            )));
        }

        let mut contracts = file.contracts;
        for symbol in file.symbols {
            let contract =
                OptionContract::from_occ_symbol(symbol).map_err(|e| malformed(e.to_string()))?;
            contracts.push(contract);
        }

        if let Some(stray) = contracts.iter().find(|c| c.underlying() != underlying) {
            return Err(malformed(format!(
                "contract {} belongs to {}",
                stray.symbol(),
                stray.underlying()
            )));
        }

        if let Some(unsized_contract) = contracts.iter().find(|c| c.multiplier() == 0) {
            return Err(malformed(format!(
                "contract {} has multiplier 0",
                unsized_contract.symbol()
            )));
        }

        Ok(ChainSnapshot::new(
            file.underlying,
            file.underlying_price,
            file.as_of,
            contracts,
        ))
    }
}

#[async_trait]
impl ChainProviderPort for JsonFileChainProvider {
    async fn option_chain(
        &self,
        underlying: &Symbol,
        as_of: NaiveDate,
    ) -> Result<Option<ChainSnapshot>, ChainProviderError> {
        for path in self.candidate_paths(underlying, as_of) {
            let raw = match tokio::fs::read_to_string(&path).await {
                Ok(raw) => raw,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to read chain snapshot");
                    return Err(ChainProviderError::Unavailable {
                        message: format!("{}: {e}", path.display()),
                    });
                }
            };

            let snapshot = Self::decode(underlying, &raw)?;
            debug!(
                path = %path.display(),
                contracts = snapshot.len(),
                "Loaded chain snapshot"
            );
            return Ok(Some(apply_subscription(self.filter.as_ref(), snapshot)));
        }

        debug!(underlying = %underlying, %as_of, "No chain snapshot on disk");
        Ok(None)
    }
}

//! In-memory chain provider for testing and replay.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chrono::NaiveDate;

use super::apply_subscription;
use crate::application::ports::{ChainProviderError, ChainProviderPort};
use crate::domain::option_chain::{ChainFilter, ChainSnapshot};
use crate::domain::shared::Symbol;

/// In-memory implementation of `ChainProviderPort`.
///
/// Holds the latest published snapshot per underlying.
#[derive(Debug, Default)]
pub struct InMemoryChainProvider {
    chains: RwLock<HashMap<Symbol, ChainSnapshot>>,
    filter: Option<ChainFilter>,
}

impl InMemoryChainProvider {
    /// Create a new empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-apply `filter` to every snapshot handed out.
    #[must_use]
    pub fn with_filter(mut self, filter: ChainFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Publish (or replace) the snapshot for its underlying.
    pub fn publish(&self, snapshot: ChainSnapshot) {
        let mut chains = self.chains.write().unwrap_or_else(PoisonError::into_inner);
        chains.insert(snapshot.underlying().clone(), snapshot);
    }

    /// Withdraw the snapshot for an underlying.
    pub fn withdraw(&self, underlying: &Symbol) {
        let mut chains = self.chains.write().unwrap_or_else(PoisonError::into_inner);
        chains.remove(underlying);
    }

    /// Number of published chains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chains.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether no chain is published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ChainProviderPort for InMemoryChainProvider {
    async fn option_chain(
        &self,
        underlying: &Symbol,
        _as_of: NaiveDate,
    ) -> Result<Option<ChainSnapshot>, ChainProviderError> {
        let snapshot = self
            .chains
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(underlying)
            .cloned();
        Ok(snapshot.map(|s| apply_subscription(self.filter.as_ref(), s)))
    }
}

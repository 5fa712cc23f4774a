//! Chain Snapshot Value Object

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{OptionContract, OptionRight};
use crate::domain::shared::Symbol;

/// The option chain for one underlying as observed at one instant.
///
/// Snapshots are rebuilt on every decision tick by the data pipeline and
/// only ever borrowed by the selection services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSnapshot {
    /// Underlying symbol.
    underlying: Symbol,
    /// Underlying spot price at `as_of`.
    underlying_price: Decimal,
    /// Observation date.
    as_of: NaiveDate,
    /// Published contracts, in feed order.
    #[serde(default)]
    contracts: Vec<OptionContract>,
}

impl ChainSnapshot {
    /// Create a snapshot.
    #[must_use]
    pub fn new(
        underlying: impl Into<Symbol>,
        underlying_price: Decimal,
        as_of: NaiveDate,
        contracts: Vec<OptionContract>,
    ) -> Self {
        Self {
            underlying: underlying.into(),
            underlying_price,
            as_of,
            contracts,
        }
    }

    /// A snapshot with no published contracts.
    #[must_use]
    pub fn empty(underlying: impl Into<Symbol>, underlying_price: Decimal, as_of: NaiveDate) -> Self {
        Self::new(underlying, underlying_price, as_of, Vec::new())
    }

    /// Same underlying, spot and date with a different contract set.
    #[must_use]
    pub fn with_contracts(&self, contracts: Vec<OptionContract>) -> Self {
        Self {
            underlying: self.underlying.clone(),
            underlying_price: self.underlying_price,
            as_of: self.as_of,
            contracts,
        }
    }

    /// Get the underlying symbol.
    #[must_use]
    pub const fn underlying(&self) -> &Symbol {
        &self.underlying
    }

    /// Get the underlying spot price.
    #[must_use]
    pub const fn underlying_price(&self) -> Decimal {
        self.underlying_price
    }

    /// Get the observation date.
    #[must_use]
    pub const fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// Get all contracts.
    #[must_use]
    pub fn contracts(&self) -> &[OptionContract] {
        &self.contracts
    }

    /// Number of contracts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// Whether the snapshot holds no contracts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    /// Contracts of one right, in feed order.
    pub fn of_right(&self, right: OptionRight) -> impl Iterator<Item = &OptionContract> {
        self.contracts.iter().filter(move |c| c.right() == right)
    }

    /// Distinct expiries, ascending.
    #[must_use]
    pub fn expiries(&self) -> BTreeSet<NaiveDate> {
        self.contracts.iter().map(OptionContract::expiry).collect()
    }

    /// Distinct strikes, ascending.
    #[must_use]
    pub fn strikes(&self) -> BTreeSet<Decimal> {
        self.contracts.iter().map(OptionContract::strike).collect()
    }

    /// Find a contract by symbol.
    #[must_use]
    pub fn find(&self, symbol: &Symbol) -> Option<&OptionContract> {
        self.contracts.iter().find(|c| c.symbol() == symbol)
    }
}

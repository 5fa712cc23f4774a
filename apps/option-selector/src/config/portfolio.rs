//! Portfolio state fed to the wheel.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::default_true;
use crate::application::use_cases::WheelHoldings;
use crate::domain::shared::Symbol;

/// Market session and current holdings per underlying.
///
/// Underlyings without an entry are treated as flat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioConfig {
    /// Whether the market is open for this run.
    #[serde(default = "default_true")]
    pub market_open: bool,
    /// Holdings keyed by underlying symbol.
    #[serde(default)]
    pub holdings: BTreeMap<String, WheelHoldings>,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            market_open: true,
            holdings: BTreeMap::new(),
        }
    }
}

impl PortfolioConfig {
    /// Holdings for `underlying`; flat when not listed.
    #[must_use]
    pub fn holdings_for(&self, underlying: &Symbol) -> WheelHoldings {
        self.holdings
            .iter()
            .find(|(symbol, _)| Symbol::new(symbol.as_str()) == *underlying)
            .map(|(_, holdings)| *holdings)
            .unwrap_or_default()
    }
}

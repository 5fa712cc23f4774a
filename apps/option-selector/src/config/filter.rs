//! Chain subscription filter configuration.

use serde::{Deserialize, Serialize};

use super::default_true;
use crate::domain::option_chain::{ChainFilter, SelectionError};

/// Narrowing applied to every snapshot before selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Strikes kept on each side of at-the-money.
    #[serde(default = "default_strike_window_count")]
    pub strike_window_count: u32,
    /// Minimum days to expiration (inclusive).
    #[serde(default = "default_min_dte")]
    pub min_dte: i64,
    /// Maximum days to expiration (inclusive).
    #[serde(default = "default_max_dte")]
    pub max_dte: i64,
    /// Keep weekly expirations as well as standard monthlies.
    #[serde(default = "default_true")]
    pub include_weeklys: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            strike_window_count: default_strike_window_count(),
            min_dte: default_min_dte(),
            max_dte: default_max_dte(),
            include_weeklys: true,
        }
    }
}

impl FilterConfig {
    /// Build the filter.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::InvalidParameter` if the window or DTE range is invalid.
    pub fn to_filter(&self) -> Result<ChainFilter, SelectionError> {
        Ok(ChainFilter::new(self.strike_window_count, self.min_dte, self.max_dte)?
            .include_weeklys(self.include_weeklys))
    }
}

const fn default_strike_window_count() -> u32 {
    30
}

const fn default_min_dte() -> i64 {
    55
}

const fn default_max_dte() -> i64 {
    65
}

//! Strategy selection.

use serde::{Deserialize, Serialize};

/// Which decision runs each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyMode {
    /// Cash-secured puts rotating into covered calls.
    #[default]
    Wheel,
    /// Buy one delta-targeted OTM call.
    OtmCall,
    /// Sell one delta-targeted OTM put.
    OtmPut,
}

impl std::fmt::Display for StrategyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wheel => write!(f, "WHEEL"),
            Self::OtmCall => write!(f, "OTM_CALL"),
            Self::OtmPut => write!(f, "OTM_PUT"),
        }
    }
}

/// Strategy configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Decision to run.
    #[serde(default)]
    pub mode: StrategyMode,
    /// Underlyings traded.
    #[serde(default = "default_underlyings")]
    pub underlyings: Vec<String>,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            mode: StrategyMode::default(),
            underlyings: default_underlyings(),
        }
    }
}

fn default_underlyings() -> Vec<String> {
    vec!["SPY".to_string()]
}

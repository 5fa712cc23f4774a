//! Wheel strategy configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::use_cases::WheelParams;

/// Wheel rotation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelConfig {
    /// Fractional strike distance from spot (0.051 = 5.1%).
    #[serde(default = "default_otm_threshold")]
    pub otm_threshold: Decimal,
    /// Expiries must be strictly later than this many days out.
    #[serde(default = "default_min_dte")]
    pub min_dte: i64,
    /// Portfolio weight shorted when selling puts.
    #[serde(default = "default_put_allocation")]
    pub put_allocation: Decimal,
}

impl Default for WheelConfig {
    fn default() -> Self {
        WheelParams::default().into()
    }
}

impl From<WheelParams> for WheelConfig {
    fn from(params: WheelParams) -> Self {
        Self {
            otm_threshold: params.otm_threshold,
            min_dte: params.min_dte,
            put_allocation: params.put_allocation,
        }
    }
}

impl WheelConfig {
    /// Convert to use case parameters.
    #[must_use]
    pub const fn to_params(&self) -> WheelParams {
        WheelParams {
            otm_threshold: self.otm_threshold,
            min_dte: self.min_dte,
            put_allocation: self.put_allocation,
        }
    }
}

fn default_otm_threshold() -> Decimal {
    WheelParams::default().otm_threshold
}

fn default_min_dte() -> i64 {
    WheelParams::default().min_dte
}

fn default_put_allocation() -> Decimal {
    WheelParams::default().put_allocation
}

//! Delta-targeted selection configuration.

use serde::{Deserialize, Serialize};

use crate::application::use_cases::OtmEntryParams;
use crate::domain::option_chain::SelectionError;

/// Delta and DTE targets for the OTM entry strategies.
///
/// Deltas are whole percentages (`20` means a target |delta| of `0.20`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Target call delta, percent.
    #[serde(default = "default_call_delta")]
    pub call_delta: u32,
    /// Target call days to expiration.
    #[serde(default = "default_dte")]
    pub call_dte: i64,
    /// Target put delta, percent.
    #[serde(default = "default_put_delta")]
    pub put_delta: u32,
    /// Target put days to expiration.
    #[serde(default = "default_dte")]
    pub put_dte: i64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            call_delta: default_call_delta(),
            call_dte: default_dte(),
            put_delta: default_put_delta(),
            put_dte: default_dte(),
        }
    }
}

impl SelectionConfig {
    /// Convert to use case parameters.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::InvalidParameter` if a delta is not a percentage.
    pub fn to_params(&self) -> Result<OtmEntryParams, SelectionError> {
        OtmEntryParams::from_percent(self.call_delta, self.call_dte, self.put_delta, self.put_dte)
    }
}

const fn default_call_delta() -> u32 {
    30
}

const fn default_put_delta() -> u32 {
    20
}

const fn default_dte() -> i64 {
    60
}

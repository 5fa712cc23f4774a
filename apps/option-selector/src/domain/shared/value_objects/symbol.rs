//! Symbol value object for instrument identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::DomainError;

/// Length of the OCC suffix: `YYMMDD` + `P`/`C` + 8 digit strike.
const OCC_SUFFIX_LEN: usize = 15;

/// Maximum OCC root length.
const OCC_MAX_ROOT_LEN: usize = 6;

/// A trading symbol (ticker or OCC option symbol).
///
/// Examples:
/// - Equity: "SPY", "AAPL"
/// - Option: "SPY250117P00450000" (OCC format, padding removed)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Create a new Symbol.
    ///
    /// The symbol is normalized to uppercase and OCC padding whitespace is removed,
    /// so `"spy   250117P00450000"` and `"SPY250117P00450000"` compare equal.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let value: String = value.into();
        Self(
            value
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_uppercase(),
        )
    }

    /// Get the symbol string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Check if this is an option symbol (OCC format).
    ///
    /// OCC format: `{ROOT}{YY}{MM}{DD}{P/C}{PRICE}`
    /// - Root: 1-6 characters
    /// - Date: 6 digits (YYMMDD)
    /// - Type: P (put) or C (call)
    /// - Price: 8 digits (strike × 1000)
    #[must_use]
    pub fn is_option(&self) -> bool {
        let s = self.0.as_bytes();
        let len = s.len();
        if len <= OCC_SUFFIX_LEN || len > OCC_SUFFIX_LEN + OCC_MAX_ROOT_LEN {
            return false;
        }

        let type_pos = len - 9;
        let type_char = s[type_pos];
        if type_char != b'P' && type_char != b'C' {
            return false;
        }

        s[len - 8..].iter().all(u8::is_ascii_digit)
            && s[type_pos - 6..type_pos].iter().all(u8::is_ascii_digit)
    }

    /// Check if this is an equity symbol.
    #[must_use]
    pub fn is_equity(&self) -> bool {
        !self.is_option()
    }

    /// Extract the underlying symbol from an option.
    ///
    /// Returns the full symbol if it's not an option.
    #[must_use]
    pub fn underlying(&self) -> Self {
        if self.is_option() {
            Self(self.0[..self.0.len() - OCC_SUFFIX_LEN].to_string())
        } else {
            self.clone()
        }
    }

    /// The `YYMMDD{P|C}{strike×1000}` suffix of an OCC symbol.
    #[must_use]
    pub fn occ_suffix(&self) -> Option<&str> {
        self.is_option()
            .then(|| &self.0[self.0.len() - OCC_SUFFIX_LEN..])
    }

    /// Validate the symbol before it is handed to order placement.
    ///
    /// # Errors
    ///
    /// Returns error if symbol is empty or contains invalid characters.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.0.is_empty() {
            return Err(DomainError::invalid_value("symbol", "Symbol cannot be empty"));
        }

        if self.0.len() > OCC_SUFFIX_LEN + OCC_MAX_ROOT_LEN {
            return Err(DomainError::invalid_value(
                "symbol",
                "Symbol exceeds maximum length",
            ));
        }

        // Only alphanumeric characters allowed
        if !self.0.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::invalid_value(
                "symbol",
                "Symbol contains invalid characters",
            ));
        }

        Ok(())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

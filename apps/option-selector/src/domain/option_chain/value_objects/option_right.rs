//! Option Right Value Object

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::option_chain::SelectionError;

/// Option right (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionRight {
    /// Call option (right to buy).
    Call,
    /// Put option (right to sell).
    Put,
}

impl OptionRight {
    /// The OCC symbol code (`C` or `P`).
    #[must_use]
    pub const fn occ_code(self) -> char {
        match self {
            Self::Call => 'C',
            Self::Put => 'P',
        }
    }

    /// Parse an OCC symbol code.
    #[must_use]
    pub const fn from_occ_code(code: char) -> Option<Self> {
        match code {
            'C' | 'c' => Some(Self::Call),
            'P' | 'p' => Some(Self::Put),
            _ => None,
        }
    }
}

impl std::fmt::Display for OptionRight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "CALL"),
            Self::Put => write!(f, "PUT"),
        }
    }
}

impl FromStr for OptionRight {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CALL" | "C" => Ok(Self::Call),
            "PUT" | "P" => Ok(Self::Put),
            _ => Err(SelectionError::UnknownRight {
                value: s.to_string(),
            }),
        }
    }
}

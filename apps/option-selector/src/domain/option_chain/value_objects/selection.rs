//! Selection Outcome

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{OptionContract, OptionRight};

/// Why a well-formed selection call found no contract.
///
/// Every variant is recoverable: the caller skips this decision tick and
/// retries on the next chain update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotFoundReason {
    /// The snapshot holds no contracts at all.
    EmptyChain,
    /// No contract of the requested right.
    NoContractsOfRight {
        /// Requested right.
        right: OptionRight,
    },
    /// No expiry strictly after the minimum DTE bound.
    NoQualifyingExpiry {
        /// The exclusive lower bound.
        after: NaiveDate,
    },
    /// No contract at the chosen expiry is on the OTM-safe side of the target strike.
    NoStrikeBeyondThreshold {
        /// Requested right.
        right: OptionRight,
        /// Target strike.
        target_strike: Decimal,
        /// Expiry that was searched.
        expiry: NaiveDate,
    },
}

impl std::fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyChain => write!(f, "option chain is empty"),
            Self::NoContractsOfRight { right } => write!(f, "no {right} contracts in chain"),
            Self::NoQualifyingExpiry { after } => write!(f, "no expiry after {after}"),
            Self::NoStrikeBeyondThreshold {
                right,
                target_strike,
                expiry,
            } => {
                let side = match right {
                    OptionRight::Put => "at or below",
                    OptionRight::Call => "at or above",
                };
                write!(f, "no {right} {side} strike {target_strike} expiring {expiry}")
            }
        }
    }
}

/// Outcome of a contract selection over a borrowed snapshot.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<'a> {
    /// The best-matching contract.
    Found(&'a OptionContract),
    /// Nothing matched.
    NotFound(NotFoundReason),
}

impl<'a> Selection<'a> {
    /// The selected contract, if any.
    #[must_use]
    pub const fn contract(&self) -> Option<&'a OptionContract> {
        match self {
            Self::Found(contract) => Some(*contract),
            Self::NotFound(_) => None,
        }
    }

    /// Whether a contract was selected.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The not-found reason, if nothing matched.
    #[must_use]
    pub const fn not_found_reason(&self) -> Option<&NotFoundReason> {
        match self {
            Self::Found(_) => None,
            Self::NotFound(reason) => Some(reason),
        }
    }

    /// Convert into a `Result` for `?`-style handling.
    ///
    /// # Errors
    ///
    /// Returns the not-found reason when nothing matched.
    pub fn into_result(self) -> Result<&'a OptionContract, NotFoundReason> {
        match self {
            Self::Found(contract) => Ok(contract),
            Self::NotFound(reason) => Err(reason),
        }
    }
}

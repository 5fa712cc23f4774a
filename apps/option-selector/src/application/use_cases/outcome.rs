//! Tick outcomes shared by the strategy use cases.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::ports::{ChainProviderError, OrderInstruction, OrderPlacementError};
use crate::domain::option_chain::{NotFoundReason, SelectionError};
use crate::domain::shared::DomainError;

/// Why a tick produced no order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "skip", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkipReason {
    /// No chain is published for the underlying.
    ChainUnavailable,
    /// The selector found no matching contract.
    NotFound {
        /// Selector's reason.
        reason: NotFoundReason,
    },
    /// The market is closed.
    MarketClosed,
    /// An option position is already held.
    HoldingPosition,
    /// Fewer shares than one contract covers.
    InsufficientShares,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ChainUnavailable => write!(f, "option chain not found"),
            Self::NotFound { reason } => write!(f, "no contract selected: {reason}"),
            Self::MarketClosed => write!(f, "market closed"),
            Self::HoldingPosition => write!(f, "position already held"),
            Self::InsufficientShares => write!(f, "not enough shares to cover one contract"),
        }
    }
}

/// Result of one decision tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TickOutcome {
    /// An instruction was handed to order placement.
    Submitted(OrderInstruction),
    /// Nothing to do this tick; retry on the next chain update.
    Skipped(SkipReason),
}

impl TickOutcome {
    /// The submitted instruction, if any.
    #[must_use]
    pub const fn instruction(&self) -> Option<&OrderInstruction> {
        match self {
            Self::Submitted(instruction) => Some(instruction),
            Self::Skipped(_) => None,
        }
    }

    /// The skip reason, if skipped.
    #[must_use]
    pub const fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            Self::Submitted(_) => None,
            Self::Skipped(reason) => Some(reason),
        }
    }
}

/// Failures that abort a tick.
#[derive(Debug, Error)]
pub enum UseCaseError {
    /// Malformed selection parameters.
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Chain provider failed.
    #[error(transparent)]
    ChainProvider(#[from] ChainProviderError),

    /// Order placement failed.
    #[error(transparent)]
    OrderPlacement(#[from] OrderPlacementError),

    /// Selected symbol cannot be routed.
    #[error(transparent)]
    InvalidSymbol(#[from] DomainError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::option_chain::OptionRight;

    #[test]
    fn skip_reason_display() {
        let reason = SkipReason::NotFound {
            reason: NotFoundReason::NoContractsOfRight {
                right: OptionRight::Put,
            },
        };
        assert_eq!(reason.to_string(), "no contract selected: no PUT contracts in chain");
        assert_eq!(SkipReason::ChainUnavailable.to_string(), "option chain not found");
    }

    #[test]
    fn tick_outcome_accessors() {
        let outcome = TickOutcome::Skipped(SkipReason::MarketClosed);
        assert!(outcome.instruction().is_none());
        assert_eq!(outcome.skip_reason(), Some(&SkipReason::MarketClosed));
    }
}

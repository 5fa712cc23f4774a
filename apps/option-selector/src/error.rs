//! Stable error classification.
//!
//! Every failure the selector can report maps onto an [`ErrorCode`] whose
//! reason string is stable across releases and safe to match on in log
//! pipelines.
//!
//! | Reason | Raised by |
//! |--------|-----------|
//! | `INVALID_PARAMETER` | Malformed selection or filter parameters |
//! | `UNKNOWN_RIGHT` | Right string that is neither call nor put |
//! | `CONTRACT_NOT_FOUND` | Well-formed selection that matched nothing |
//! | `CHAIN_UNAVAILABLE` | Chain provider failed or published nothing |
//! | `ORDER_REJECTED` | Order placement refused the instruction |
//! | `CONFIG_INVALID` | Configuration failed to load or validate |

use serde::{Deserialize, Serialize};

use crate::application::use_cases::{SkipReason, UseCaseError};
use crate::domain::option_chain::SelectionError;

/// Error codes for the option selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed selection or filter parameter.
    InvalidParameter,
    /// Unrecognized option right.
    UnknownRight,
    /// No contract satisfied the selection criteria.
    ContractNotFound,
    /// Option chain could not be obtained.
    ChainUnavailable,
    /// Order was refused.
    OrderRejected,
    /// Configuration is unreadable or invalid.
    ConfigInvalid,
}

impl ErrorCode {
    /// Get the stable reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidParameter => "INVALID_PARAMETER",
            Self::UnknownRight => "UNKNOWN_RIGHT",
            Self::ContractNotFound => "CONTRACT_NOT_FOUND",
            Self::ChainUnavailable => "CHAIN_UNAVAILABLE",
            Self::OrderRejected => "ORDER_REJECTED",
            Self::ConfigInvalid => "CONFIG_INVALID",
        }
    }

    /// Whether retrying on the next tick can succeed without operator action.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::ContractNotFound | Self::ChainUnavailable)
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

impl SelectionError {
    /// Classify this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidParameter { .. } => ErrorCode::InvalidParameter,
            Self::UnknownRight { .. } => ErrorCode::UnknownRight,
        }
    }
}

impl UseCaseError {
    /// Classify this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Selection(e) => e.code(),
            Self::ChainProvider(_) => ErrorCode::ChainUnavailable,
            Self::OrderPlacement(_) => ErrorCode::OrderRejected,
            Self::InvalidSymbol(_) => ErrorCode::InvalidParameter,
        }
    }
}

impl SkipReason {
    /// Classify a skipped tick, if the skip reflects a failed lookup.
    #[must_use]
    pub const fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::ChainUnavailable => Some(ErrorCode::ChainUnavailable),
            Self::NotFound { .. } => Some(ErrorCode::ContractNotFound),
            Self::MarketClosed | Self::HoldingPosition | Self::InsufficientShares => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{ChainProviderError, OrderPlacementError};
    use crate::domain::option_chain::{NotFoundReason, OptionRight};
    use std::str::FromStr;

    #[test]
    fn reason_strings_are_stable() {
        assert_eq!(ErrorCode::InvalidParameter.to_string(), "INVALID_PARAMETER");
        assert_eq!(
            serde_json::to_string(&ErrorCode::ChainUnavailable).unwrap(),
            r#""CHAIN_UNAVAILABLE""#
        );
    }

    #[test]
    fn selection_error_codes() {
        let err = OptionRight::from_str("straddle").unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnknownRight);

        let err = SelectionError::invalid_parameter("target_dte", "must be non-negative");
        assert_eq!(err.code(), ErrorCode::InvalidParameter);
        assert!(!err.code().is_transient());
    }

    #[test]
    fn use_case_error_codes() {
        let err = UseCaseError::from(OrderPlacementError::Rejected {
            reason: "halted".to_string(),
        });
        assert_eq!(err.code(), ErrorCode::OrderRejected);

        let err = UseCaseError::from(ChainProviderError::Unavailable {
            message: "disk".to_string(),
        });
        assert_eq!(err.code(), ErrorCode::ChainUnavailable);
        assert!(err.code().is_transient());
    }

    #[test]
    fn skip_reason_codes() {
        let skip = SkipReason::NotFound {
            reason: NotFoundReason::EmptyChain,
        };
        assert_eq!(skip.code(), Some(ErrorCode::ContractNotFound));
        assert_eq!(SkipReason::MarketClosed.code(), None);
    }
}

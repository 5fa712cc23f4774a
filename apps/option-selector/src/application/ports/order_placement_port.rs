//! Order Placement Port (Driven Port)
//!
//! Interface for handing a selected contract to order routing.
//! Execution and fills are the host's concern.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::shared::Symbol;

/// How much to trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderQuantity {
    /// Signed contract count (negative sells).
    Contracts(i64),
    /// Signed target weight of portfolio value (negative shorts).
    PortfolioTarget(Decimal),
}

impl OrderQuantity {
    /// Whether this instruction sells / shorts.
    #[must_use]
    pub fn is_sell(&self) -> bool {
        match self {
            Self::Contracts(n) => *n < 0,
            Self::PortfolioTarget(weight) => weight.is_sign_negative() && !weight.is_zero(),
        }
    }
}

/// A directional order instruction emitted after selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderInstruction {
    /// Instruction ID.
    pub id: Uuid,
    /// Contract symbol.
    pub symbol: Symbol,
    /// Quantity.
    pub quantity: OrderQuantity,
    /// Human-readable order tag.
    pub label: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl OrderInstruction {
    /// Create a new instruction.
    #[must_use]
    pub fn new(
        symbol: Symbol,
        quantity: OrderQuantity,
        label: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol,
            quantity,
            label: label.into(),
            created_at,
        }
    }
}

/// Order placement error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum OrderPlacementError {
    /// Order rejected.
    #[error("Order rejected: {reason}")]
    Rejected {
        /// Rejection reason.
        reason: String,
    },

    /// Order routing unavailable.
    #[error("Order routing unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },
}

/// Port for submitting order instructions.
#[async_trait]
pub trait OrderPlacementPort: Send + Sync {
    /// Submit an instruction.
    async fn place_order(&self, instruction: OrderInstruction) -> Result<(), OrderPlacementError>;
}

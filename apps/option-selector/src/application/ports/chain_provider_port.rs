//! Chain Provider Port (Driven Port)
//!
//! Interface for obtaining the option chain published for an underlying.
//! Greeks are expected to be attached by the provider's pricing model.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::option_chain::ChainSnapshot;
use crate::domain::shared::Symbol;

/// Chain provider error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ChainProviderError {
    /// The provider could not be reached.
    #[error("Chain provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// A published chain could not be decoded.
    #[error("Malformed chain for {underlying}: {message}")]
    Malformed {
        /// Underlying whose chain failed to decode.
        underlying: String,
        /// Error details.
        message: String,
    },
}

/// Port for fetching chain snapshots.
#[async_trait]
pub trait ChainProviderPort: Send + Sync {
    /// The chain for `underlying` as of `as_of`.
    ///
    /// Returns `Ok(None)` when no chain is currently published; callers skip
    /// the tick rather than treating it as a failure.
    async fn option_chain(
        &self,
        underlying: &Symbol,
        as_of: NaiveDate,
    ) -> Result<Option<ChainSnapshot>, ChainProviderError>;
}

//! In-memory order sink.
//!
//! Records every instruction instead of routing it to a broker. Used by the
//! CLI for dry runs and by tests.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tracing::info;

use crate::application::ports::{OrderInstruction, OrderPlacementError, OrderPlacementPort};

/// Order placement adapter that keeps instructions in memory.
#[derive(Debug, Default)]
pub struct RecordingOrderSink {
    placed: Mutex<Vec<OrderInstruction>>,
}

impl RecordingOrderSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Instructions placed so far, in placement order.
    #[must_use]
    pub fn instructions(&self) -> Vec<OrderInstruction> {
        self.placed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of placed instructions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.placed.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether nothing has been placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all recorded instructions.
    pub fn clear(&self) {
        self.placed.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

#[async_trait]
impl OrderPlacementPort for RecordingOrderSink {
    async fn place_order(&self, instruction: OrderInstruction) -> Result<(), OrderPlacementError> {
        info!(
            instruction_id = %instruction.id,
            symbol = %instruction.symbol,
            quantity = ?instruction.quantity,
            label = %instruction.label,
            "Order recorded"
        );
        self.placed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(instruction);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::OrderQuantity;
    use crate::domain::shared::Symbol;
    use chrono::Utc;

    fn instruction(symbol: &str, qty: i64) -> OrderInstruction {
        OrderInstruction::new(
            Symbol::new(symbol),
            OrderQuantity::Contracts(qty),
            "test",
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn records_in_order() {
        let sink = RecordingOrderSink::new();
        assert!(sink.is_empty());

        sink.place_order(instruction("SPY240419C00520000", 1)).await.unwrap();
        sink.place_order(instruction("SPY240419P00500000", -1)).await.unwrap();

        let placed = sink.instructions();
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].symbol.as_str(), "SPY240419C00520000");
        assert_eq!(placed[1].quantity, OrderQuantity::Contracts(-1));

        sink.clear();
        assert!(sink.is_empty());
    }
}

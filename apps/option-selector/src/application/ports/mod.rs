//! Application Ports (Driven)
//!
//! Ports define interfaces for the external systems a strategy tick depends on.
//! Both are implemented by the host (or by the adapters in `infrastructure`).

mod chain_provider_port;
mod order_placement_port;

pub use chain_provider_port::{ChainProviderError, ChainProviderPort};
pub use order_placement_port::{
    OrderInstruction, OrderPlacementError, OrderPlacementPort, OrderQuantity,
};

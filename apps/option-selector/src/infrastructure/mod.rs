//! Infrastructure Layer
//!
//! Adapters implementing the application ports.
//!
//! - [`chain_provider`]: in-memory and JSON snapshot file chain providers
//! - [`order_sink`]: in-memory order placement that records instructions

pub mod chain_provider;
pub mod order_sink;

pub use chain_provider::{InMemoryChainProvider, JsonFileChainProvider};
pub use order_sink::RecordingOrderSink;

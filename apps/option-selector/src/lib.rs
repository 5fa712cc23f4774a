// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Option Selector - Rust Core Library
//!
//! Picks a single listed option contract out of a chain snapshot for a
//! strategy decision tick, and drives the entry strategies built on it.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Pure selection logic, synchronous and allocation-light
//!   - `option_chain`: contracts, chain snapshots, `ChainFilter`, `ContractSelector`
//!   - `shared`: symbols and domain errors
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: Interfaces for external systems (`ChainProviderPort`, `OrderPlacementPort`)
//!   - `use_cases`: `OtmEntryUseCase`, `WheelUseCase`
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `chain_provider`: in-memory and JSON snapshot file providers
//!   - `order_sink`: recording order placement

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core selection logic with no I/O.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// Configuration loading and validation.
pub mod config;

/// Stable error classification.
pub mod error;

/// Tracing subscriber setup.
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

pub use application::ports::{
    ChainProviderError, ChainProviderPort, OrderInstruction, OrderPlacementError,
    OrderPlacementPort, OrderQuantity,
};
pub use application::use_cases::{
    OtmEntryParams, OtmEntryUseCase, SkipReason, TickOutcome, UseCaseError, WheelHoldings,
    WheelParams, WheelUseCase,
};
pub use domain::option_chain::{
    ChainFilter, ChainSnapshot, ContractSelector, NotFoundReason, OptionContract, OptionRight,
    Selection, SelectionError,
};
pub use domain::shared::{DomainError, Symbol};
pub use error::ErrorCode;

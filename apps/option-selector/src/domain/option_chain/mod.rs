//! Option Chain Bounded Context
//!
//! This module handles contract selection over an option chain snapshot:
//! - Subscription-time universe shaping (strike window, expiration window)
//! - Delta-targeted selection (closest expiry, then closest |delta|)
//! - Strike-targeted selection (earliest qualifying expiry, OTM-safe strike)
//!
//! Everything here is synchronous and pure: a snapshot is borrowed for one
//! call and never mutated, and nothing is cached between calls.

pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::SelectionError;
pub use services::{ChainFilter, ContractSelector, is_standard_monthly_expiry};
pub use value_objects::{ChainSnapshot, NotFoundReason, OptionContract, OptionRight, Selection};

//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure dependencies.
//! This layer defines:
//!
//! - **Value Objects**: Immutable domain types with equality by value
//! - **Domain Services**: Stateless selection logic over a borrowed chain snapshot
//!
//! # Bounded Contexts
//!
//! - [`option_chain`]: Option chain snapshots, universe filtering and contract selection
//! - [`shared`]: Identifiers shared across contexts

pub mod option_chain;
pub mod shared;

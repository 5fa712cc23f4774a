//! Option Chain Domain Services
//!
//! Stateless services over a borrowed [`ChainSnapshot`](super::ChainSnapshot).

mod chain_filter;
mod contract_selector;

pub use chain_filter::{ChainFilter, is_standard_monthly_expiry};
pub use contract_selector::ContractSelector;

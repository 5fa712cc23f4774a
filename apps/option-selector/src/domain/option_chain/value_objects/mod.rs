//! Option Chain Value Objects

mod chain_snapshot;
mod option_contract;
mod option_right;
mod selection;

pub use chain_snapshot::ChainSnapshot;
pub use option_contract::OptionContract;
pub use option_right::OptionRight;
pub use selection::{NotFoundReason, Selection};

//! Chain provider adapters.
//!
//! Both adapters can carry a subscription [`ChainFilter`] that is re-applied
//! to every snapshot they hand out.

mod in_memory;
mod json_file;

pub use in_memory::InMemoryChainProvider;
pub use json_file::JsonFileChainProvider;

use crate::domain::option_chain::{ChainFilter, ChainSnapshot};

fn apply_subscription(filter: Option<&ChainFilter>, snapshot: ChainSnapshot) -> ChainSnapshot {
    match filter {
        Some(filter) => filter.apply(&snapshot),
        None => snapshot,
    }
}

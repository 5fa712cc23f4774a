//! Application Use Cases
//!
//! Use cases run one strategy decision per tick: fetch the chain, select a
//! contract, hand an order instruction to the placement port.

mod otm_entry;
mod outcome;
mod wheel;

pub use otm_entry::{OtmEntryParams, OtmEntryUseCase};
pub use outcome::{SkipReason, TickOutcome, UseCaseError};
pub use wheel::{WheelHoldings, WheelParams, WheelUseCase};

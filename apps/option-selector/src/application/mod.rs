//! Application Layer
//!
//! The application layer orchestrates domain logic through use cases.
//! It defines:
//!
//! - **Ports**: Interfaces for the chain provider and order placement collaborators
//! - **Use Cases**: Strategy decisions taken once per tick

pub mod ports;
pub mod use_cases;

pub use ports::*;
pub use use_cases::*;

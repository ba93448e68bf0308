//! Core type definitions.
//!
//! Uses newtype patterns for type safety around ports and targets.

mod port;
mod target;

pub use port::{Port, PortError, PortRange};
pub use target::{is_valid_address, ScanTarget, TargetError};

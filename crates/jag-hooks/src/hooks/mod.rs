//! Built-in admission hooks.
//!
//! Each hook is one member of the chain; the gate runs them in configured
//! order and the first non-admit outcome wins.

pub mod defaults;
pub mod logging;
pub mod policy;

pub use defaults::DefaultsHook;
pub use logging::LoggingHook;
pub use policy::{PolicyHook, RejectionReason};

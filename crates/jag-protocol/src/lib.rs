//! JAG Protocol Types
//!
//! Defines the JSON RPC envelope for scheduler↔gate communication.

pub mod error;
pub mod job;
pub mod ops;
pub mod request;
pub mod response;

pub use error::{ErrorCode, RpcError};
pub use job::{JobDescription, JobError};
pub use request::RpcRequest;
pub use response::RpcResponse;

/// Protocol version used for probe requests (sentinel value).
pub const PROTOCOL_VERSION_PROBE: i32 = 0;

/// Minimum protocol version supported by this implementation.
pub const PROTOCOL_MIN: i32 = 1;

/// Maximum protocol version supported by this implementation.
pub const PROTOCOL_MAX: i32 = 1;

/// Current gate version string.
pub const GATE_VERSION: &str = "0.1.0";

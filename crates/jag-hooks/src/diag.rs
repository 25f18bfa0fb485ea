//! Diagnostics capability.
//!
//! The gate reaches the scheduler's user-message and operator-log channels
//! through an explicit capability instead of ambient bindings, so every
//! hook is testable against an in-memory sink.

use std::sync::Mutex;
use thiserror::Error;

/// Prefix stamped on operator-facing log lines.
pub const LOG_PREFIX: &str = "submit_gate/jag: ";

/// Marker prepended to informational user messages.
pub const INFO_MARKER: &str = " [INFO]";

/// Marker prepended to warning user messages.
pub const WARN_MARKER: &str = " [WARN]";

/// Marker prepended to error user messages.
pub const ERROR_MARKER: &str = "[ERROR]";

/// Error raised by a sink that could not accept output.
#[derive(Debug, Clone, Error)]
#[error("diagnostic sink failed: {0}")]
pub struct SinkError(pub String);

/// Destination for the gate's three diagnostic channels.
///
/// `user_msg` is echoed back to the submitting user; `info` and `error`
/// are operator-facing log lines of the respective severity. The
/// submission path depends on bounded-latency return, so implementations
/// must not block: a sink that could stall must fail with `SinkError`
/// instead, which the gate treats as a fault.
pub trait Diagnostics {
    /// Emit a message to the submitting user.
    fn user_msg(&self, msg: &str) -> Result<(), SinkError>;
    /// Emit an informational operator log line.
    fn info(&self, msg: &str) -> Result<(), SinkError>;
    /// Emit an error-severity operator log line.
    fn error(&self, msg: &str) -> Result<(), SinkError>;
}

/// In-memory sink owned by a single gate call.
///
/// Collects each channel in emission order. The worker drains the user
/// channel into the RPC response and forwards the log channels to its
/// operator log; tests assert on all three.
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    user: Mutex<Vec<String>>,
    info: Mutex<Vec<String>>,
    error: Mutex<Vec<String>>,
}

impl CollectingDiagnostics {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// User messages in emission order.
    pub fn user_messages(&self) -> Vec<String> {
        self.user.lock().unwrap().clone()
    }

    /// User messages joined with newlines, or `None` when empty.
    pub fn joined_user_msg(&self) -> Option<String> {
        let user = self.user.lock().unwrap();
        if user.is_empty() {
            None
        } else {
            Some(user.join("\n"))
        }
    }

    /// Informational log lines in emission order.
    pub fn info_lines(&self) -> Vec<String> {
        self.info.lock().unwrap().clone()
    }

    /// Error-severity log lines in emission order.
    pub fn error_lines(&self) -> Vec<String> {
        self.error.lock().unwrap().clone()
    }

    /// Total number of collected records across all channels.
    pub fn record_count(&self) -> usize {
        self.user.lock().unwrap().len()
            + self.info.lock().unwrap().len()
            + self.error.lock().unwrap().len()
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn user_msg(&self, msg: &str) -> Result<(), SinkError> {
        self.user.lock().unwrap().push(msg.to_string());
        Ok(())
    }

    fn info(&self, msg: &str) -> Result<(), SinkError> {
        self.info.lock().unwrap().push(msg.to_string());
        Ok(())
    }

    fn error(&self, msg: &str) -> Result<(), SinkError> {
        self.error.lock().unwrap().push(msg.to_string());
        Ok(())
    }
}

//! Hook fault taxonomy.

use crate::diag::SinkError;
use thiserror::Error;

/// Fault raised while building or emitting diagnostics inside a hook.
///
/// Faults never escape the gate: `SubmissionGate::decide` catches them at
/// its outermost scope and converts them into a negative decision code.
#[derive(Debug, Error)]
pub enum HookFault {
    /// The job description could not be serialized for diagnostics.
    #[error("job description could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A diagnostics sink refused or failed to accept output.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Render an error with its full source chain, outermost first.
///
/// Stands in for a stack trace on the operator's error log.
pub fn render_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

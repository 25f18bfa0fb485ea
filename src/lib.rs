//! JAG Submission Gate - admission gate for cluster workload managers
//!
//! This crate implements the host-side surface of JAG, a job-submission
//! admission gate: a scheduler hands the gate a proposed job and the
//! submitting uid, and the gate's hook chain decides whether the
//! submission proceeds.

pub mod explain;

pub use explain::{EffectivePolicy, ExplainOutput};
pub use jag_hooks::{
    CollectingDiagnostics, Diagnostics, GateConfig, JobDescription, Outcome, SubmissionGate,
};
pub use jag_protocol::{ErrorCode, RpcError, RpcRequest, RpcResponse};
pub use jag_worker::{RpcHandler, WorkerConfig};

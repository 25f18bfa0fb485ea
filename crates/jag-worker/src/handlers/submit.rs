//! Submit operation handler.
//!
//! Runs the hook chain over a proposed job and reports the decision.

use jag_hooks::{CollectingDiagnostics, SubmissionGate};
use jag_protocol::{
    ops::{SubmitRequest, SubmitResponse},
    RpcError, RpcRequest,
};

use super::emit_operator_log;

/// Handle the job_submit operation.
pub fn handle(request: &RpcRequest, gate: &SubmissionGate) -> Result<serde_json::Value, RpcError> {
    let req: SubmitRequest = serde_json::from_value(request.payload.clone())
        .map_err(|e| RpcError::invalid_request(format!("invalid job_submit request: {}", e)))?;

    // Fingerprint the job as received, before hooks touch it.
    let job_fingerprint = req.job.fingerprint().ok();

    let mut job = req.job;
    let diag = CollectingDiagnostics::new();
    let outcome = gate.evaluate_submit(&mut job, req.submit_uid, &diag);

    emit_operator_log(&diag);

    let response = SubmitResponse {
        decision_code: outcome.to_code(),
        outcome,
        user_msg: diag.joined_user_msg(),
        job_fingerprint,
        job: outcome.is_admit().then_some(job),
    };

    serde_json::to_value(response)
        .map_err(|e| RpcError::invalid_request(format!("failed to serialize response: {}", e)))
}

//! Modify operation handler.
//!
//! Runs the hook chain's modify path over an altered job.

use jag_hooks::{CollectingDiagnostics, SubmissionGate};
use jag_protocol::{
    ops::{ModifyRequest, ModifyResponse},
    RpcError, RpcRequest,
};

use super::emit_operator_log;

/// Handle the job_modify operation.
pub fn handle(request: &RpcRequest, gate: &SubmissionGate) -> Result<serde_json::Value, RpcError> {
    let req: ModifyRequest = serde_json::from_value(request.payload.clone())
        .map_err(|e| RpcError::invalid_request(format!("invalid job_modify request: {}", e)))?;

    let mut job = req.job;
    let diag = CollectingDiagnostics::new();
    let outcome = gate.evaluate_modify(&mut job, req.submit_uid, &diag);

    emit_operator_log(&diag);

    let response = ModifyResponse {
        decision_code: outcome.to_code(),
        outcome,
        user_msg: diag.joined_user_msg(),
        job: outcome.is_admit().then_some(job),
    };

    serde_json::to_value(response)
        .map_err(|e| RpcError::invalid_request(format!("failed to serialize response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jag_hooks::GateConfig;
    use jag_protocol::ops::names;

    #[test]
    fn test_modify_admits_by_default() {
        let gate = SubmissionGate::from_config(&GateConfig::default()).unwrap();
        let request = RpcRequest {
            protocol_version: 1,
            op: names::JOB_MODIFY.to_string(),
            request_id: "test-001".to_string(),
            payload: serde_json::json!({
                "job": { "name": "demo", "time_limit": 120 },
                "job_id": 4242,
                "submit_uid": 1001
            }),
        };

        let payload = handle(&request, &gate).unwrap();
        let response: ModifyResponse = serde_json::from_value(payload).unwrap();

        assert_eq!(response.decision_code, 0);
        assert!(response.user_msg.is_none());
        assert_eq!(response.job.unwrap().time_limit, Some(120));
    }
}

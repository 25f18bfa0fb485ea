//! Probe operation handler.
//!
//! Reports the gate's version, protocol range, and configured hook chain.
//! Must work with protocol_version: 0.

use chrono::Utc;
use jag_hooks::SubmissionGate;
use jag_protocol::{ops::ProbeResponse, RpcError, GATE_VERSION};

use crate::config::WorkerConfig;

/// Handle the probe operation.
pub fn handle(config: &WorkerConfig, gate: &SubmissionGate) -> Result<serde_json::Value, RpcError> {
    let response = ProbeResponse {
        kind: "probe".to_string(),
        created_at: Utc::now(),
        gate_version: GATE_VERSION.to_string(),
        protocol_min: config.protocol_min,
        protocol_max: config.protocol_max,
        features: config.features.clone(),
        hooks: gate.hook_names(),
    };

    serde_json::to_value(response)
        .map_err(|e| RpcError::invalid_request(format!("failed to serialize response: {}", e)))
}

//! Probe operation types.
//!
//! The probe operation reports the gate's version, supported protocol
//! range, and configured hook chain.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Probe request payload (typically empty).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProbeRequest {}

/// Probe response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeResponse {
    /// Response kind marker.
    pub kind: String,
    /// When this snapshot was created.
    pub created_at: DateTime<Utc>,
    /// Gate version running on this host.
    pub gate_version: String,
    /// Minimum protocol version supported.
    pub protocol_min: i32,
    /// Maximum protocol version supported.
    pub protocol_max: i32,
    /// Feature flags supported by this gate.
    pub features: Vec<String>,
    /// Names of the configured hooks, in chain order.
    pub hooks: Vec<String>,
}

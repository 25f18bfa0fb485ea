//! Job description and fingerprint computation.
//!
//! The scheduler's job descriptor uses sentinel values for "not set"; on
//! this side of the wire every omittable field is an `Option`. Keys the
//! gate does not model are preserved verbatim in `extra` so a hook chain
//! never drops information the scheduler sent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use thiserror::Error;

/// Error raised while deriving values from a job description.
#[derive(Debug, Error)]
pub enum JobError {
    /// Canonical JSON serialization failed.
    #[error("JCS serialization failed: {0}")]
    Jcs(String),
}

/// A proposed job, as handed to the gate at submission time.
///
/// Owned by the caller for the duration of the call; hooks may mutate it
/// in place (filling defaults) and the modified form is written back to
/// the scheduler on admission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDescription {
    /// Job name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Bank/account the job is charged to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    /// Free-form comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Target partition (queue).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,
    /// Quality-of-service level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qos: Option<String>,
    /// Dependency expression on other jobs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency: Option<String>,
    /// Required node features.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<String>,
    /// Required licenses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub licenses: Option<String>,
    /// Reservation name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation: Option<String>,
    /// Batch script contents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    /// Working directory for the job.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_dir: Option<String>,
    /// Standard input path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub std_in: Option<String>,
    /// Standard output path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub std_out: Option<String>,
    /// Standard error path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub std_err: Option<String>,
    /// Script arguments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub argv: Vec<String>,
    /// Job environment as a key/value map.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<String, String>,
    /// Submitting user id as recorded in the descriptor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u32>,
    /// Submitting group id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<u32>,
    /// Total task count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_tasks: Option<u32>,
    /// CPUs per task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpus_per_task: Option<u16>,
    /// Minimum node count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_nodes: Option<u32>,
    /// Maximum node count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_nodes: Option<u32>,
    /// Wall-clock limit in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u32>,
    /// Minimum memory per node in MiB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_mem_per_node: Option<u64>,
    /// Requested priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    /// Nice adjustment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nice: Option<u32>,
    /// Earliest start time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin_time: Option<DateTime<Utc>>,
    /// Latest acceptable completion time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    /// Requeue on node failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requeue: Option<bool>,
    /// Reboot nodes before the job starts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reboot: Option<bool>,
    /// Descriptor keys this gate does not model, preserved verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl JobDescription {
    /// Compute the job fingerprint: SHA-256 hex digest of the RFC 8785
    /// canonical JSON form. Used for log correlation across the gate and
    /// the scheduler.
    pub fn fingerprint(&self) -> Result<String, JobError> {
        let jcs_bytes = serde_json_canonicalizer::to_vec(self)
            .map_err(|e| JobError::Jcs(e.to_string()))?;

        let mut hasher = Sha256::new();
        hasher.update(&jcs_bytes);
        Ok(hex::encode(hasher.finalize()))
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_fields_are_omitted() {
        let job = JobDescription {
            name: Some("demo".to_string()),
            ..Default::default()
        };
        let json = job.to_json().unwrap();
        assert_eq!(json, r#"{"name":"demo"}"#);
    }

    #[test]
    fn test_unknown_keys_round_trip() {
        let input = r#"{"name":"demo","burst_buffer":"pool=fast","x11":1}"#;
        let job: JobDescription = serde_json::from_str(input).unwrap();
        assert_eq!(job.name.as_deref(), Some("demo"));
        assert_eq!(job.extra.len(), 2);
        assert_eq!(job.extra["burst_buffer"], serde_json::json!("pool=fast"));

        let back = job.to_json().unwrap();
        let reparsed: JobDescription = serde_json::from_str(&back).unwrap();
        assert_eq!(reparsed, job);
    }

    #[test]
    fn test_environment_map() {
        let input = r#"{"environment":{"PATH":"/usr/bin","HOME":"/home/u"}}"#;
        let job: JobDescription = serde_json::from_str(input).unwrap();
        assert_eq!(job.environment["PATH"], "/usr/bin");
        assert_eq!(job.environment.len(), 2);
    }

    #[test]
    fn test_fingerprint_is_sha256_hex() {
        let job = JobDescription {
            name: Some("demo".to_string()),
            ..Default::default()
        };
        let fp = job.fingerprint().unwrap();
        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_fingerprint_is_stable_and_input_sensitive() {
        let a = JobDescription {
            name: Some("demo".to_string()),
            partition: Some("batch".to_string()),
            ..Default::default()
        };
        let b = a.clone();
        assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());

        let c = JobDescription {
            partition: Some("debug".to_string()),
            ..a.clone()
        };
        assert_ne!(a.fingerprint().unwrap(), c.fingerprint().unwrap());
    }
}

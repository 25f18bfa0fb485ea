//! Modify operation types.
//!
//! Invoked when a user alters an already-submitted job. Shares the
//! decision shape with submit.

use crate::job::JobDescription;
use crate::ops::submit::Outcome;
use serde::{Deserialize, Serialize};

/// Modify request payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifyRequest {
    /// The job description with the requested alterations applied.
    pub job: JobDescription,
    /// Scheduler-assigned id of the job being altered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<u32>,
    /// Uid of the requesting principal.
    pub submit_uid: u32,
}

/// Modify response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifyResponse {
    /// Integer decision code: zero admits the alteration, negative rejects.
    pub decision_code: i32,
    /// Structured outcome behind the integer code.
    pub outcome: Outcome,
    /// Messages for the requesting user, newline-joined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_msg: Option<String>,
    /// The job description after hook adjustments, when admitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<JobDescription>,
}

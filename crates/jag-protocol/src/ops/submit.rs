//! Submit operation types.
//!
//! One request per submission attempt; the response carries the decision
//! and, on admission, the possibly-modified job description.

use crate::job::JobDescription;
use serde::{Deserialize, Serialize};

/// Decision code for an admitted submission.
pub const DECISION_ADMIT: i32 = 0;

/// Decision code for a rejected submission (also used for hook faults).
pub const DECISION_REJECT: i32 = -1;

/// Decision code for a deferred submission. Negative, so schedulers that
/// only distinguish admit/abort treat it as a rejection.
pub const DECISION_DEFER: i32 = -2;

/// Submit request payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequest {
    /// The proposed job description.
    pub job: JobDescription,
    /// Uid of the submitting principal. Valid for this call only.
    pub submit_uid: u32,
}

/// Gate outcome enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    /// Admit the submission.
    Admit,
    /// Ask the scheduler to retry the submission later.
    Defer,
    /// Reject the submission.
    Reject,
}

impl Outcome {
    /// Map to the integer decision code the scheduler ABI expects:
    /// zero admits, any negative value aborts the submission.
    pub fn to_code(self) -> i32 {
        match self {
            Self::Admit => DECISION_ADMIT,
            Self::Defer => DECISION_DEFER,
            Self::Reject => DECISION_REJECT,
        }
    }

    /// Check whether this outcome admits the submission.
    pub fn is_admit(self) -> bool {
        matches!(self, Self::Admit)
    }
}

/// Submit response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    /// Integer decision code: zero admits, negative rejects.
    pub decision_code: i32,
    /// Structured outcome behind the integer code.
    pub outcome: Outcome,
    /// Messages for the submitting user, accumulated in emission order and
    /// joined with newlines. Absent when no message was emitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_msg: Option<String>,
    /// Fingerprint of the job as received, for log correlation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_fingerprint: Option<String>,
    /// The job description with hook modifications applied.
    /// Present only when the submission was admitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<JobDescription>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_codes() {
        assert_eq!(Outcome::Admit.to_code(), 0);
        assert_eq!(Outcome::Reject.to_code(), -1);
        assert_eq!(Outcome::Defer.to_code(), -2);
        assert!(Outcome::Admit.is_admit());
        assert!(!Outcome::Defer.is_admit());
    }

    #[test]
    fn test_non_admit_codes_are_negative() {
        for outcome in [Outcome::Defer, Outcome::Reject] {
            assert!(outcome.to_code() < 0);
        }
    }

    #[test]
    fn test_response_omits_job_when_rejected() {
        let response = SubmitResponse {
            decision_code: DECISION_REJECT,
            outcome: Outcome::Reject,
            user_msg: Some("[ERROR] denied".to_string()),
            job_fingerprint: None,
            job: None,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("\"job\""));
        assert!(json.contains("\"REJECT\""));
    }
}

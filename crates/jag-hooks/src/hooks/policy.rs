//! The policy hook: allow/deny lists and limits.

use crate::config::PolicyConfig;
use crate::diag::{Diagnostics, ERROR_MARKER, WARN_MARKER};
use crate::fault::HookFault;
use crate::hook::SubmitHook;
use jag_protocol::job::JobDescription;
use jag_protocol::ops::submit::Outcome;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// Job names must be plain tokens; anything else is rejected.
const JOB_NAME_PATTERN: &str = r"^[A-Za-z0-9._-]+$";

/// Machine-readable rejection reason.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "detail")]
pub enum RejectionReason {
    /// Partition is not in the allowed set.
    #[serde(rename = "PARTITION_NOT_ALLOWED")]
    PartitionNotAllowed(String),

    /// Account is explicitly denied.
    #[serde(rename = "ACCOUNT_DENIED")]
    AccountDenied(String),

    /// Wall-clock limit exceeds the configured cap.
    #[serde(rename = "TIME_LIMIT_EXCEEDED")]
    TimeLimitExceeded { got: u32, max: u32 },

    /// No batch script was supplied.
    #[serde(rename = "MISSING_SCRIPT")]
    MissingScript,

    /// Job name contains characters outside the allowed token set.
    #[serde(rename = "INVALID_JOB_NAME")]
    InvalidJobName(String),
}

impl RejectionReason {
    /// Get a machine-readable string representation.
    pub fn to_code(&self) -> String {
        match self {
            RejectionReason::PartitionNotAllowed(p) => format!("PARTITION_NOT_ALLOWED:{}", p),
            RejectionReason::AccountDenied(a) => format!("ACCOUNT_DENIED:{}", a),
            RejectionReason::TimeLimitExceeded { got, max } => {
                format!("TIME_LIMIT_EXCEEDED:{}>{}", got, max)
            }
            RejectionReason::MissingScript => "MISSING_SCRIPT".to_string(),
            RejectionReason::InvalidJobName(n) => format!("INVALID_JOB_NAME:{}", n),
        }
    }

    /// Format for the submitting user.
    pub fn to_human(&self) -> String {
        match self {
            RejectionReason::PartitionNotAllowed(p) => {
                format!("Partition '{}' is not available for submission.", p)
            }
            RejectionReason::AccountDenied(a) => {
                format!("Account '{}' may not submit jobs.", a)
            }
            RejectionReason::TimeLimitExceeded { got, max } => {
                format!("Time limit {} exceeds the maximum of {} minutes.", got, max)
            }
            RejectionReason::MissingScript => "A batch script is required.".to_string(),
            RejectionReason::InvalidJobName(n) => {
                format!("Job name '{}' contains invalid characters.", n)
            }
        }
    }
}

/// Validates the (defaults-adjusted) submission against configured
/// constraints. Any reason present rejects; reasons are reported to the
/// user with the error marker and to the error log by code.
pub struct PolicyHook {
    policy: PolicyConfig,
    name_pattern: Regex,
}

impl PolicyHook {
    /// Create a policy hook from its config section.
    pub fn new(policy: PolicyConfig) -> Self {
        Self {
            policy,
            name_pattern: Regex::new(JOB_NAME_PATTERN).expect("job name pattern compiles"),
        }
    }

    /// Collect every violated constraint.
    pub fn evaluate(&self, job: &JobDescription) -> Vec<RejectionReason> {
        let mut reasons = Vec::new();

        if let Some(ref partition) = job.partition {
            if !self.policy.allowed_partitions.is_empty()
                && !self.policy.allowed_partitions.contains(partition)
            {
                reasons.push(RejectionReason::PartitionNotAllowed(partition.clone()));
            }
        }

        if let Some(ref account) = job.account {
            if self.policy.denied_accounts.contains(account) {
                reasons.push(RejectionReason::AccountDenied(account.clone()));
            }
        }

        if let (Some(got), Some(max)) = (job.time_limit, self.policy.max_time_limit) {
            if got > max {
                reasons.push(RejectionReason::TimeLimitExceeded { got, max });
            }
        }

        if self.policy.require_script && job.script.is_none() {
            reasons.push(RejectionReason::MissingScript);
        }

        if let Some(ref name) = job.name {
            if !self.name_pattern.is_match(name) {
                reasons.push(RejectionReason::InvalidJobName(name.clone()));
            }
        }

        reasons
    }
}

impl SubmitHook for PolicyHook {
    fn name(&self) -> &'static str {
        "policy"
    }

    fn on_submit(
        &self,
        job: &mut JobDescription,
        _submit_uid: u32,
        diag: &dyn Diagnostics,
    ) -> Result<Outcome, HookFault> {
        if self.policy.warn_missing_account && job.account.is_none() {
            diag.user_msg(&format!(
                "{} No account given; usage will not be attributed.",
                WARN_MARKER
            ))?;
        }

        let reasons = self.evaluate(job);
        if reasons.is_empty() {
            return Ok(Outcome::Admit);
        }

        for reason in &reasons {
            diag.user_msg(&format!("{} {}", ERROR_MARKER, reason.to_human()))?;
            diag.error(&format!("submission rejected: {}", reason.to_code()))?;
        }

        Ok(Outcome::Reject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::CollectingDiagnostics;

    fn test_policy() -> PolicyConfig {
        PolicyConfig {
            allowed_partitions: ["batch", "debug"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            denied_accounts: ["blocked"].iter().map(|s| s.to_string()).collect(),
            max_time_limit: Some(1440),
            require_script: false,
            warn_missing_account: false,
        }
    }

    fn run(hook: &PolicyHook, mut job: JobDescription) -> (Outcome, CollectingDiagnostics) {
        let diag = CollectingDiagnostics::new();
        let outcome = hook.on_submit(&mut job, 1001, &diag).unwrap();
        (outcome, diag)
    }

    #[test]
    fn test_admits_conforming_job() {
        let hook = PolicyHook::new(test_policy());
        let job = JobDescription {
            name: Some("demo".to_string()),
            partition: Some("batch".to_string()),
            time_limit: Some(60),
            ..Default::default()
        };
        let (outcome, diag) = run(&hook, job);
        assert_eq!(outcome, Outcome::Admit);
        assert_eq!(diag.record_count(), 0);
    }

    #[test]
    fn test_rejects_unknown_partition() {
        let hook = PolicyHook::new(test_policy());
        let job = JobDescription {
            partition: Some("gpu".to_string()),
            ..Default::default()
        };
        let (outcome, diag) = run(&hook, job);
        assert_eq!(outcome, Outcome::Reject);
        assert!(diag.user_messages()[0].starts_with("[ERROR]"));
        assert!(diag.error_lines()[0].contains("PARTITION_NOT_ALLOWED:gpu"));
    }

    #[test]
    fn test_rejects_denied_account() {
        let hook = PolicyHook::new(test_policy());
        let job = JobDescription {
            account: Some("blocked".to_string()),
            ..Default::default()
        };
        let (outcome, diag) = run(&hook, job);
        assert_eq!(outcome, Outcome::Reject);
        assert!(diag.error_lines()[0].contains("ACCOUNT_DENIED:blocked"));
    }

    #[test]
    fn test_rejects_time_limit_over_cap() {
        let hook = PolicyHook::new(test_policy());
        let job = JobDescription {
            time_limit: Some(2000),
            ..Default::default()
        };
        let (outcome, diag) = run(&hook, job);
        assert_eq!(outcome, Outcome::Reject);
        assert!(diag.error_lines()[0].contains("TIME_LIMIT_EXCEEDED:2000>1440"));
    }

    #[test]
    fn test_requires_script_when_configured() {
        let mut policy = test_policy();
        policy.require_script = true;
        let hook = PolicyHook::new(policy);

        let (outcome, _) = run(&hook, JobDescription::default());
        assert_eq!(outcome, Outcome::Reject);

        let job = JobDescription {
            script: Some("#!/bin/sh\ntrue\n".to_string()),
            ..Default::default()
        };
        let (outcome, _) = run(&hook, job);
        assert_eq!(outcome, Outcome::Admit);
    }

    #[test]
    fn test_rejects_invalid_job_name() {
        let hook = PolicyHook::new(test_policy());
        let job = JobDescription {
            name: Some("bad name!".to_string()),
            ..Default::default()
        };
        let (outcome, diag) = run(&hook, job);
        assert_eq!(outcome, Outcome::Reject);
        assert!(diag.error_lines()[0].contains("INVALID_JOB_NAME"));
    }

    #[test]
    fn test_collects_multiple_reasons() {
        let hook = PolicyHook::new(test_policy());
        let job = JobDescription {
            partition: Some("gpu".to_string()),
            account: Some("blocked".to_string()),
            time_limit: Some(9999),
            ..Default::default()
        };
        let reasons = hook.evaluate(&job);
        assert_eq!(reasons.len(), 3);
    }

    #[test]
    fn test_empty_policy_admits_everything() {
        let hook = PolicyHook::new(PolicyConfig::default());
        let job = JobDescription {
            partition: Some("anything".to_string()),
            account: Some("anyone".to_string()),
            time_limit: Some(1_000_000),
            ..Default::default()
        };
        let (outcome, diag) = run(&hook, job);
        assert_eq!(outcome, Outcome::Admit);
        assert_eq!(diag.record_count(), 0);
    }

    #[test]
    fn test_warn_missing_account_does_not_reject() {
        let mut policy = test_policy();
        policy.warn_missing_account = true;
        let hook = PolicyHook::new(policy);

        let (outcome, diag) = run(&hook, JobDescription::default());
        assert_eq!(outcome, Outcome::Admit);
        assert_eq!(diag.user_messages().len(), 1);
        assert!(diag.user_messages()[0].starts_with(" [WARN]"));
    }
}

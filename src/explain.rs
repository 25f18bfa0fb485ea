//! Explain command output for the gate
//!
//! Provides structured JSON and human-readable explanations of gate
//! decisions for diagnostic purposes. Explain runs the real hook chain
//! against an in-memory sink, so nothing reaches a scheduler channel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use jag_hooks::{CollectingDiagnostics, ConfigError, GateConfig, Outcome, SubmissionGate};
use jag_protocol::job::JobDescription;

/// Explanation output for a gate decision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainOutput {
    /// When the explanation was produced
    pub evaluated_at: DateTime<Utc>,

    /// Uid the decision was evaluated for
    pub submit_uid: u32,

    /// Integer decision code: zero admits, negative rejects
    pub decision_code: i32,

    /// Structured outcome behind the code
    pub outcome: Outcome,

    /// Hook chain that produced the decision, in order
    pub hooks: Vec<String>,

    /// What the submitting user would have seen
    pub user_messages: Vec<String>,

    /// Informational operator log lines
    pub info_log: Vec<String>,

    /// Error-severity operator log lines
    pub error_log: Vec<String>,

    /// The job description after hook adjustments
    pub job_after: JobDescription,

    /// The constraints in force during evaluation
    pub effective_policy: EffectivePolicy,
}

/// The effective constraints used for the decision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectivePolicy {
    /// Partitions jobs may target (empty means any)
    pub allowed_partitions: Vec<String>,

    /// Accounts that may not submit
    pub denied_accounts: Vec<String>,

    /// Hard cap on the wall-clock limit, in minutes
    pub max_time_limit: Option<u32>,

    /// Whether a batch script is required
    pub require_script: bool,
}

impl ExplainOutput {
    /// Evaluate a job against the configured chain and capture everything
    /// a decision would have emitted.
    pub fn evaluate(
        config: &GateConfig,
        mut job: JobDescription,
        submit_uid: u32,
    ) -> Result<Self, ConfigError> {
        let gate = SubmissionGate::from_config(config)?;
        let diag = CollectingDiagnostics::new();

        let outcome = gate.evaluate_submit(&mut job, submit_uid, &diag);

        Ok(Self {
            evaluated_at: Utc::now(),
            submit_uid,
            decision_code: outcome.to_code(),
            outcome,
            hooks: gate.hook_names(),
            user_messages: diag.user_messages(),
            info_log: diag.info_lines(),
            error_log: diag.error_lines(),
            job_after: job,
            effective_policy: EffectivePolicy {
                allowed_partitions: config.policy.allowed_partitions.iter().cloned().collect(),
                denied_accounts: config.policy.denied_accounts.iter().cloned().collect(),
                max_time_limit: config.policy.max_time_limit,
                require_script: config.policy.require_script,
            },
        })
    }

    /// Whether the job would have been admitted
    pub fn admitted(&self) -> bool {
        self.outcome.is_admit()
    }

    /// Format as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Format as human-readable text
    pub fn to_human(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!(
            "Decision: {} (code {})",
            match self.outcome {
                Outcome::Admit => "ADMITTED",
                Outcome::Defer => "DEFERRED",
                Outcome::Reject => "REJECTED",
            },
            self.decision_code
        ));
        lines.push(format!("Hook chain: {}", self.hooks.join(" -> ")));
        lines.push(String::new());

        if !self.user_messages.is_empty() {
            lines.push("User messages:".to_string());
            for msg in &self.user_messages {
                lines.push(format!("  {}", msg));
            }
            lines.push(String::new());
        }

        if !self.info_log.is_empty() {
            lines.push("Info log:".to_string());
            for msg in &self.info_log {
                lines.push(format!("  {}", msg));
            }
            lines.push(String::new());
        }

        if !self.error_log.is_empty() {
            lines.push("Error log:".to_string());
            for msg in &self.error_log {
                lines.push(format!("  {}", msg));
            }
            lines.push(String::new());
        }

        lines.push("--- Effective Policy ---".to_string());
        lines.push(format!(
            "Allowed partitions: {}",
            if self.effective_policy.allowed_partitions.is_empty() {
                "(any)".to_string()
            } else {
                self.effective_policy.allowed_partitions.join(", ")
            }
        ));
        lines.push(format!(
            "Denied accounts: {}",
            if self.effective_policy.denied_accounts.is_empty() {
                "(none)".to_string()
            } else {
                self.effective_policy.denied_accounts.join(", ")
            }
        ));
        if let Some(max) = self.effective_policy.max_time_limit {
            lines.push(format!("Max time limit: {} minutes", max));
        }
        lines.push(format!(
            "Script required: {}",
            if self.effective_policy.require_script {
                "yes"
            } else {
                "no"
            }
        ));

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_job() -> JobDescription {
        JobDescription {
            name: Some("demo".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_explain_admitted() {
        let config = GateConfig::default();
        let explain = ExplainOutput::evaluate(&config, demo_job(), 1001).unwrap();

        assert!(explain.admitted());
        assert_eq!(explain.decision_code, 0);
        assert_eq!(explain.hooks, vec!["logging", "defaults", "policy"]);
        assert_eq!(explain.user_messages.len(), 2);
        assert_eq!(explain.info_log.len(), 1);
        assert_eq!(explain.error_log.len(), 1);
    }

    #[test]
    fn test_explain_rejected() {
        let config = GateConfig::from_toml_str(
            r#"
            [policy]
            allowed_partitions = ["batch"]
            "#,
        )
        .unwrap();
        let job = JobDescription {
            partition: Some("gpu".to_string()),
            ..demo_job()
        };

        let explain = ExplainOutput::evaluate(&config, job, 1001).unwrap();

        assert!(!explain.admitted());
        assert!(explain.decision_code < 0);
        assert!(explain
            .error_log
            .iter()
            .any(|l| l.contains("PARTITION_NOT_ALLOWED")));
    }

    #[test]
    fn test_explain_reports_applied_defaults() {
        let config = GateConfig::from_toml_str(
            r#"
            [defaults]
            partition = "batch"
            "#,
        )
        .unwrap();

        let explain = ExplainOutput::evaluate(&config, demo_job(), 1001).unwrap();

        assert!(explain.admitted());
        assert_eq!(explain.job_after.partition.as_deref(), Some("batch"));
        assert!(explain
            .info_log
            .iter()
            .any(|l| l.contains("default applied: partition=batch")));
    }

    #[test]
    fn test_explain_to_json() {
        let config = GateConfig::default();
        let explain = ExplainOutput::evaluate(&config, demo_job(), 1001).unwrap();

        let json = explain.to_json().unwrap();
        assert!(json.contains("\"decision_code\": 0"));
        assert!(json.contains("\"outcome\": \"ADMIT\""));
    }

    #[test]
    fn test_explain_to_human() {
        let config = GateConfig::default();
        let explain = ExplainOutput::evaluate(&config, demo_job(), 1001).unwrap();

        let human = explain.to_human();
        assert!(human.contains("Decision: ADMITTED"));
        assert!(human.contains("Hook chain: logging -> defaults -> policy"));
        assert!(human.contains("Effective Policy"));
    }
}

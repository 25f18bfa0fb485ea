//! Admission-hook chain for job submission.
//!
//! A scheduler hands the gate a proposed job description and the
//! submitting uid; the gate runs its hook chain, emits diagnostics
//! through an explicit [`Diagnostics`] capability, and returns an integer
//! decision code: zero admits, any negative value rejects.

pub mod config;
pub mod diag;
pub mod fault;
pub mod hook;
pub mod hooks;

pub use config::{ConfigError, DefaultsConfig, GateConfig, HooksConfig, PolicyConfig};
pub use diag::{
    CollectingDiagnostics, Diagnostics, SinkError, ERROR_MARKER, INFO_MARKER, LOG_PREFIX,
    WARN_MARKER,
};
pub use fault::{render_chain, HookFault};
pub use hook::SubmitHook;
pub use hooks::{DefaultsHook, LoggingHook, PolicyHook, RejectionReason};
pub use jag_protocol::job::JobDescription;
pub use jag_protocol::ops::submit::Outcome;

/// The submission gate: an ordered admission-hook chain.
///
/// Stateless across calls and safe for concurrent invocation; the only
/// mutable state a call touches is the job it was handed and the sink it
/// was handed.
pub struct SubmissionGate {
    hooks: Vec<Box<dyn SubmitHook>>,
}

impl SubmissionGate {
    /// Create a gate from an explicit hook chain.
    pub fn new(hooks: Vec<Box<dyn SubmitHook>>) -> Self {
        Self { hooks }
    }

    /// Build the chain named by `[hooks].enabled`, in order.
    pub fn from_config(config: &GateConfig) -> Result<Self, ConfigError> {
        let mut hooks: Vec<Box<dyn SubmitHook>> = Vec::new();
        for name in &config.hooks.enabled {
            match name.as_str() {
                "logging" => hooks.push(Box::new(LoggingHook)),
                "defaults" => hooks.push(Box::new(DefaultsHook::new(config.defaults.clone()))),
                "policy" => hooks.push(Box::new(PolicyHook::new(config.policy.clone()))),
                other => return Err(ConfigError::UnknownHook(other.to_string())),
            }
        }
        Ok(Self::new(hooks))
    }

    /// Names of the configured hooks, in chain order.
    pub fn hook_names(&self) -> Vec<String> {
        self.hooks.iter().map(|h| h.name().to_string()).collect()
    }

    /// Decide a submission attempt.
    ///
    /// The scheduler-facing contract: returns the integer decision code
    /// and never panics or propagates an error. See [`Self::evaluate_submit`]
    /// for the structured outcome.
    pub fn decide(
        &self,
        job: &mut JobDescription,
        submit_uid: u32,
        diag: &dyn Diagnostics,
    ) -> i32 {
        self.evaluate_submit(job, submit_uid, diag).to_code()
    }

    /// Run the submit chain, mapping any fault to a rejection.
    ///
    /// On fault the full detail (source chain included) goes to the error
    /// log and a one-line summary with the error marker goes to the user
    /// channel; both emissions are best-effort.
    pub fn evaluate_submit(
        &self,
        job: &mut JobDescription,
        submit_uid: u32,
        diag: &dyn Diagnostics,
    ) -> Outcome {
        match self.run_chain(job, submit_uid, diag, false) {
            Ok(outcome) => outcome,
            Err(fault) => Self::report_fault(fault, diag),
        }
    }

    /// Decide an alteration of an already-submitted job.
    pub fn decide_modify(
        &self,
        job: &mut JobDescription,
        submit_uid: u32,
        diag: &dyn Diagnostics,
    ) -> i32 {
        self.evaluate_modify(job, submit_uid, diag).to_code()
    }

    /// Run the modify chain, mapping any fault to a rejection.
    pub fn evaluate_modify(
        &self,
        job: &mut JobDescription,
        submit_uid: u32,
        diag: &dyn Diagnostics,
    ) -> Outcome {
        match self.run_chain(job, submit_uid, diag, true) {
            Ok(outcome) => outcome,
            Err(fault) => Self::report_fault(fault, diag),
        }
    }

    /// Run hooks in order; the first non-admit outcome wins.
    fn run_chain(
        &self,
        job: &mut JobDescription,
        submit_uid: u32,
        diag: &dyn Diagnostics,
        modify: bool,
    ) -> Result<Outcome, HookFault> {
        for hook in &self.hooks {
            let outcome = if modify {
                hook.on_modify(job, submit_uid, diag)?
            } else {
                hook.on_submit(job, submit_uid, diag)?
            };
            if !outcome.is_admit() {
                return Ok(outcome);
            }
        }
        Ok(Outcome::Admit)
    }

    fn report_fault(fault: HookFault, diag: &dyn Diagnostics) -> Outcome {
        let _ = diag.error(&render_chain(&fault));
        let _ = diag.user_msg(&format!("{} {}", ERROR_MARKER, fault));
        Outcome::Reject
    }
}

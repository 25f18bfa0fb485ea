//! The admission-hook seam.

use crate::diag::Diagnostics;
use crate::fault::HookFault;
use jag_protocol::job::JobDescription;
use jag_protocol::ops::submit::Outcome;

/// An admission hook, invoked once per submission attempt.
///
/// Hooks may mutate the job description in place; on admission the
/// modified form is written back to the scheduler. Implementations hold
/// no per-call state and must be safe to invoke concurrently for
/// distinct submissions.
pub trait SubmitHook: Send + Sync {
    /// Stable name of this hook, as listed by probe and config.
    fn name(&self) -> &'static str;

    /// Evaluate a proposed submission.
    fn on_submit(
        &self,
        job: &mut JobDescription,
        submit_uid: u32,
        diag: &dyn Diagnostics,
    ) -> Result<Outcome, HookFault>;

    /// Evaluate an alteration of an already-submitted job.
    ///
    /// Admits unconditionally unless overridden.
    fn on_modify(
        &self,
        _job: &mut JobDescription,
        _submit_uid: u32,
        _diag: &dyn Diagnostics,
    ) -> Result<Outcome, HookFault> {
        Ok(Outcome::Admit)
    }
}

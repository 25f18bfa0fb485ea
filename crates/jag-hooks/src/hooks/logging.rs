//! The logging hook: a diagnostics tap that admits everything.

use crate::diag::{Diagnostics, INFO_MARKER};
use crate::fault::HookFault;
use crate::hook::SubmitHook;
use jag_protocol::job::JobDescription;
use jag_protocol::ops::submit::Outcome;

/// Echoes the submission back to the user and stamps the operator logs.
///
/// Emits, in order: the serialized job description and an informational
/// line to the user channel, then the same line to the info log and to
/// the error log. Yes, the error log too — downstream log tooling
/// matches on that line.
///
/// Applies no policy: every call whose diagnostics complete admits.
#[derive(Debug, Default)]
pub struct LoggingHook;

impl SubmitHook for LoggingHook {
    fn name(&self) -> &'static str {
        "logging"
    }

    fn on_submit(
        &self,
        job: &mut JobDescription,
        submit_uid: u32,
        diag: &dyn Diagnostics,
    ) -> Result<Outcome, HookFault> {
        diag.user_msg(&job.to_json()?)?;

        let msg = format!("{} Job submitted by {}.", INFO_MARKER, submit_uid);
        diag.user_msg(&msg)?;
        diag.info(&msg)?;
        diag.error(&msg)?;

        Ok(Outcome::Admit)
    }
}

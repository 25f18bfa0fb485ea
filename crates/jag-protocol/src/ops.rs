//! Operation-specific types.

pub mod modify;
pub mod probe;
pub mod submit;

pub use modify::{ModifyRequest, ModifyResponse};
pub use probe::{ProbeRequest, ProbeResponse};
pub use submit::{Outcome, SubmitRequest, SubmitResponse};

/// Known operation names.
pub mod names {
    pub const PROBE: &str = "probe";
    pub const JOB_SUBMIT: &str = "job_submit";
    pub const JOB_MODIFY: &str = "job_modify";
}

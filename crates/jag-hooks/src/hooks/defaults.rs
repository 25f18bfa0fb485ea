//! The defaults hook: fills unset job fields from config.

use crate::config::DefaultsConfig;
use crate::diag::Diagnostics;
use crate::fault::HookFault;
use crate::hook::SubmitHook;
use jag_protocol::job::JobDescription;
use jag_protocol::ops::submit::Outcome;

/// Assigns configured default values to fields the submission left unset.
///
/// Never overrides a value the user set explicitly, and always admits.
/// Each applied default is reported on the info log.
#[derive(Debug, Default)]
pub struct DefaultsHook {
    defaults: DefaultsConfig,
}

impl DefaultsHook {
    /// Create a defaults hook from its config section.
    pub fn new(defaults: DefaultsConfig) -> Self {
        Self { defaults }
    }
}

impl SubmitHook for DefaultsHook {
    fn name(&self) -> &'static str {
        "defaults"
    }

    fn on_submit(
        &self,
        job: &mut JobDescription,
        _submit_uid: u32,
        diag: &dyn Diagnostics,
    ) -> Result<Outcome, HookFault> {
        let mut applied: Vec<String> = Vec::new();

        if job.partition.is_none() {
            if let Some(ref partition) = self.defaults.partition {
                job.partition = Some(partition.clone());
                applied.push(format!("partition={}", partition));
            }
        }
        if job.account.is_none() {
            if let Some(ref account) = self.defaults.account {
                job.account = Some(account.clone());
                applied.push(format!("account={}", account));
            }
        }
        if job.time_limit.is_none() {
            if let Some(time_limit) = self.defaults.time_limit {
                job.time_limit = Some(time_limit);
                applied.push(format!("time_limit={}", time_limit));
            }
        }
        if job.min_nodes.is_none() {
            if let Some(min_nodes) = self.defaults.min_nodes {
                job.min_nodes = Some(min_nodes);
                applied.push(format!("min_nodes={}", min_nodes));
            }
        }

        for entry in &applied {
            diag.info(&format!("default applied: {}", entry))?;
        }

        Ok(Outcome::Admit)
    }
}

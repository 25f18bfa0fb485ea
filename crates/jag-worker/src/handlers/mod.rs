//! Operation handlers for the worker RPC.
//!
//! Each operation has its own handler module that processes requests
//! and returns response payloads.

pub mod modify;
pub mod probe;
pub mod submit;

use chrono::Utc;
use jag_hooks::{CollectingDiagnostics, LOG_PREFIX};

/// Forward a call's collected log channels to the operator log (stderr;
/// stdout carries the RPC response).
pub(crate) fn emit_operator_log(diag: &CollectingDiagnostics) {
    let stamp = Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ");
    for line in diag.info_lines() {
        eprintln!("{} info {}{}", stamp, LOG_PREFIX, line);
    }
    for line in diag.error_lines() {
        eprintln!("{} error {}{}", stamp, LOG_PREFIX, line);
    }
}

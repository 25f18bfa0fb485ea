//! JAG Submission-Gate Worker
//!
//! The worker is a binary the scheduler invokes at its submission hook
//! point. It implements the stdin/stdout JSON RPC protocol for deciding
//! job submissions.
//!
//! This crate can be used in two modes:
//! - **Standalone binary**: invoked by the scheduler's plugin shim
//! - **In-process library**: for unit and integration testing, and for
//!   the host CLI's dry-run commands

pub mod config;
pub mod handlers;
pub mod rpc;

pub use config::WorkerConfig;
pub use rpc::RpcHandler;

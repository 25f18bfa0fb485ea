//! JAG Worker Entrypoint
//!
//! Usage: jag-worker gate rpc
//!
//! Reads a single JSON RPC request from stdin, dispatches to the
//! appropriate handler, and writes a JSON response to stdout. Designed
//! to be invoked from the scheduler's submission hook point.

use std::process::ExitCode;

use jag_hooks::{GateConfig, SubmissionGate};
use jag_worker::{RpcHandler, WorkerConfig};

fn main() -> ExitCode {
    // For now, we only support the "gate rpc" subcommand
    let args: Vec<String> = std::env::args().collect();

    if args.len() >= 3 && args[1] == "gate" && args[2] == "rpc" {
        let config = WorkerConfig::default();

        // A missing config file means the stock chain; a broken one is fatal.
        let gate_config = if config.gate_config_path.exists() {
            match GateConfig::from_file(&config.gate_config_path) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Gate config error: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        } else {
            GateConfig::default()
        };

        let gate = match SubmissionGate::from_config(&gate_config) {
            Ok(g) => g,
            Err(e) => {
                eprintln!("Gate config error: {}", e);
                return ExitCode::FAILURE;
            }
        };

        let handler = RpcHandler::new(config, gate);

        if let Err(e) = handler.run() {
            eprintln!("RPC handler error: {}", e);
            return ExitCode::FAILURE;
        }

        ExitCode::SUCCESS
    } else {
        eprintln!("Usage: jag-worker gate rpc");
        eprintln!();
        eprintln!("Runs the RPC handler, reading JSON from stdin and writing to stdout.");
        ExitCode::FAILURE
    }
}

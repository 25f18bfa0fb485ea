//! JAG Submission Gate CLI
//!
//! Entry point for the `jag-submit` command-line tool.

use clap::{Parser, Subcommand};
use std::io::Cursor;
use std::path::PathBuf;
use std::process;

use jag_submit_gate::{
    ExplainOutput, GateConfig, JobDescription, RpcHandler, RpcRequest, RpcResponse,
    SubmissionGate, WorkerConfig,
};

#[derive(Parser)]
#[command(name = "jag-submit")]
#[command(about = "Job-submission admission gate", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Explain a gate decision without touching real sinks
    Explain {
        /// Output in human-readable format instead of JSON
        #[arg(long)]
        human: bool,

        /// Path to gate config file (default: .jag/gate.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Uid to evaluate the submission as
        #[arg(long, default_value_t = 0)]
        uid: u32,

        /// Path to the job description JSON file
        job: PathBuf,
    },

    /// Verify the gate configuration
    Verify {
        /// Path to gate config file (default: .jag/gate.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },

    /// Run a job file through the full RPC path and print the response
    Decide {
        /// Path to gate config file (default: .jag/gate.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Uid to evaluate the submission as
        #[arg(long, default_value_t = 0)]
        uid: u32,

        /// Output the raw response JSON
        #[arg(long)]
        json: bool,

        /// Path to the job description JSON file
        job: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Explain {
            human,
            config,
            uid,
            job,
        } => {
            run_explain(human, config, uid, &job);
        }
        Commands::Verify { config } => {
            run_verify(config);
        }
        Commands::Decide {
            config,
            uid,
            json,
            job,
        } => {
            run_decide(config, uid, json, &job);
        }
    }
}

fn run_explain(human: bool, config_path: Option<PathBuf>, uid: u32, job_path: &PathBuf) {
    let config = load_gate_config(config_path);
    let job = load_job(job_path);

    let explanation = match ExplainOutput::evaluate(&config, job, uid) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error building gate: {}", e);
            process::exit(1);
        }
    };

    if human {
        println!("{}", explanation.to_human());
    } else {
        match explanation.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    }

    if explanation.admitted() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn run_verify(config_path: Option<PathBuf>) {
    let path = config_path.unwrap_or_else(|| PathBuf::from(".jag/gate.toml"));

    let config = match GateConfig::from_file(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    };

    // Building the chain catches unknown hook names too.
    if let Err(e) = SubmissionGate::from_config(&config) {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    }

    println!("Configuration valid: {}", path.display());
    println!();
    println!("  Hooks: {}", config.hooks.enabled.join(", "));
    if let Some(ref partition) = config.defaults.partition {
        println!("  Default partition: {}", partition);
    }
    if let Some(ref account) = config.defaults.account {
        println!("  Default account: {}", account);
    }
    if let Some(time_limit) = config.defaults.time_limit {
        println!("  Default time limit: {} minutes", time_limit);
    }
    if !config.policy.allowed_partitions.is_empty() {
        println!(
            "  Allowed partitions: {}",
            config
                .policy
                .allowed_partitions
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    if !config.policy.denied_accounts.is_empty() {
        println!("  Denied accounts: {}", config.policy.denied_accounts.len());
    }
    if let Some(max) = config.policy.max_time_limit {
        println!("  Max time limit: {} minutes", max);
    }
    if config.policy.require_script {
        println!("  Script required: yes");
    }
}

fn run_decide(config_path: Option<PathBuf>, uid: u32, json_output: bool, job_path: &PathBuf) {
    let config = load_gate_config(config_path);
    let job = load_job(job_path);

    let gate = match SubmissionGate::from_config(&config) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error building gate: {}", e);
            process::exit(1);
        }
    };

    let request = RpcRequest {
        protocol_version: 1,
        op: "job_submit".to_string(),
        request_id: format!("cli-{}", ulid::Ulid::new()),
        payload: serde_json::json!({
            "job": job,
            "submit_uid": uid,
        }),
    };

    let request_json = match serde_json::to_string(&request) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error serializing request: {}", e);
            process::exit(1);
        }
    };

    let handler = RpcHandler::new(WorkerConfig::default(), gate);
    let mut reader = Cursor::new(format!("{}\n", request_json));
    let mut output = Vec::new();

    if let Err(e) = handler.run_with_io(&mut reader, &mut output) {
        eprintln!("RPC handler error: {}", e);
        process::exit(1);
    }

    let response: RpcResponse = match serde_json::from_slice(&output) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Failed to parse response: {}", e);
            process::exit(1);
        }
    };

    if json_output {
        match serde_json::to_string_pretty(&response) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        print_decision(&response);
    }

    let admitted = response
        .payload
        .as_ref()
        .and_then(|p| p.get("decision_code"))
        .and_then(|c| c.as_i64())
        .map(|c| c == 0)
        .unwrap_or(false);

    process::exit(if admitted { 0 } else { 1 });
}

fn print_decision(response: &RpcResponse) {
    if !response.ok {
        if let Some(ref error) = response.error {
            eprintln!("RPC error: {}", error);
        } else {
            eprintln!("RPC error: (no detail)");
        }
        return;
    }

    let payload = match response.payload {
        Some(ref p) => p,
        None => {
            eprintln!("Response missing payload");
            return;
        }
    };

    let code = payload
        .get("decision_code")
        .and_then(|c| c.as_i64())
        .unwrap_or(-1);
    let outcome = payload
        .get("outcome")
        .and_then(|o| o.as_str())
        .unwrap_or("REJECT");
    println!("Decision: {} (code {})", outcome, code);

    if let Some(fingerprint) = payload.get("job_fingerprint").and_then(|f| f.as_str()) {
        println!("Job fingerprint: {}", fingerprint);
    }

    if let Some(user_msg) = payload.get("user_msg").and_then(|m| m.as_str()) {
        println!();
        for line in user_msg.lines() {
            println!("  {}", line);
        }
    }
}

fn load_gate_config(config_path: Option<PathBuf>) -> GateConfig {
    let path = config_path.unwrap_or_else(|| PathBuf::from(".jag/gate.toml"));

    if path.exists() {
        match GateConfig::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                process::exit(1);
            }
        }
    } else {
        // Use the stock chain when no file exists
        GateConfig::default()
    }
}

fn load_job(path: &PathBuf) -> JobDescription {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading job file {}: {}", path.display(), e);
            process::exit(1);
        }
    };

    match serde_json::from_str(&contents) {
        Ok(job) => job,
        Err(e) => {
            eprintln!("Error parsing job file {}: {}", path.display(), e);
            process::exit(1);
        }
    }
}

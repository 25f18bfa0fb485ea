//! Worker configuration.

use std::path::PathBuf;

/// Worker configuration settings.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Minimum supported protocol version.
    pub protocol_min: i32,
    /// Maximum supported protocol version.
    pub protocol_max: i32,
    /// Supported operations.
    pub features: Vec<String>,
    /// Where the gate chain configuration lives.
    pub gate_config_path: PathBuf,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            protocol_min: 1,
            protocol_max: 1,
            features: vec![
                "probe".to_string(),
                "job_submit".to_string(),
                "job_modify".to_string(),
            ],
            gate_config_path: PathBuf::from(".jag/gate.toml"),
        }
    }
}

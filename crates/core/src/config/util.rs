use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::PipelineConfig;

/// Config file looked up under the project root when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "symsieve.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config at {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Load a `PipelineConfig` from a JSON or YAML file (picked by extension).
pub fn load_pipeline_config(path: &Path) -> Result<PipelineConfig, ConfigError> {
    let body = std::fs::read_to_string(path)
        .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    let parsed: Result<PipelineConfig, String> = if matches!(ext, "yaml" | "yml") {
        serde_yaml::from_str(&body).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&body).map_err(|e| e.to_string())
    };
    parsed.map_err(|message| ConfigError::Parse { path: path.to_path_buf(), message })
}

/// Resolve the debugger executable: explicit path, then `GDB_BIN`, then `gdb`.
pub fn resolve_debugger_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os("GDB_BIN").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(super::DEFAULT_DEBUGGER))
}

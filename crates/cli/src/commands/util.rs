use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Args;
use log::debug;

use symsieve_core::config::{load_pipeline_config, PipelineConfig, DEFAULT_CONFIG_FILE};
use symsieve_core::services::backends::GdbBackend;

use crate::{canonicalize_or_current, resolve_under};

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct PipelineArgs {
    /// Directory holding the slot files (and `symsieve.json`, if any).
    #[arg(long, global = true, default_value = ".")]
    pub root: String,

    /// Config file (JSON or YAML). Defaults to `<root>/symsieve.json` when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Executable to introspect. Relative paths are taken under --root.
    #[arg(long, global = true)]
    pub binary: Option<PathBuf>,

    /// Debugger executable (defaults to $GDB_BIN, then `gdb`).
    #[arg(long, global = true)]
    pub debugger: Option<PathBuf>,

    /// Primary listing slot, relative to --root unless absolute.
    #[arg(long, global = true)]
    pub primary: Option<PathBuf>,

    /// Filtered listing slot, relative to --root unless absolute.
    #[arg(long, global = true)]
    pub filtered: Option<PathBuf>,

    /// Aggregate slot, relative to --root unless absolute.
    #[arg(long, global = true)]
    pub aggregate: Option<PathBuf>,

    /// Skip malformed report lines instead of failing the extraction.
    #[arg(long, global = true, default_value_t = false)]
    pub lenient: bool,

    /// Give up on the debugger after this many seconds (0 waits indefinitely).
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,
}

/// Build the effective configuration: defaults, then config file, then flags.
pub fn build_pipeline_config(args: &PipelineArgs) -> Result<PipelineConfig> {
    let root = canonicalize_or_current(&args.root)?;

    let config_path = match &args.config {
        Some(path) => Some(path.clone()),
        None => Some(root.join(DEFAULT_CONFIG_FILE)).filter(|p| p.is_file()),
    };

    let mut config = match config_path {
        Some(path) => {
            debug!("loading config from {}", path.display());
            load_pipeline_config(&path).context("Failed to load pipeline config")?
        }
        None => PipelineConfig::new(PathBuf::new()),
    };

    // File and flag paths share one rule: relative means relative to the root.
    if let Some(binary) = &args.binary {
        config.binary_path = binary.clone();
    }
    if let Some(primary) = &args.primary {
        config.slots.primary = primary.clone();
    }
    if let Some(filtered) = &args.filtered {
        config.slots.filtered = filtered.clone();
    }
    if let Some(aggregate) = &args.aggregate {
        config.slots.aggregate = aggregate.clone();
    }
    config.slots = config.slots.rooted_at(&root);
    if !config.binary_path.as_os_str().is_empty() {
        config.binary_path = resolve_under(&root, &config.binary_path);
    }

    if let Some(debugger) = &args.debugger {
        config.debugger_path = Some(debugger.clone());
    }
    config.lenient |= args.lenient;
    if args.timeout_secs.is_some() {
        config.timeout_secs = args.timeout_secs;
    }

    Ok(config)
}

/// Debugger backend configured from `config`.
pub fn gdb_backend(config: &PipelineConfig) -> GdbBackend {
    let timeout = config.timeout_secs.filter(|&secs| secs > 0).map(Duration::from_secs);
    GdbBackend::new(config.debugger_path.clone(), timeout)
}

/// Fail early when extraction is requested without a target binary.
pub fn require_binary(config: &PipelineConfig) -> Result<()> {
    if config.binary_path.as_os_str().is_empty() {
        return Err(anyhow!("No binary configured; pass --binary or set binary_path in the config"));
    }
    Ok(())
}

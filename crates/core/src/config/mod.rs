//! Pipeline configuration.
//!
//! Nothing here is global: a `PipelineConfig` is built once (defaults, optional
//! config file, CLI overrides) and handed to the `Pipeline` at construction.
//!
//! - `SlotLayout`: paths of the three persisted slots.
//! - `Denylist`: names considered risky, removed by the filter stage.
//! - `PipelineConfig`: everything the orchestrator needs for one run.

mod layout;
mod util;

pub use layout::*;
pub use util::*;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::services::filter::Denylist;

/// Executable used when neither config nor `GDB_BIN` names one.
pub const DEFAULT_DEBUGGER: &str = "gdb";

/// Configuration for one invocation of the extraction pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Executable to introspect. May be left out of a config file and given on the command line.
    #[serde(default)]
    pub binary_path: PathBuf,
    /// Optional explicit debugger path; falls back to `GDB_BIN`, then `gdb`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debugger_path: Option<PathBuf>,
    /// Slot paths. Relative entries are resolved against the project root by the caller.
    #[serde(default)]
    pub slots: SlotLayout,
    /// Risky call names removed by `remove-safe`.
    #[serde(default)]
    pub denylist: Denylist,
    /// Keep valid records when some report lines are malformed.
    #[serde(default)]
    pub lenient: bool,
    /// Kill the debugger if it runs longer than this. Zero means no limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl PipelineConfig {
    /// Create a configuration for `binary_path` with default slots under the current directory.
    pub fn new(binary_path: impl Into<PathBuf>) -> Self {
        Self {
            binary_path: binary_path.into(),
            debugger_path: None,
            slots: SlotLayout::default(),
            denylist: Denylist::default(),
            lenient: false,
            timeout_secs: None,
        }
    }

    pub fn with_slots(mut self, slots: SlotLayout) -> Self {
        self.slots = slots;
        self
    }

    pub fn with_denylist(mut self, denylist: Denylist) -> Self {
        self.denylist = denylist;
        self
    }
}

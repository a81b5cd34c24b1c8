use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// File name of the primary (unfiltered) listing.
pub const PRIMARY_SLOT_NAME: &str = "functions.json";
/// File name of the listing with denylisted names removed.
pub const FILTERED_SLOT_NAME: &str = "filtered_file.json";
/// File name of the per-name aggregate.
pub const AGGREGATE_SLOT_NAME: &str = "combined_file.json";

/// Where each pipeline stage persists its output.
///
/// This is derived from a chosen root path. It does *not* perform any IO itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotLayout {
    /// Full listing straight from the debugger report.
    pub primary: PathBuf,
    /// Listing after the risk filter.
    pub filtered: PathBuf,
    /// Name → aggregate mapping.
    pub aggregate: PathBuf,
}

impl SlotLayout {
    /// Compute the default slot paths under `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            primary: root.join(PRIMARY_SLOT_NAME),
            filtered: root.join(FILTERED_SLOT_NAME),
            aggregate: root.join(AGGREGATE_SLOT_NAME),
        }
    }

    /// Resolve relative slot paths against `root`; absolute paths are kept.
    pub fn rooted_at(&self, root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let resolve = |p: &Path| if p.is_absolute() { p.to_path_buf() } else { root.join(p) };
        Self {
            primary: resolve(&self.primary),
            filtered: resolve(&self.filtered),
            aggregate: resolve(&self.aggregate),
        }
    }
}

impl Default for SlotLayout {
    fn default() -> Self {
        Self::new("")
    }
}

//! Risk filter: drops calls whose name is on the denylist.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::SymbolRecord;

/// Names removed by default: raw copy/fill primitives and socket I/O.
pub const DEFAULT_RISKY_FUNCTIONS: &[&str] =
    &["strcpy", "strncpy", "memcpy", "memset", "send", "recv"];

/// Set of risky function names. Matching is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Denylist {
    names: BTreeSet<String>,
}

impl Denylist {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { names: names.into_iter().map(Into::into).collect() }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Keep every record whose name is not denylisted, preserving order.
    pub fn filter(&self, records: &[SymbolRecord]) -> Vec<SymbolRecord> {
        records.iter().filter(|r| !self.contains(&r.name)).cloned().collect()
    }
}

impl Default for Denylist {
    fn default() -> Self {
        Self::new(DEFAULT_RISKY_FUNCTIONS.iter().copied())
    }
}

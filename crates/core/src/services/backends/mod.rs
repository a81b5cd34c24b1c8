//! Debugger backends that produce a symbol report for a binary.
//!
//! The pipeline only needs the raw `info functions` text; everything after
//! that is parsed by `services::report`. Tests inject their own backend.

pub mod gdb;

pub use gdb::GdbBackend;

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Binary not found at {0}")]
    MissingBinary(PathBuf),
    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}{}", stderr_suffix(.stderr))]
    ExitStatus { program: String, status: String, stderr: String },
    #[error("{program} did not finish within {secs}s")]
    TimedOut { program: String, secs: u64 },
    #[error("Debugger I/O error: {0}")]
    Io(String),
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// Something that can list the functions of a binary as text.
pub trait DebuggerBackend {
    /// Produce the full function listing for `binary`.
    fn report(&self, binary: &Path) -> Result<String, BackendError>;
    fn name(&self) -> &'static str;
}

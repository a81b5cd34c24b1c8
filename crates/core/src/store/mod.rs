//! JSON-file persistence for pipeline slots.
//!
//! A slot is just a path. The store does not know which stage produced the
//! data; it loads and saves any serde type. Loading distinguishes three
//! outcomes:
//! - the slot holds valid data (`Loaded::Found`),
//! - the slot is missing or unreadable (`Loaded::Missing`, logged, not an error),
//! - the slot exists but does not decode (`StoreError::Decode`).

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Error type for slot persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The slot exists but its content is not valid for the requested type.
    #[error("Failed to decode JSON from {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Data could not be serialized for writing.
    #[error("Failed to encode data for {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Writing the slot failed; the previous content is left untouched.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Outcome of reading a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loaded<T> {
    Found(T),
    /// Missing or unreadable; the diagnostic has already been logged.
    Missing,
}

impl<T: Default> Loaded<T> {
    /// Collapse a missing slot into an empty collection.
    pub fn unwrap_or_empty(self) -> T {
        match self {
            Loaded::Found(value) => value,
            Loaded::Missing => T::default(),
        }
    }
}

/// Loads and saves slot contents as pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordStore;

impl RecordStore {
    pub fn new() -> Self {
        Self
    }

    /// Read and decode a slot.
    pub fn load<T: DeserializeOwned>(&self, slot: &Path) -> StoreResult<Loaded<T>> {
        let body = match fs::read_to_string(slot) {
            Ok(body) => body,
            Err(e) => {
                warn!("error reading file {}: {e}", slot.display());
                return Ok(Loaded::Missing);
            }
        };
        match serde_json::from_str(&body) {
            Ok(value) => {
                debug!("loaded {}", slot.display());
                Ok(Loaded::Found(value))
            }
            Err(source) => {
                error!("error decoding JSON from file {}: {source}", slot.display());
                Err(StoreError::Decode { path: slot.to_path_buf(), source })
            }
        }
    }

    /// Read a slot, treating a missing slot as an empty collection.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, slot: &Path) -> StoreResult<T> {
        self.load(slot).map(Loaded::unwrap_or_empty)
    }

    /// Fully overwrite a slot with `data`.
    ///
    /// The JSON is written to a sibling temp file and renamed into place, so a
    /// failure part-way leaves the previous slot content intact.
    pub fn save<T: Serialize + ?Sized>(&self, slot: &Path, data: &T) -> StoreResult<()> {
        let json = to_pretty_json(data)
            .map_err(|source| StoreError::Encode { path: slot.to_path_buf(), source })?;
        write_atomically(slot, &json).map_err(|source| {
            error!("error writing to file {}: {source}", slot.display());
            StoreError::Write { path: slot.to_path_buf(), source }
        })?;
        debug!("wrote {} bytes to {}", json.len(), slot.display());
        Ok(())
    }
}

/// Serialize with four-space indentation.
fn to_pretty_json<T: Serialize + ?Sized>(data: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

fn write_atomically(slot: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = slot.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file_name = slot.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
    let tmp = slot.with_file_name(format!(".{file_name}.tmp"));
    let result = (|| {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        fs::rename(&tmp, slot)
    })();
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

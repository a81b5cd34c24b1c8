//! symsieve-core
//!
//! Core library for extracting function symbols from a binary via gdb and
//! reducing them to something reviewable.
//!
//! This crate defines the record model, the report parser, the risk filter,
//! the aggregator, lookups, JSON slot persistence, and the debugger backend.
//! `services::pipeline::Pipeline` composes them into the `search`,
//! `remove-safe`, `combine`, `list`, and lookup operations.
//!
//! The goal is to keep all substantive logic here so it is fully testable and
//! reusable from multiple frontends.

pub mod config;
pub mod model;
pub mod services;
pub mod store;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

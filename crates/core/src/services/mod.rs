//! Pipeline stages and the orchestrator that ties them together.

pub mod aggregate;
pub mod backends;
pub mod filter;
pub mod lookup;
pub mod pipeline;
pub mod report;

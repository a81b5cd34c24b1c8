use log::{info, warn};
use thiserror::Error;

use crate::config::PipelineConfig;
use crate::model::{AggregateMap, SymbolRecord};
use crate::services::aggregate::aggregate;
use crate::services::backends::{BackendError, DebuggerBackend};
use crate::services::lookup::find;
use crate::services::report::{parse_report, parse_report_lenient, ReportError};
use crate::store::{RecordStore, StoreError};

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The debugger could not be run or failed. Fatal for the invocation.
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("Failed to parse debugger report: {0}")]
    Report(#[from] ReportError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Outcome of an extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionSummary {
    pub records: usize,
    /// Malformed lines dropped in lenient mode.
    pub skipped: usize,
}

/// Outcome of `remove-safe`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSummary {
    pub kept: usize,
    pub removed: usize,
}

/// Outcome of `combine`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateSummary {
    pub records: usize,
    pub names: usize,
}

/// Outcome of running every stage back to back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSummary {
    pub extraction: ExtractionSummary,
    pub filter: FilterSummary,
    pub aggregate: AggregateSummary,
}

/// Coordinator that ties configuration, debugger backend, and slot storage together.
pub struct Pipeline<'a> {
    pub config: &'a PipelineConfig,
    pub backend: &'a dyn DebuggerBackend,
    pub store: RecordStore,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a PipelineConfig, backend: &'a dyn DebuggerBackend) -> Self {
        Self { config, backend, store: RecordStore::new() }
    }

    /// Run the debugger, parse its report, and overwrite the primary slot.
    pub fn run_extraction(&self) -> Result<ExtractionSummary, PipelineError> {
        let report = self.backend.report(&self.config.binary_path)?;

        let (records, skipped) = if self.config.lenient {
            let parsed = parse_report_lenient(&report);
            for err in &parsed.errors {
                warn!("skipping malformed report {err}");
            }
            (parsed.records, parsed.errors.len())
        } else {
            (parse_report(&report)?, 0)
        };

        self.store.save(&self.config.slots.primary, &records)?;
        info!(
            "wrote {} records to {} ({} backend)",
            records.len(),
            self.config.slots.primary.display(),
            self.backend.name()
        );
        Ok(ExtractionSummary { records: records.len(), skipped })
    }

    /// Load the primary slot, drop denylisted names, and write the filtered slot.
    pub fn run_filter(&self) -> Result<FilterSummary, PipelineError> {
        let records: Vec<SymbolRecord> = self.store.load_or_default(&self.config.slots.primary)?;
        let filtered = self.config.denylist.filter(&records);
        self.store.save(&self.config.slots.filtered, &filtered)?;

        let summary =
            FilterSummary { kept: filtered.len(), removed: records.len() - filtered.len() };
        info!(
            "removed {} risky records, wrote {} to {}",
            summary.removed,
            summary.kept,
            self.config.slots.filtered.display()
        );
        Ok(summary)
    }

    /// Load the filtered slot, group by name, and write the aggregate slot.
    pub fn run_aggregate(&self) -> Result<AggregateSummary, PipelineError> {
        let records: Vec<SymbolRecord> = self.store.load_or_default(&self.config.slots.filtered)?;
        let combined: AggregateMap = aggregate(&records);
        self.store.save(&self.config.slots.aggregate, &combined)?;

        info!(
            "combined {} records into {} names in {}",
            records.len(),
            combined.len(),
            self.config.slots.aggregate.display()
        );
        Ok(AggregateSummary { records: records.len(), names: combined.len() })
    }

    /// Every record in the primary slot, in report order.
    pub fn list(&self) -> Result<Vec<SymbolRecord>, PipelineError> {
        Ok(self.store.load_or_default(&self.config.slots.primary)?)
    }

    /// Look up a record in the primary slot by address or name.
    pub fn search(&self, query: &str) -> Result<Option<SymbolRecord>, PipelineError> {
        let records = self.list()?;
        Ok(find(&records, query).cloned())
    }

    /// Extraction, filter, and aggregate in sequence, persisting every slot.
    pub fn run_all(&self) -> Result<PipelineSummary, PipelineError> {
        let extraction = self.run_extraction()?;
        let filter = self.run_filter()?;
        let aggregate = self.run_aggregate()?;
        Ok(PipelineSummary { extraction, filter, aggregate })
    }
}

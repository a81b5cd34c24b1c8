use std::cell::Cell;
use std::path::Path;

use symsieve_core::config::{PipelineConfig, SlotLayout};
use symsieve_core::model::{AggregateMap, SymbolRecord};
use symsieve_core::services::aggregate::aggregate;
use symsieve_core::services::backends::{BackendError, DebuggerBackend};
use symsieve_core::services::filter::Denylist;
use symsieve_core::services::pipeline::{Pipeline, PipelineError};
use symsieve_core::services::report::parse_report;
use symsieve_core::store::RecordStore;
use tempfile::{tempdir, TempDir};

const REPORT: &str = "All defined functions:\n\
                      \n\
                      Non-debugging symbols:\n\
                      0x0000000000001000 _init void\n\
                      0x0000000000001030 strcpy char*\n\
                      0x0000000000001040 main int\n\
                      0x0000000000001050 helper void\n\
                      0x0000000000001060 memcpy void*\n\
                      0x0000000000001070 helper long\n";

/// Returns a canned report and counts how often it was asked.
struct CannedBackend {
    report: String,
    calls: Cell<usize>,
}

impl CannedBackend {
    fn new(report: &str) -> Self {
        Self { report: report.to_string(), calls: Cell::new(0) }
    }
}

impl DebuggerBackend for CannedBackend {
    fn report(&self, _binary: &Path) -> Result<String, BackendError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.report.clone())
    }

    fn name(&self) -> &'static str {
        "canned"
    }
}

struct FailingBackend;

impl DebuggerBackend for FailingBackend {
    fn report(&self, _binary: &Path) -> Result<String, BackendError> {
        Err(BackendError::ExitStatus {
            program: "gdb".into(),
            status: "exit status: 1".into(),
            stderr: "No symbol table is loaded.".into(),
        })
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

fn config_in(temp: &TempDir) -> PipelineConfig {
    PipelineConfig::new(temp.path().join("app")).with_slots(SlotLayout::new(temp.path()))
}

fn names(records: &[SymbolRecord]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn extraction_writes_primary_slot() {
    let temp = tempdir().unwrap();
    let config = config_in(&temp);
    let backend = CannedBackend::new(REPORT);
    let pipeline = Pipeline::new(&config, &backend);

    let summary = pipeline.run_extraction().expect("extract");
    assert_eq!(summary.records, 6);
    assert_eq!(summary.skipped, 0);
    assert_eq!(backend.calls.get(), 1);

    let listed = pipeline.list().expect("list");
    assert_eq!(names(&listed), vec!["_init", "strcpy", "main", "helper", "memcpy", "helper"]);
}

#[test]
fn extraction_replaces_previous_listing() {
    let temp = tempdir().unwrap();
    let config = config_in(&temp);
    let first = CannedBackend::new(REPORT);
    Pipeline::new(&config, &first).run_extraction().unwrap();

    let second = CannedBackend::new("0x1 only void\n");
    let pipeline = Pipeline::new(&config, &second);
    pipeline.run_extraction().unwrap();
    assert_eq!(names(&pipeline.list().unwrap()), vec!["only"]);
}

#[test]
fn backend_failure_is_fatal_and_writes_nothing() {
    let temp = tempdir().unwrap();
    let config = config_in(&temp);
    let pipeline = Pipeline::new(&config, &FailingBackend);

    let err = pipeline.run_extraction().unwrap_err();
    assert!(matches!(err, PipelineError::Backend(_)), "unexpected error: {err}");
    assert!(err.to_string().contains("No symbol table"), "unexpected message: {err}");
    assert!(!config.slots.primary.exists());
}

#[test]
fn strict_mode_aborts_on_malformed_line() {
    let temp = tempdir().unwrap();
    let config = config_in(&temp);
    let backend = CannedBackend::new("0x1 main int\n0x2 broken\n");

    let err = Pipeline::new(&config, &backend).run_extraction().unwrap_err();
    assert!(matches!(err, PipelineError::Report(_)), "unexpected error: {err}");
    assert!(!config.slots.primary.exists());
}

#[test]
fn lenient_mode_keeps_valid_records() {
    let temp = tempdir().unwrap();
    let mut config = config_in(&temp);
    config.lenient = true;
    let backend = CannedBackend::new("0x1 main int\n0x2 broken\n0x3 helper void\n");
    let pipeline = Pipeline::new(&config, &backend);

    let summary = pipeline.run_extraction().expect("lenient extract");
    assert_eq!(summary.records, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(names(&pipeline.list().unwrap()), vec!["main", "helper"]);
}

#[test]
fn filter_and_aggregate_stages_persist_their_slots() {
    let temp = tempdir().unwrap();
    let config = config_in(&temp);
    let backend = CannedBackend::new(REPORT);
    let pipeline = Pipeline::new(&config, &backend);
    pipeline.run_extraction().unwrap();

    let filtered = pipeline.run_filter().expect("filter");
    assert_eq!(filtered.kept, 4);
    assert_eq!(filtered.removed, 2);

    let combined = pipeline.run_aggregate().expect("aggregate");
    assert_eq!(combined.records, 4);
    assert_eq!(combined.names, 3);

    let map: AggregateMap = RecordStore::new().load_or_default(&config.slots.aggregate).unwrap();
    let helper = map.get("helper").expect("helper aggregated");
    assert_eq!(helper.count, 2);
    assert_eq!(helper.signature, "void");
    assert_eq!(helper.addresses, vec!["0x0000000000001050", "0x0000000000001070"]);
    assert!(!map.contains_key("strcpy"));
}

#[test]
fn filter_uses_injected_denylist() {
    let temp = tempdir().unwrap();
    let config = config_in(&temp).with_denylist(Denylist::new(["main"]));
    let backend = CannedBackend::new(REPORT);
    let pipeline = Pipeline::new(&config, &backend);
    pipeline.run_extraction().unwrap();
    pipeline.run_filter().unwrap();

    let filtered: Vec<SymbolRecord> =
        RecordStore::new().load_or_default(&config.slots.filtered).unwrap();
    assert_eq!(names(&filtered), vec!["_init", "strcpy", "helper", "memcpy", "helper"]);
}

#[test]
fn stages_on_missing_slots_produce_empty_outputs() {
    let temp = tempdir().unwrap();
    let config = config_in(&temp);
    let pipeline = Pipeline::new(&config, &FailingBackend);

    assert_eq!(pipeline.run_filter().unwrap().kept, 0);
    assert_eq!(pipeline.run_aggregate().unwrap().names, 0);
    assert!(pipeline.list().unwrap().is_empty());
    assert_eq!(pipeline.search("main").unwrap(), None);
    assert_eq!(std::fs::read_to_string(&config.slots.aggregate).unwrap().trim(), "{}");
}

#[test]
fn corrupt_primary_slot_fails_filter() {
    let temp = tempdir().unwrap();
    let config = config_in(&temp);
    std::fs::write(&config.slots.primary, "[{").unwrap();

    let err = Pipeline::new(&config, &FailingBackend).run_filter().unwrap_err();
    assert!(matches!(err, PipelineError::Store(_)), "unexpected error: {err}");
    assert!(!config.slots.filtered.exists());
}

#[test]
fn search_matches_address_or_name() {
    let temp = tempdir().unwrap();
    let config = config_in(&temp);
    let backend = CannedBackend::new(REPORT);
    let pipeline = Pipeline::new(&config, &backend);
    pipeline.run_extraction().unwrap();

    let by_name = pipeline.search("main").unwrap().expect("main");
    assert_eq!(by_name.address, "0x0000000000001040");
    let by_addr = pipeline.search("0x0000000000001040").unwrap().expect("address");
    assert_eq!(by_addr, by_name);
    assert_eq!(pipeline.search("nonexistent").unwrap(), None);
    assert_eq!(backend.calls.get(), 1, "lookups never rerun the debugger");
}

#[test]
fn staged_pipeline_matches_in_memory_composition() {
    let temp = tempdir().unwrap();
    let config = config_in(&temp);
    let backend = CannedBackend::new(REPORT);

    let summary = Pipeline::new(&config, &backend).run_all().expect("run all");
    assert_eq!(summary.extraction.records, 6);
    assert_eq!(summary.filter.removed, 2);

    let expected = aggregate(&config.denylist.filter(&parse_report(REPORT).unwrap()));
    let persisted: AggregateMap =
        RecordStore::new().load_or_default(&config.slots.aggregate).unwrap();
    assert_eq!(persisted, expected);
    assert!(persisted.keys().eq(expected.keys()));
}

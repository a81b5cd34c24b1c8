use anyhow::{Context, Result};

use symsieve_core::services::pipeline::Pipeline;

use crate::commands::{build_pipeline_config, gdb_backend, require_binary, PipelineArgs};

/// Run gdb against the binary and write the primary listing.
pub fn search_command(args: &PipelineArgs) -> Result<()> {
    let config = build_pipeline_config(args)?;
    require_binary(&config)?;
    let backend = gdb_backend(&config);
    let pipeline = Pipeline::new(&config, &backend);

    let summary = pipeline.run_extraction().context("Extraction failed")?;

    println!("Extracted {} functions", summary.records);
    if summary.skipped > 0 {
        println!("  Skipped malformed lines: {}", summary.skipped);
    }
    println!("  Binary: {}", config.binary_path.display());
    println!("  Listing: {}", config.slots.primary.display());
    Ok(())
}

/// Drop denylisted calls from the primary listing and write the filtered listing.
pub fn remove_safe_command(args: &PipelineArgs) -> Result<()> {
    let config = build_pipeline_config(args)?;
    let backend = gdb_backend(&config);
    let pipeline = Pipeline::new(&config, &backend);

    let summary = pipeline.run_filter().context("Filtering failed")?;

    println!("Filtered functions:");
    println!("  Kept: {}", summary.kept);
    println!("  Removed: {}", summary.removed);
    println!("  Listing: {}", config.slots.filtered.display());
    Ok(())
}

/// Group the filtered listing by name and write the aggregate.
pub fn combine_command(args: &PipelineArgs) -> Result<()> {
    let config = build_pipeline_config(args)?;
    let backend = gdb_backend(&config);
    let pipeline = Pipeline::new(&config, &backend);

    let summary = pipeline.run_aggregate().context("Combining failed")?;

    println!("Combined {} records into {} functions", summary.records, summary.names);
    println!("  Aggregate: {}", config.slots.aggregate.display());
    Ok(())
}

/// search, remove-safe, and combine back to back.
pub fn run_all_command(args: &PipelineArgs) -> Result<()> {
    let config = build_pipeline_config(args)?;
    require_binary(&config)?;
    let backend = gdb_backend(&config);
    let pipeline = Pipeline::new(&config, &backend);

    let summary = pipeline.run_all().context("Pipeline failed")?;

    println!("Extracted {} functions", summary.extraction.records);
    println!("Removed {} risky calls", summary.filter.removed);
    println!(
        "Combined {} records into {} functions",
        summary.aggregate.records, summary.aggregate.names
    );
    Ok(())
}

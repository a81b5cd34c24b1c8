use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use symsieve_core::services::pipeline::Pipeline;

use crate::commands::{build_pipeline_config, gdb_backend, PipelineArgs};

/// Prompt shown when `find` is run without a query.
pub const LOOKUP_PROMPT: &str = "enter a function address or name: ";

/// Print every record of the primary listing as `address: name`.
pub fn list_command(args: &PipelineArgs, json: bool) -> Result<()> {
    let config = build_pipeline_config(args)?;
    let backend = gdb_backend(&config);
    let records = Pipeline::new(&config, &backend).list().context("Failed to load listing")?;

    if json {
        let serialized = serde_json::to_string_pretty(&records)
            .context("Failed to serialize functions to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    for record in records {
        println!("{}: {}", record.address, record.name);
    }
    Ok(())
}

/// Look up a function by address or name, prompting on stdin when no query is given.
pub fn find_command(args: &PipelineArgs, query: Option<String>) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    find_with_io(args, query, &mut stdin.lock(), &mut stdout.lock())
}

/// `find` over explicit streams; the prompt only appears when `query` is `None`.
pub fn find_with_io<R: BufRead, W: Write>(
    args: &PipelineArgs,
    query: Option<String>,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let config = build_pipeline_config(args)?;
    let backend = gdb_backend(&config);
    let pipeline = Pipeline::new(&config, &backend);

    let query = match query {
        Some(q) => q,
        None => prompt(input, output)?,
    };

    match pipeline.search(&query).context("Failed to load listing")? {
        Some(found) => writeln!(output, "found {}: {}", found.address, found.name)?,
        None => writeln!(output, "could not find function with address or name '{query}'.")?,
    }
    Ok(())
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<String> {
    write!(output, "{LOOKUP_PROMPT}")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read lookup key")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

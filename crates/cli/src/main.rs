use std::process;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use log::error;

use symsieve::commands::{
    combine_command, find_command, list_command, remove_safe_command, run_all_command,
    search_command, PipelineArgs,
};

/// Extract function symbols from a binary with gdb, then filter and combine them.
///
/// This CLI is a thin wrapper around `symsieve-core` (exposed in code as `symsieve_core`).
/// All substantive logic lives in the library so it can be tested thoroughly.
#[derive(Parser, Debug)]
#[command(
    name = "symsieve",
    version,
    about = "Extract, filter, and combine function symbols reported by gdb",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    pipeline: PipelineArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run `info functions` under gdb and write the primary listing.
    Search,

    /// Remove risky library calls from the primary listing.
    RemoveSafe,

    /// Combine repeated entries of the same function in the filtered listing.
    Combine,

    /// Print every function in the primary listing as `address: name`.
    List {
        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Look up a function by address or name (prompts when QUERY is omitted).
    Find {
        /// Exact address (e.g. 0x1139) or function name.
        query: Option<String>,
    },

    /// Run search, remove-safe, and combine in sequence.
    RunAll,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            // Help and version are not misuse.
            let _ = err.print();
            return;
        }
        Err(err) => {
            error!("{}", err.to_string().trim_end());
            process::exit(1);
        }
    };

    if let Err(err) = run(cli) {
        error!("{err:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let args = &cli.pipeline;
    match cli.command {
        Command::Search => search_command(args)?,
        Command::RemoveSafe => remove_safe_command(args)?,
        Command::Combine => combine_command(args)?,
        Command::List { json } => list_command(args, json)?,
        Command::Find { query } => find_command(args, query)?,
        Command::RunAll => run_all_command(args)?,
    }

    Ok(())
}

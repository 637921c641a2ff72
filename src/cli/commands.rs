//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::io;

use crate::harness::{self, ConsoleReporter, HarnessConfig, ShellExecutor};

use super::{CliError, CliResult, ExitCode};

/// Run the whole suite described by `config` and print the report to stdout.
///
/// Case outcomes do not affect the exit code; only a suite that could not run
/// (missing sources, unbalanced sources under `--strict`, a broken stdout) fails.
pub fn run_suite(config: HarnessConfig) -> CliResult<ExitCode> {
    // One case at a time on one thread; the runtime only drives child I/O and the timer.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::failure(format!("Error starting runtime: {}", e)))?;

    let executor = ShellExecutor::new(config.shell.clone(), config.timeout);
    let stdout = io::stdout();
    let mut reporter = ConsoleReporter::new(stdout.lock(), config.color.enabled());

    runtime
        .block_on(harness::run_suite(&config, &executor, &mut reporter))
        .map_err(|e| CliError::failure(format!("Error: {}", e)))?;

    Ok(ExitCode::SUCCESS)
}

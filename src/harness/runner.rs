//! Suite driver
//!
//! Runs the configured modes strictly in order, one case at a time, threading a single
//! [`RunTotals`] through every case and handing each result to the reporter.

use tracing::{debug, info};

use super::case::{Mode, PairedCase, Surplus};
use super::config::HarnessConfig;
use super::engine::run_case;
use super::error::HarnessResult;
use super::executor::CommandExecutor;
use super::loader::{check_balanced, load_pairs};
use super::report::SuiteReporter;
use super::totals::RunTotals;

/// Run every case of one mode.
///
/// Per-case faults never stop the loop; only a reporter write failure does.
pub async fn run_mode<E, R, I>(
    mode: Mode,
    pairs: I,
    executor: &E,
    reporter: &mut R,
    totals: &mut RunTotals,
) -> HarnessResult<()>
where
    E: CommandExecutor,
    R: SuiteReporter + ?Sized,
    I: IntoIterator<Item = PairedCase>,
{
    reporter.on_mode_start(mode)?;

    for paired in pairs {
        reporter.on_case_start(paired.index, &paired.case)?;
        let result = run_case(executor, mode, &paired).await;
        totals.record(mode, &result);
        reporter.on_case_complete(paired.index, &paired.case, &result)?;
    }

    Ok(())
}

/// Run all configured modes and print the summary.
///
/// Every source is opened (and, under strict pairing, counted) before the first
/// case launches, so a missing or unbalanced file fails the run up front.
pub async fn run_suite<E, R>(config: &HarnessConfig, executor: &E, reporter: &mut R) -> HarnessResult<RunTotals>
where
    E: CommandExecutor,
    R: SuiteReporter + ?Sized,
{
    if config.strict_pairing {
        for &mode in &config.modes {
            check_balanced(config.sources(mode))?;
        }
    }

    let mut phases = Vec::with_capacity(config.modes.len());
    for &mode in &config.modes {
        phases.push((mode, load_pairs(mode, config.sources(mode))?));
    }

    info!(modes = phases.len(), timeout_ms = config.timeout.as_millis() as u64, "starting suite");

    let mut totals = RunTotals::new();
    for (mode, mut pairs) in phases {
        run_mode(mode, &mut pairs, executor, reporter, &mut totals).await?;
        match pairs.surplus() {
            Some(Surplus::Cases(n)) => debug!(mode = %mode, lines = n, "ignored case lines without answers"),
            Some(Surplus::Answers(n)) => debug!(mode = %mode, lines = n, "ignored answer lines without cases"),
            None => {}
        }
    }

    reporter.on_run_complete(&totals)?;
    Ok(totals)
}

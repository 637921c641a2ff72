//! Black-box conformance harness
//!
//! The harness feeds a program-under-test a batch of shell command lines and checks what it
//! prints against expected answers.
//!
//! ## Pipeline
//!
//! ```text
//! loader (case + answer lines) -> engine (launch, capture, classify) -> report (rows + summary)
//! ```
//!
//! ## Modules
//!
//! - `case` - cases, expected results, ordinal pairing
//! - `loader` - reading case/answer files
//! - `executor` - launching children under a time budget
//! - `engine` - classification of one case
//! - `totals` - run-wide counters
//! - `report` - reporter trait and console table
//! - `runner` - the sequential driver over all modes
//! - `config` - harness settings

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod case;
pub mod config;
pub mod engine;
pub mod error;
pub mod executor;
pub mod loader;
pub mod report;
pub mod runner;
pub mod totals;

pub use case::{Case, CasePairs, Expected, Mode, PairedCase, Stream, Surplus, target_label};
pub use config::{ColorChoice, HarnessConfig, SuiteSources};
pub use engine::{ExecutionResult, Mismatch, RuntimeFault, Verdict, classify, run_case};
pub use error::{ExecError, HarnessError, HarnessResult};
pub use executor::{CapturedOutput, CommandExecutor, Launch, ShellExecutor};
pub use report::{ConsoleReporter, SuiteReporter};
pub use runner::{run_mode, run_suite};
pub use totals::RunTotals;

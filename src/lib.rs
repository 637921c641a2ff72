#![forbid(unsafe_code)]
//! conform: a black-box conformance harness
//!
//! conform drives an external program through a batch of shell command lines and checks what it
//! prints. Correctness cases must exit zero with the expected stdout; robustness cases must exit
//! non-zero with the expected stderr. Every case gets a one second budget, one row in the report,
//! and exactly one verdict: passed, failed, runtime error, or timed out.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `harness` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Child faults**: Anything that goes wrong while running one case (spawn failure, undecodable output) becomes that
//!   case's verdict. Only run-level problems (unreadable sources, a closed stdout) end a run early.

pub mod cli;
pub mod harness;
pub mod version;

pub use harness::{
    ColorChoice, CommandExecutor, ConsoleReporter, ExecutionResult, HarnessConfig, Mode, RunTotals, ShellExecutor,
    SuiteReporter, Verdict, run_suite,
};

//! CLI module for the conform harness
//!
//! ```text
//! conform [--dir DIR] [--cases FILE] [--answers FILE]
//!         [--robustness-cases FILE] [--robustness-answers FILE]
//!         [--shell SHELL] [--timeout-ms MS] [--color auto|always|never]
//!         [--strict] [--only correctness|robustness]
//! ```
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.
//!
//! The harness exits zero whenever the suite ran to completion, whatever the
//! case results; a non-zero exit means the suite itself could not run.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;

use crate::harness::config::{DEFAULT_SHELL, DEFAULT_SUITE_DIR};
use crate::harness::{ColorChoice, HarnessConfig, Mode, SuiteSources};
use crate::version::CONFORM_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Run a program-under-test against paired case and answer files
#[derive(Parser, Debug)]
#[command(name = "conform")]
#[command(version = CONFORM_VERSION)]
#[command(about = "Black-box conformance harness: correctness (stdout) and robustness (stderr) checks", long_about = None)]
pub struct Cli {
    /// Directory holding testcases.txt, testcases_ans.txt, testcases_robustness.txt and robustness_ans.txt
    #[arg(long, value_name = "DIR", default_value = DEFAULT_SUITE_DIR)]
    pub dir: PathBuf,

    /// Correctness case file (overrides DIR/testcases.txt)
    #[arg(long, value_name = "FILE")]
    pub cases: Option<PathBuf>,

    /// Correctness answer file (overrides DIR/testcases_ans.txt)
    #[arg(long, value_name = "FILE")]
    pub answers: Option<PathBuf>,

    /// Robustness case file (overrides DIR/testcases_robustness.txt)
    #[arg(long = "robustness-cases", value_name = "FILE")]
    pub robustness_cases: Option<PathBuf>,

    /// Robustness answer file (overrides DIR/robustness_ans.txt)
    #[arg(long = "robustness-answers", value_name = "FILE")]
    pub robustness_answers: Option<PathBuf>,

    /// Shell that runs each case line via `-c`
    #[arg(long, value_name = "SHELL", default_value = DEFAULT_SHELL)]
    pub shell: String,

    /// Wall-clock budget per case, in milliseconds
    #[arg(
        long = "timeout-ms",
        value_name = "MS",
        default_value_t = 1000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_ms: u64,

    /// When to color the result column
    #[arg(long, value_enum, value_name = "WHEN", default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Fail before running anything if a case file and its answer file differ in length
    #[arg(long)]
    pub strict: bool,

    /// Run a single mode instead of both
    #[arg(long, value_enum, value_name = "MODE")]
    pub only: Option<Mode>,
}

impl Cli {
    /// Translate parsed arguments into a harness configuration.
    pub fn into_config(self) -> HarnessConfig {
        let mut config = HarnessConfig::new()
            .with_suite_dir(&self.dir)
            .with_shell(self.shell)
            .with_timeout(Duration::from_millis(self.timeout_ms))
            .with_color(self.color)
            .with_strict_pairing(self.strict);

        let correctness = SuiteSources::new(
            self.cases.unwrap_or_else(|| config.correctness.cases.clone()),
            self.answers.unwrap_or_else(|| config.correctness.answers.clone()),
        );
        let robustness = SuiteSources::new(
            self.robustness_cases
                .unwrap_or_else(|| config.robustness.cases.clone()),
            self.robustness_answers
                .unwrap_or_else(|| config.robustness.answers.clone()),
        );
        config = config
            .with_sources(Mode::Correctness, correctness)
            .with_sources(Mode::Robustness, robustness);

        if let Some(mode) = self.only {
            config = config.with_only(mode);
        }
        config
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match commands::run_suite(cli.into_config()) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Harness configuration
//!
//! Defaults follow the conventional suite layout: a `test/` directory holding
//! `testcases.txt` / `testcases_ans.txt` for correctness and
//! `testcases_robustness.txt` / `robustness_ans.txt` for robustness, run through
//! `bash` with a one second budget per case.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::case::Mode;

pub const DEFAULT_SUITE_DIR: &str = "test";
pub const DEFAULT_SHELL: &str = "bash";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// When to emit ANSI colors in the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Color only when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn enabled(self) -> bool {
        match self {
            ColorChoice::Auto => std::io::stdout().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

/// The case file and its parallel answer file for one mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteSources {
    pub cases: PathBuf,
    pub answers: PathBuf,
}

impl SuiteSources {
    pub fn new(cases: impl Into<PathBuf>, answers: impl Into<PathBuf>) -> Self {
        Self {
            cases: cases.into(),
            answers: answers.into(),
        }
    }

    /// Conventional file names for `mode` under `dir`.
    pub fn conventional(dir: &Path, mode: Mode) -> Self {
        match mode {
            Mode::Correctness => Self::new(dir.join("testcases.txt"), dir.join("testcases_ans.txt")),
            Mode::Robustness => Self::new(dir.join("testcases_robustness.txt"), dir.join("robustness_ans.txt")),
        }
    }
}

/// Everything a run needs to know besides the cases themselves.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Wall-clock budget per case
    pub timeout: Duration,
    /// Shell that receives each case line via `-c`
    pub shell: String,
    pub color: ColorChoice,
    /// Reject case/answer sources whose line counts differ instead of truncating
    pub strict_pairing: bool,
    /// Modes to run, in order
    pub modes: Vec<Mode>,
    pub correctness: SuiteSources,
    pub robustness: SuiteSources,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        let dir = Path::new(DEFAULT_SUITE_DIR);
        Self {
            timeout: DEFAULT_TIMEOUT,
            shell: DEFAULT_SHELL.to_string(),
            color: ColorChoice::Auto,
            strict_pairing: false,
            modes: Mode::ALL.to_vec(),
            correctness: SuiteSources::conventional(dir, Mode::Correctness),
            robustness: SuiteSources::conventional(dir, Mode::Robustness),
        }
    }
}

impl HarnessConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point both modes at the conventional files inside `dir`
    pub fn with_suite_dir(mut self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        self.correctness = SuiteSources::conventional(dir, Mode::Correctness);
        self.robustness = SuiteSources::conventional(dir, Mode::Robustness);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    pub fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    pub fn with_strict_pairing(mut self, strict: bool) -> Self {
        self.strict_pairing = strict;
        self
    }

    /// Run only `mode`
    pub fn with_only(mut self, mode: Mode) -> Self {
        self.modes = vec![mode];
        self
    }

    pub fn with_sources(mut self, mode: Mode, sources: SuiteSources) -> Self {
        match mode {
            Mode::Correctness => self.correctness = sources,
            Mode::Robustness => self.robustness = sources,
        }
        self
    }

    pub fn sources(&self, mode: Mode) -> &SuiteSources {
        match mode {
            Mode::Correctness => &self.correctness,
            Mode::Robustness => &self.robustness,
        }
    }
}

//! Case loading from plain-text sources
//!
//! Each mode reads two files in lockstep: one shell command per line, and one
//! expected result per line. Lines are read lazily; nothing past the current
//! case is held in memory.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::case::{CasePairs, Mode};
use super::config::SuiteSources;
use super::error::{HarnessError, HarnessResult};

/// Lines of one source file.
///
/// A read error mid-file (for example invalid UTF-8) ends the source at that
/// line and is logged; the cases before it still run.
pub struct SourceLines {
    path: PathBuf,
    lines: io::Lines<BufReader<File>>,
}

impl SourceLines {
    pub fn open(path: &Path) -> HarnessResult<Self> {
        let file = File::open(path).map_err(|source| HarnessError::Source {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            lines: BufReader::new(file).lines(),
        })
    }
}

impl Iterator for SourceLines {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        match self.lines.next()? {
            Ok(line) => Some(line),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "stopped reading case source");
                None
            }
        }
    }
}

pub type SourcePairs = CasePairs<SourceLines, SourceLines>;

/// Open the case and answer files of one mode as a lazy pair sequence.
///
/// The longer file is silently truncated; see [`check_balanced`] for strict pairing.
pub fn load_pairs(mode: Mode, sources: &SuiteSources) -> HarnessResult<SourcePairs> {
    debug!(mode = %mode, cases = %sources.cases.display(), answers = %sources.answers.display(), "loading cases");
    let cases = SourceLines::open(&sources.cases)?;
    let answers = SourceLines::open(&sources.answers)?;
    Ok(CasePairs::new(cases, answers))
}

/// Fail when the two files of `sources` hold different numbers of lines.
pub fn check_balanced(sources: &SuiteSources) -> HarnessResult<()> {
    let cases = SourceLines::open(&sources.cases)?.count();
    let answers = SourceLines::open(&sources.answers)?.count();
    if cases == answers {
        return Ok(());
    }
    Err(HarnessError::Unbalanced {
        cases_path: sources.cases.clone(),
        cases,
        answers_path: sources.answers.clone(),
        answers,
    })
}

use std::{
    fmt,
    io::{self, Write},
};

use regex::bytes::Regex;
use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    scorer::Scorer,
};

/// Separator used when the caller doesn't pick one: a single tab.
pub const DEFAULT_SEPARATOR: &str = "\t";

/// Both sides are kept as raw bytes; nothing requires them to be UTF-8.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPair {
    pub score: f64,
    pub left: Vec<u8>,
    pub right: Vec<u8>,
}

impl ScoredPair {
    /// Write `<score>\t<left>\t<right>` with both sides byte for byte.
    pub fn write_to(&self, mut w: impl Write) -> io::Result<()> {
        write!(w, "{:.6}\t", self.score)?;
        w.write_all(&self.left)?;
        w.write_all(b"\t")?;
        w.write_all(&self.right)
    }
}

/// Lossy: invalid UTF-8 is shown as U+FFFD.
impl fmt::Display for ScoredPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.6}\t{}\t{}",
            self.score,
            String::from_utf8_lossy(&self.left),
            String::from_utf8_lossy(&self.right)
        )
    }
}

/// Scores lines of the form `<left><separator><right>`.
#[derive(Debug, Clone)]
pub struct PairScorer {
    scorer: Scorer,
    separator: Regex,
    min_score: f64,
}

impl PairScorer {
    pub fn new(scorer: Scorer, separator: Regex) -> Self {
        Self {
            scorer,
            separator,
            min_score: 0.0,
        }
    }

    /// Drop pairs scoring below `min_score` from the output. Scores live in
    /// `[0.0, 1.0]`, so anything else (NaN included) is rejected.
    pub fn with_min_score(mut self, min_score: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&min_score) {
            return Err(Error::invalid(
                "min_score",
                min_score,
                "must be between 0.0 and 1.0",
            ));
        }

        self.min_score = min_score;
        Ok(self)
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Split a line at the first separator match, ignoring the line ending.
    pub fn split<'a>(&self, line: &'a [u8]) -> Option<(&'a [u8], &'a [u8])> {
        let line = line.strip_suffix(b"\n").unwrap_or(line);
        let line = line.strip_suffix(b"\r").unwrap_or(line);

        let m = self.separator.find(line)?;

        Some((&line[..m.start()], &line[m.end()..]))
    }

    /// `line_no` is only used for diagnostics.
    pub fn process_line(&self, line_no: usize, line: &[u8]) -> Option<ScoredPair> {
        let (left, right) = match self.split(line) {
            Some(pair) => pair,
            None if line.iter().all(u8::is_ascii_whitespace) => {
                debug!(line_no, "skipping blank line");
                return None;
            }
            None => {
                warn!(line_no, separator = %self.separator, "no separator on line, skipping");
                return None;
            }
        };

        let score = self.scorer.score(left, right);
        if score.is_approximate() {
            debug!(line_no, "approximate score");
        }

        if score.value < self.min_score {
            return None;
        }

        Some(ScoredPair {
            score: score.value,
            left: left.to_vec(),
            right: right.to_vec(),
        })
    }
}

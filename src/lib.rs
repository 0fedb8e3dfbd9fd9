use std::io::BufRead;

use indicatif::ProgressBar;
use pair::{PairScorer, ScoredPair};

#[macro_use]
#[cfg(test)]
mod macros;

pub mod aligner;
pub mod batch;
pub mod error;
pub mod guard;
pub mod pair;
pub mod parallel;
pub mod scorer;
pub mod transpositions;

pub use error::{Error, Result};
pub use scorer::{similarity, Score, ScoreKind, Scorer, ScorerOptions};

/// Runner used for --jobs=1. Scores pairs on the calling thread, skipping the
/// pool and channel setup of [`parallel::run`]. Output order is input order.
/// Lines are read as raw bytes, so input does not have to be UTF-8.
pub fn main_single_core(
    pair_scorer: PairScorer,
    mut file: impl BufRead,
    progress: ProgressBar,
) -> Result<Vec<ScoredPair>> {
    let mut pairs = Vec::new();
    let mut line = Vec::new();
    let mut line_no = 0;

    'outer: loop {
        let mut size = 0;
        for _ in 0..100 {
            line.clear();
            if file.read_until(b'\n', &mut line)? == 0 {
                progress.inc(size as u64);
                break 'outer;
            }

            line_no += 1;
            pairs.extend(pair_scorer.process_line(line_no, &line));
            size += line.len();
        }
        progress.inc(size as u64);
    }

    Ok(pairs)
}

//! Jaro-Winkler scoring (the `strcmp95` metric).
//!
//! A [`Scorer`] is built once from validated [`ScorerOptions`] and is then
//! infallible: every comparison runs the guard, aligner and transposition
//! counter in turn and combines their results here.

use crate::{
    aligner,
    error::{Error, Result},
    guard::{self, Guard},
    transpositions,
};

pub const DEFAULT_PREFIX_WEIGHT: f64 = 0.1;

/// Largest prefix weight that keeps scores within `[0.0, 1.0]` given the
/// four unit prefix cap.
pub const MAX_PREFIX_WEIGHT: f64 = 0.25;

/// Longest common prefix that earns a bonus.
pub const MAX_PREFIX_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScorerOptions {
    pub prefix_weight: f64,
    pub max_len: usize,
}

impl Default for ScorerOptions {
    fn default() -> Self {
        Self {
            prefix_weight: DEFAULT_PREFIX_WEIGHT,
            max_len: guard::DEFAULT_MAX_LEN,
        }
    }
}

impl ScorerOptions {
    pub fn with_prefix_weight(mut self, prefix_weight: f64) -> Self {
        self.prefix_weight = prefix_weight;
        self
    }

    /// Inputs longer than `max_len` units are scored with a cheap positional
    /// ratio instead of the full algorithm.
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    pub fn validate(&self) -> Result<()> {
        // also rejects NaN
        if !(0.0..=MAX_PREFIX_WEIGHT).contains(&self.prefix_weight) {
            return Err(Error::invalid(
                "prefix_weight",
                self.prefix_weight,
                "must be between 0.0 and 0.25",
            ));
        }

        if self.max_len == 0 {
            return Err(Error::invalid("max_len", self.max_len, "must be positive"));
        }

        Ok(())
    }
}

/// How a [`Score`] was arrived at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreKind {
    /// Both inputs empty, or equal in length and content.
    Identical,
    /// Exactly one input empty.
    Empty,
    /// An input was longer than the configured `max_len`. The value is a
    /// positional ratio, not Jaro-Winkler.
    Approximate,
    /// No unit of one input matched inside the window of the other.
    NoMatches,
    JaroWinkler {
        matches: usize,
        transpositions: usize,
        prefix: usize,
        jaro: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub value: f64,
    pub kind: ScoreKind,
}

impl Score {
    fn new(value: f64, kind: ScoreKind) -> Self {
        Self { value, kind }
    }

    pub fn is_approximate(&self) -> bool {
        self.kind == ScoreKind::Approximate
    }

    /// Base Jaro score, before the common prefix bonus. Degenerate kinds carry
    /// no bonus, so their value is returned unchanged; for
    /// [`ScoreKind::Approximate`] that is the positional ratio, not Jaro.
    pub fn jaro(&self) -> f64 {
        match self.kind {
            ScoreKind::JaroWinkler { jaro, .. } => jaro,
            _ => self.value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scorer {
    options: ScorerOptions,
}

impl Scorer {
    pub fn new(options: ScorerOptions) -> Result<Self> {
        options.validate()?;

        Ok(Self { options })
    }

    pub fn options(&self) -> &ScorerOptions {
        &self.options
    }

    /// Compare two strings as sequences of bytes.
    pub fn score(&self, s1: impl AsRef<[u8]>, s2: impl AsRef<[u8]>) -> Score {
        self.score_units(s1.as_ref(), s2.as_ref())
    }

    /// Compare any two sequences of code units.
    pub fn score_units<T: PartialEq>(&self, s1: &[T], s2: &[T]) -> Score {
        let window = match guard::check(s1, s2, self.options.max_len) {
            Guard::Identical => return Score::new(1.0, ScoreKind::Identical),
            Guard::Empty => return Score::new(0.0, ScoreKind::Empty),
            Guard::Approximate(ratio) => return Score::new(ratio, ScoreKind::Approximate),
            Guard::Full { window } => window,
        };

        let alignment = aligner::align(s1, s2, window);
        if alignment.matches == 0 {
            return Score::new(0.0, ScoreKind::NoMatches);
        }

        let transpositions = transpositions::count(s1, s2, &alignment);
        let jaro = jaro(alignment.matches, transpositions, s1.len(), s2.len());
        let prefix = prefix_len(s1, s2);

        Score::new(
            winkler(jaro, prefix, self.options.prefix_weight),
            ScoreKind::JaroWinkler {
                matches: alignment.matches,
                transpositions,
                prefix,
                jaro,
            },
        )
    }

    pub fn similarity(&self, s1: impl AsRef<[u8]>, s2: impl AsRef<[u8]>) -> f64 {
        self.score(s1, s2).value
    }

    pub fn distance(&self, s1: impl AsRef<[u8]>, s2: impl AsRef<[u8]>) -> f64 {
        1.0 - self.similarity(s1, s2)
    }

    /// Jaro similarity without the prefix bonus.
    pub fn jaro(&self, s1: impl AsRef<[u8]>, s2: impl AsRef<[u8]>) -> f64 {
        self.score(s1, s2).jaro()
    }
}

/// Jaro-Winkler similarity of two strings, compared byte by byte.
///
/// `prefix_weight` must lie in `[0.0, 0.25]`, otherwise
/// [`Error::InvalidArgument`] is returned and nothing is compared.
pub fn similarity(s1: impl AsRef<[u8]>, s2: impl AsRef<[u8]>, prefix_weight: f64) -> Result<f64> {
    let scorer = Scorer::new(ScorerOptions::default().with_prefix_weight(prefix_weight))?;

    Ok(scorer.similarity(s1, s2))
}

/// Length of the common leading run of both inputs, capped at
/// [`MAX_PREFIX_LEN`].
pub fn prefix_len<T: PartialEq>(s1: &[T], s2: &[T]) -> usize {
    s1.iter()
        .zip(s2.iter())
        .take(MAX_PREFIX_LEN)
        .take_while(|(a, b)| a == b)
        .count()
}

// t / 2.0 is a float division: an odd number of mismatched positions still
// counts as a fractional pair.
fn jaro(matches: usize, transpositions: usize, len1: usize, len2: usize) -> f64 {
    let m = matches as f64;
    let t = transpositions as f64;

    (m / len1 as f64 + m / len2 as f64 + (m - t / 2.0) / m) / 3.0
}

/// Assumes `prefix_weight` was validated by [`ScorerOptions::validate`].
fn winkler(jaro: f64, prefix: usize, prefix_weight: f64) -> f64 {
    jaro + prefix as f64 * prefix_weight * (1.0 - jaro)
}

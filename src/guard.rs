//! Cheap inspection of the two inputs before any match tables are allocated.
//! Degenerate pairs (empty, identical, oversized) never reach the aligner.

use tracing::warn;

/// Largest length for which the full comparison runs by default. Window
/// arithmetic in the classic implementation is done with 32-bit signed
/// integers, so anything past this is scored with [`positional_ratio`].
pub const DEFAULT_MAX_LEN: usize = i32::MAX as usize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Guard {
    /// Both empty, or equal in length and content.
    Identical,
    /// Exactly one of the inputs is empty.
    Empty,
    /// At least one input is longer than the configured bound. Carries the
    /// degraded score.
    Approximate(f64),
    /// Run the full algorithm with this match window.
    Full { window: usize },
}

pub(crate) fn check<T: PartialEq>(s1: &[T], s2: &[T], max_len: usize) -> Guard {
    match (s1.len(), s2.len()) {
        (0, 0) => return Guard::Identical,
        (0, _) | (_, 0) => return Guard::Empty,
        (len1, len2) if len1 > max_len || len2 > max_len => {
            warn!(len1, len2, max_len, "input exceeds comparison bound, using positional ratio");

            return Guard::Approximate(positional_ratio(s1, s2));
        }
        _ => {}
    }

    if s1 == s2 {
        return Guard::Identical;
    }

    Guard::Full {
        window: window(s1.len(), s2.len()),
    }
}

/// Distance two positions may be apart and still be considered a match:
/// `max(0, floor(max(len1, len2) / 2) - 1)`.
pub fn window(len1: usize, len2: usize) -> usize {
    (len1.max(len2) / 2).saturating_sub(1)
}

/// Number of positionally equal units over the shorter input, divided by the
/// longer length. This is not Jaro; it only exists so oversized inputs still
/// get a bounded score without allocating match tables.
pub(crate) fn positional_ratio<T: PartialEq>(s1: &[T], s2: &[T]) -> f64 {
    let longest = s1.len().max(s2.len());
    if longest == 0 {
        return 1.0;
    }

    let equal = s1.iter().zip(s2.iter()).filter(|(a, b)| a == b).count();

    equal as f64 / longest as f64
}

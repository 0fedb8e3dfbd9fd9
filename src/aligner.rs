/// Per-position "consumed as a match" flags for one input.
#[cfg(feature = "small-vec")]
pub type MatchTable = smallvec::SmallVec<[bool; 64]>;

/// Per-position "consumed as a match" flags for one input.
#[cfg(not(feature = "small-vec"))]
pub type MatchTable = Vec<bool>;

#[cfg(feature = "small-vec")]
fn match_table(len: usize) -> MatchTable {
    smallvec::smallvec![false; len]
}

#[cfg(not(feature = "small-vec"))]
fn match_table(len: usize) -> MatchTable {
    vec![false; len]
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    pub matches: usize,
    pub s1: MatchTable,
    pub s2: MatchTable,
}

/// Greedily pair each unit of `s1` with the first unclaimed, equal unit of
/// `s2` inside `[i - window, i + window]`, scanning `s2` low to high.
///
/// The scan order decides which pairs are marked when more than one candidate
/// is in range, and so which of them later count as transposed.
pub fn align<T: PartialEq>(s1: &[T], s2: &[T], window: usize) -> Alignment {
    let mut alignment = Alignment {
        matches: 0,
        s1: match_table(s1.len()),
        s2: match_table(s2.len()),
    };

    for (i, unit) in s1.iter().enumerate() {
        let start = i.saturating_sub(window);
        let end = i.saturating_add(window).saturating_add(1).min(s2.len());

        for j in start..end {
            if alignment.s2[j] || *unit != s2[j] {
                continue;
            }

            alignment.s1[i] = true;
            alignment.s2[j] = true;
            alignment.matches += 1;
            break;
        }
    }

    alignment
}

#[cfg(test)]
mod tests {
    use super::align;
    use crate::guard::window;

    fn tables(s1: &str, s2: &str) -> (usize, Vec<bool>, Vec<bool>) {
        let w = window(s1.len(), s2.len());
        let alignment = align(s1.as_bytes(), s2.as_bytes(), w);

        (
            alignment.matches,
            alignment.s1.to_vec(),
            alignment.s2.to_vec(),
        )
    }

    #[test]
    fn test() {
        assert_eq!(
            tables("DWAYNE", "DUANE"),
            (
                4,
                vec![true, false, true, false, true, true],
                vec![true, false, true, true, true],
            )
        );
    }

    #[test]
    fn test_claims_lowest_free_position() {
        // both `a`s of s2 are in range of s1[1]; the lower one is claimed first
        assert_eq!(
            tables("xaay", "aaxy"),
            (
                3,
                vec![false, true, true, true],
                vec![true, true, false, true],
            )
        );
    }

    #[test]
    fn test_outside_window() {
        assert_eq!(
            tables("ABCDEF", "XYZABC"),
            (0, vec![false; 6], vec![false; 6])
        );
    }

    #[test]
    fn test_zero_window() {
        assert_eq!(tables("ab", "ba"), (0, vec![false; 2], vec![false; 2]));
        assert_eq!(tables("abc", "abd"), (2, vec![true, true, false], vec![true, true, false]));
    }

    #[test]
    fn test_match_counts_agree() {
        for (s1, s2) in &[("MARTHA", "MARHTA"), ("DIXON", "DICKSONX"), ("aaaa", "aa")] {
            let (matches, t1, t2) = tables(s1, s2);

            assert_eq!(t1.iter().filter(|m| **m).count(), matches);
            assert_eq!(t2.iter().filter(|m| **m).count(), matches);
        }
    }

    #[test]
    fn test_generic_units() {
        let s1: Vec<char> = "crème".chars().collect();
        let s2: Vec<char> = "crèma".chars().collect();

        assert_eq!(align(&s1, &s2, window(s1.len(), s2.len())).matches, 4);
    }
}

use crate::aligner::Alignment;

/// Walk the matched units of both inputs in their original order and count
/// the positions where they disagree. Each swapped pair contributes two.
pub fn count<T: PartialEq>(s1: &[T], s2: &[T], alignment: &Alignment) -> usize {
    let matched1 = s1
        .iter()
        .zip(alignment.s1.iter())
        .filter_map(|(unit, matched)| if *matched { Some(unit) } else { None });

    let matched2 = s2
        .iter()
        .zip(alignment.s2.iter())
        .filter_map(|(unit, matched)| if *matched { Some(unit) } else { None });

    matched1.zip(matched2).filter(|(a, b)| a != b).count()
}

#[cfg(test)]
mod tests {
    use super::count;
    use crate::{aligner::align, guard::window};

    fn transpositions(s1: &str, s2: &str) -> usize {
        let (s1, s2) = (s1.as_bytes(), s2.as_bytes());
        let alignment = align(s1, s2, window(s1.len(), s2.len()));

        count(s1, s2, &alignment)
    }

    #[test]
    fn test() {
        assert_eq!(transpositions("MARTHA", "MARHTA"), 2);
    }

    #[test]
    fn test_in_order() {
        assert_eq!(transpositions("DWAYNE", "DUANE"), 0);
        assert_eq!(transpositions("DIXON", "DICKSONX"), 0);
    }

    #[test]
    fn test_swapped_pair() {
        assert_eq!(transpositions("ABCD", "BACD"), 2);
    }

    #[test]
    fn test_rotation_counts_every_position() {
        assert_eq!(transpositions("ABCXYZ", "BCAXYZ"), 3);
    }

    #[test]
    fn test_no_matches() {
        assert_eq!(transpositions("ABCDEF", "XYZABC"), 0);
    }
}

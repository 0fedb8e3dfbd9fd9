use std::cmp::Ordering;

use rayon::prelude::*;

use crate::scorer::Scorer;

/// Below this many candidates the thread pool costs more than it saves.
const PARALLEL_THRESHOLD: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked {
    /// Position in the candidate slice.
    pub index: usize,
    pub score: f64,
}

impl Scorer {
    /// Score `query` against every candidate, keeping those at or above
    /// `min_score`, best first. Equal scores keep candidate order.
    pub fn rank<Q, C>(&self, query: Q, candidates: &[C], min_score: f64) -> Vec<Ranked>
    where
        Q: AsRef<[u8]>,
        C: AsRef<[u8]> + Sync,
    {
        let mut ranked: Vec<Ranked> = self
            .score_all(query.as_ref(), candidates)
            .into_iter()
            .filter(|r| r.score >= min_score)
            .collect();

        ranked.sort_by(compare);
        ranked
    }

    /// Highest scoring candidate, the earliest one on ties. `None` only when
    /// there are no candidates.
    pub fn best_match<Q, C>(&self, query: Q, candidates: &[C]) -> Option<Ranked>
    where
        Q: AsRef<[u8]>,
        C: AsRef<[u8]> + Sync,
    {
        self.score_all(query.as_ref(), candidates)
            .into_iter()
            .min_by(compare)
    }

    fn score_all<C>(&self, query: &[u8], candidates: &[C]) -> Vec<Ranked>
    where
        C: AsRef<[u8]> + Sync,
    {
        let score = |(index, candidate): (usize, &C)| Ranked {
            index,
            score: self.similarity(query, candidate),
        };

        if candidates.len() >= PARALLEL_THRESHOLD {
            candidates.par_iter().enumerate().map(score).collect()
        } else {
            candidates.iter().enumerate().map(score).collect()
        }
    }
}

fn compare(a: &Ranked, b: &Ranked) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then(a.index.cmp(&b.index))
}

#[cfg(test)]
mod tests {
    use super::Ranked;
    use crate::scorer::Scorer;

    const NAMES: &[&str] = &["DUANE", "MARHTA", "DWAYNE", "MARTHA", "XYZ"];

    #[test]
    fn test_rank() {
        let ranked = Scorer::default().rank("MARTHA", NAMES, 0.5);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0], Ranked { index: 3, score: 1.0 });
        assert_eq!(ranked[1].index, 1);
        assert_close!(ranked[1].score, 0.961111111111111);
    }

    #[test]
    fn test_rank_keeps_everything_at_zero() {
        let ranked = Scorer::default().rank("MARTHA", NAMES, 0.0);

        assert_eq!(ranked.len(), NAMES.len());
        assert_eq!(ranked.last().map(|r| r.score), Some(0.0));
    }

    #[test]
    fn test_rank_ties_keep_candidate_order() {
        let ranked = Scorer::default().rank("abc", &["abd", "xyz", "abd"], 0.1);

        assert_eq!(
            ranked.iter().map(|r| r.index).collect::<Vec<_>>(),
            vec![0, 2]
        );
    }

    #[test]
    fn test_best_match() {
        let scorer = Scorer::default();

        assert_eq!(scorer.best_match("DWAYNE", NAMES).map(|r| r.index), Some(2));
        assert_eq!(scorer.best_match("DWAYNE", &[] as &[&str]), None);
        assert_eq!(
            scorer.best_match("q", &["x", "y"]),
            Some(Ranked { index: 0, score: 0.0 })
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let scorer = Scorer::default();
        let candidates: Vec<String> = (0..500).map(|i| format!("name{}", i)).collect();

        let parallel = scorer.rank("name42", &candidates, 0.0);
        let sequential: Vec<_> = candidates
            .chunks(50)
            .enumerate()
            .flat_map(|(chunk, names)| {
                scorer
                    .rank("name42", names, 0.0)
                    .into_iter()
                    .map(move |r| Ranked {
                        index: r.index + chunk * 50,
                        score: r.score,
                    })
            })
            .collect();

        assert_eq!(parallel.len(), 500);
        assert_eq!(parallel[0], Ranked { index: 42, score: 1.0 });
        for r in &sequential {
            assert_eq!(parallel.iter().find(|p| p.index == r.index), Some(r));
        }
    }
}

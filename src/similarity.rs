//! Similarity of a password to the closest known-common password.

use crate::corpus::Corpus;

/// Counts the single-character edits needed to turn `a` into `b`.
pub trait EditDistance: Send + Sync {
    fn distance(&self, a: &str, b: &str) -> usize;
}

/// Classic Levenshtein distance over Unicode scalar values.
#[derive(Debug, Clone, Copy, Default)]
pub struct Levenshtein;

impl EditDistance for Levenshtein {
    fn distance(&self, a: &str, b: &str) -> usize {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let mut prev: Vec<usize> = (0..=b.len()).collect();
        let mut curr = vec![0usize; b.len() + 1];
        for i in 1..=a.len() {
            curr[0] = i;
            for j in 1..=b.len() {
                let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
                curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
            }
            std::mem::swap(&mut prev, &mut curr);
        }
        prev[b.len()]
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Highest normalized similarity (0.0 to 100.0) between `password` and any
/// corpus entry, rounded to two decimals.
///
/// Without an edit-distance capability only exact matches count: 100.0 if
/// the password is in the corpus, else 0.0.
pub fn similarity_percentage(
    password: &str,
    corpus: &Corpus,
    distance: Option<&dyn EditDistance>,
) -> f64 {
    if corpus.is_empty() {
        return 0.0;
    }

    let Some(distance) = distance else {
        return if corpus.contains(password) { 100.0 } else { 0.0 };
    };

    let pwd_len = password.chars().count();
    let best = corpus
        .entries()
        .iter()
        .filter_map(|common| {
            let max_len = pwd_len.max(common.chars().count());
            if max_len == 0 {
                return None;
            }
            let dist = distance.distance(password, common);
            Some(100.0 * (1.0 - dist as f64 / max_len as f64))
        })
        .fold(0.0_f64, f64::max);

    round2(best.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(Levenshtein.distance("kitten", "sitting"), 3);
        assert_eq!(Levenshtein.distance("", "abc"), 3);
        assert_eq!(Levenshtein.distance("abc", "abc"), 0);
        assert_eq!(Levenshtein.distance("pässword", "password"), 1);
    }

    #[test]
    fn test_similarity_empty_corpus() {
        assert_eq!(similarity_percentage("password", &Corpus::empty(), Some(&Levenshtein)), 0.0);
        assert_eq!(similarity_percentage("password", &Corpus::empty(), None), 0.0);
    }

    #[test]
    fn test_similarity_exact_match_fallback() {
        let corpus = Corpus::from_entries(["123456", "password"]);
        assert_eq!(similarity_percentage("password", &corpus, None), 100.0);
        assert_eq!(similarity_percentage("password1", &corpus, None), 0.0);
    }

    #[test]
    fn test_similarity_picks_closest_entry() {
        let corpus = Corpus::from_entries(["dragon", "password"]);
        // one edit over nine characters
        assert_eq!(similarity_percentage("password1", &corpus, Some(&Levenshtein)), 88.89);
        assert_eq!(similarity_percentage("password", &corpus, Some(&Levenshtein)), 100.0);
    }

    #[test]
    fn test_similarity_never_negative() {
        let corpus = Corpus::from_entries(["a"]);
        let similarity = similarity_percentage("zzzzzzzz", &corpus, Some(&Levenshtein));
        assert_eq!(similarity, 0.0);
    }
}

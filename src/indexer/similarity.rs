//! Approximate string similarity used for fuzzy fallback lookups.
//!
//! The score is the matching-block ratio `2 * M / T`, where `T` is the total
//! number of characters in both strings and `M` the number of characters
//! covered by matching blocks. Blocks are found by taking the longest common
//! substring and recursing on the unmatched text to its left and right.

/// Similarity of two strings on a 0..=1 scale
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

/// Pick the candidate most similar to `query`, if any scores at least
/// `threshold`. Each candidate is scored as `ratio(candidate, query)`; on a
/// tied score the greater candidate string wins.
pub fn closest_match<'a, I>(query: &str, candidates: I, threshold: f64) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, f64)> = None;

    for candidate in candidates {
        let score = ratio(candidate, query);
        if score < threshold {
            continue;
        }
        let better = match best {
            Some((current, best_score)) => {
                score > best_score || (score == best_score && candidate > current)
            }
            None => true,
        };
        if better {
            best = Some((candidate, score));
        }
    }

    best.map(|(candidate, _)| candidate)
}

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        matched += size;

        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }

    matched
}

/// Longest common run of `a[alo..ahi]` and `b[blo..bhi]` as `(i, j, size)`.
/// The earliest run in `a` wins, then the earliest in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let width = bhi - blo;
    let mut best = (alo, blo, 0);
    let mut previous = vec![0usize; width + 1];
    let mut current = vec![0usize; width + 1];

    for i in alo..ahi {
        for j in blo..bhi {
            let slot = j - blo + 1;
            if a[i] == b[j] {
                let size = previous[slot - 1] + 1;
                current[slot] = size;
                if size > best.2 {
                    best = (i + 1 - size, j + 1 - size, size);
                }
            } else {
                current[slot] = 0;
            }
        }
        std::mem::swap(&mut previous, &mut current);
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_identical_and_empty() {
        assert!(approx(ratio("taco", "taco"), 1.0));
        assert!(approx(ratio("", ""), 1.0));
        assert!(approx(ratio("taco", ""), 0.0));
    }

    #[test]
    fn test_disjoint() {
        assert!(approx(ratio("abc", "xyz"), 0.0));
    }

    #[test]
    fn test_typo_scores() {
        // "pancak" + "s" matched out of 7 + 8 characters
        assert!(approx(ratio("pancaks", "pancakes"), 14.0 / 15.0));
        // only "bcd" matches; the two "a"s sit on opposite sides of it
        assert!(approx(ratio("abcd", "bcda"), 0.75));
    }

    #[test]
    fn test_ratio_is_symmetric_for_simple_cases() {
        assert!(approx(ratio("italian", "italain"), ratio("italain", "italian")));
    }

    #[test]
    fn test_ratio_depends_on_argument_order() {
        // "ab" matches first in "abbcaba" and leaves nothing on either side
        assert!(approx(ratio("abbcaba", "bbab"), 4.0 / 11.0));
        assert!(approx(ratio("bbab", "abbcaba"), 8.0 / 11.0));
    }

    #[test]
    fn test_closest_match_scores_candidate_against_query() {
        assert_eq!(closest_match("bbab", ["abbcaba"], 0.7), None);
        assert_eq!(closest_match("abbcaba", ["bbab"], 0.7), Some("bbab"));
    }

    #[test]
    fn test_closest_match_threshold() {
        let candidates = ["pancakes", "burger", "lasagna"];

        assert_eq!(
            closest_match("pancaks", candidates.iter().copied(), 0.7),
            Some("pancakes")
        );
        assert_eq!(
            closest_match("xyzzyplugh", candidates.iter().copied(), 0.7),
            None
        );
    }

    #[test]
    fn test_closest_match_prefers_highest_then_greatest() {
        let candidates = ["tacos", "taco", "tac"];
        assert_eq!(
            closest_match("taco", candidates.iter().copied(), 0.5),
            Some("taco")
        );

        let tied = ["abx", "aby"];
        assert_eq!(closest_match("abz", tied.iter().copied(), 0.5), Some("aby"));
        assert_eq!(closest_match("make", ["bake", "cake"], 0.7), Some("cake"));
        assert_eq!(closest_match("make", ["cake", "bake"], 0.7), Some("cake"));
    }
}

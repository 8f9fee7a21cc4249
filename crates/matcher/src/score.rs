//! Fuzzy similarity scoring.

/// Similarity between two canonical names, in `[0.0, 1.0]` rounded to
/// three decimals.
///
/// With `token_sort` the tokens of each name are sorted
/// lexicographically and rejoined with single spaces before the ratio
/// is computed, which neutralizes surname/given-name order swaps. The
/// reorder happens strictly before comparison, so two names with the
/// same token multiset score 1.0 under `token_sort`.
///
/// If either side is empty the score is 0.0: similarity against an
/// empty canonical name is undefined and treated as non-matching.
pub fn score(a: &str, b: &str, token_sort: bool) -> f64 {
    let ratio = if token_sort {
        ratio(&sort_tokens(a), &sort_tokens(b))
    } else {
        ratio(a, b)
    };
    (ratio / 100.0 * 1000.0).round() / 1000.0
}

fn sort_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split(' ').collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Levenshtein-based similarity scaled to `[0, 100]`.
fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let dist = levenshtein(&a, &b);
    let max_len = a.len().max(b.len());
    100.0 * (1.0 - dist as f64 / max_len as f64)
}

/// Edit distance with unit insert/delete/substitute costs, two-row DP.
fn levenshtein(a: &[char], b: &[char]) -> usize {
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitute = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitute.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

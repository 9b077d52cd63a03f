// Fuzzy title matching between the screening tables and the blurb pages,
// which rarely print a title the same way twice.

use deunicode::deunicode;

/// Score given to a title fully contained in the other one
const CONTAINMENT_SCORE: f64 = 0.9;

/// Lowercase, strip diacritics, keep `[a-z0-9]` runs separated by one space
pub fn normalize_for_match(text: &str) -> String {
    let folded = deunicode(&text.to_lowercase()).to_lowercase();
    folded
        .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Longest common run of `a[alo..ahi]` and `b[blo..bhi]`, earliest in `a`
/// then earliest in `b` on ties: `(i, j, len)`
fn find_longest_match(a: &[char], b: &[char], alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_len) = (alo, blo, 0);
    let width = bhi - blo;
    let mut prev = vec![0usize; width + 1];

    for i in alo..ahi {
        let mut current = vec![0usize; width + 1];
        for j in blo..bhi {
            if a[i] == b[j] {
                let len = prev[j - blo] + 1;
                current[j - blo + 1] = len;
                if len > best_len {
                    best_i = i + 1 - len;
                    best_j = j + 1 - len;
                    best_len = len;
                }
            }
        }
        prev = current;
    }

    (best_i, best_j, best_len)
}

/// Total size of the recursive matching blocks of `a` and `b`
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut total = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        if alo >= ahi || blo >= bhi {
            continue;
        }
        let (i, j, len) = find_longest_match(a, b, alo, ahi, blo, bhi);
        if len == 0 {
            continue;
        }
        total += len;
        queue.push((alo, i, blo, j));
        queue.push((i + len, ahi, j + len, bhi));
    }

    total
}

/// Similarity in `[0, 1]`: twice the matched characters over the total length
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

/// Pick the candidate best matching `target`.
///
/// An exact match after normalization wins outright. Otherwise the highest
/// scoring candidate (first one on ties) wins if it reaches `threshold`.
pub fn best_match_title<'a, I>(target: &str, candidates: I, threshold: f64) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let target_norm = normalize_for_match(target);
    if target_norm.is_empty() {
        return None;
    }

    let mut best: Option<(&'a str, f64)> = None;
    for candidate in candidates {
        let candidate_norm = normalize_for_match(candidate);
        if candidate_norm.is_empty() {
            continue;
        }
        if candidate_norm == target_norm {
            return Some(candidate);
        }

        let mut score = similarity_ratio(&target_norm, &candidate_norm);
        if candidate_norm.contains(&target_norm) || target_norm.contains(&candidate_norm) {
            score = score.max(CONTAINMENT_SCORE);
        }
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((candidate, score));
        }
    }

    best.filter(|(_, score)| *score >= threshold)
        .map(|(candidate, _)| candidate)
}

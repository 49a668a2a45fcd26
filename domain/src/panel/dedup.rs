//! Question de-duplication
//!
//! Two questions are considered duplicates when they share too many
//! significant words. Significant words are lower-cased tokens longer
//! than four characters, which filters out articles, auxiliaries, and
//! most glue words without a stop list.

use std::collections::HashSet;

/// Absolute shared-word count above which two questions are duplicates
const OVERLAP_THRESHOLD: usize = 3;

/// Ratio (as a percentage of the smaller word set) that flags
/// near-identical strings even when they contain few long words
const OVERLAP_RATIO_PERCENT: usize = 80;

/// Lower-cased words longer than four characters, punctuation stripped
pub fn significant_words(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() > 4)
        .map(|w| w.to_lowercase())
        .collect()
}

/// Whether `candidate` trivially duplicates `existing`
pub fn is_duplicate(candidate: &str, existing: &str) -> bool {
    let a = significant_words(candidate);
    let b = significant_words(existing);
    if a.is_empty() || b.is_empty() {
        return false;
    }

    let overlap = a.intersection(&b).count();
    if overlap > OVERLAP_THRESHOLD {
        return true;
    }

    let smaller = a.len().min(b.len());
    smaller >= 2 && overlap * 100 >= smaller * OVERLAP_RATIO_PERCENT
}

/// Whether `candidate` duplicates any question in `history`
pub fn duplicates_any<'a, I>(candidate: &str, history: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    history.into_iter().any(|q| is_duplicate(candidate, q))
}

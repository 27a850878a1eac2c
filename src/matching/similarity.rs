use rapidfuzz::distance::levenshtein;

use crate::matching::normalize::NormalizedName;
use crate::matching::NameMatcher;

/// Default share of the longer title's length that may differ
pub const DEFAULT_THRESHOLD: f64 = 0.2;

/// Unit-cost Levenshtein distance (insert/delete/substitute), counted in chars
pub fn edit_distance(a: &str, b: &str) -> usize {
    levenshtein::distance(a.chars(), b.chars())
}

/// Fuzzy equality of two raw titles.
///
/// Both names are normalized, then accepted when their edit distance is at
/// most `max(len_a, len_b) * threshold`. Symmetric in `a` and `b`, but not
/// transitive. Two titles that both normalize to "" are similar.
pub fn is_similar(name_a: &str, name_b: &str, threshold: f64) -> bool {
    is_similar_normalized(
        &NormalizedName::new(name_a),
        &NormalizedName::new(name_b),
        threshold,
    )
}

/// [`is_similar`] over names that are already normalized
pub fn is_similar_normalized(a: &NormalizedName, b: &NormalizedName, threshold: f64) -> bool {
    let distance = edit_distance(a.as_str(), b.as_str());
    let limit = a.char_len().max(b.char_len()) as f64 * threshold;
    distance as f64 <= limit
}

/// Edit-distance matcher with a length-relative tolerance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityMatcher {
    threshold: f64,
}

impl SimilarityMatcher {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for SimilarityMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl NameMatcher for SimilarityMatcher {
    fn matches(&self, a: &NormalizedName, b: &NormalizedName) -> bool {
        is_similar_normalized(a, b, self.threshold)
    }

    fn name(&self) -> &str {
        "levenshtein"
    }
}

/// Matches only identical normalized names
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatcher;

impl NameMatcher for ExactMatcher {
    fn matches(&self, a: &NormalizedName, b: &NormalizedName) -> bool {
        a.as_str() == b.as_str()
    }

    fn name(&self) -> &str {
        "exact"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("", ""), 0);
        assert_eq!(edit_distance("abc", ""), 3);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("counterstrike", "counter strike"), 1);
    }

    #[test]
    fn test_punctuation_difference_is_similar() {
        assert!(is_similar("Counter-Strike", "Counter Strike", DEFAULT_THRESHOLD));
        assert!(is_similar("Counter-Strike", "COUNTER-STRIKE", 0.0));
    }

    #[test]
    fn test_threshold_sensitivity() {
        assert!(is_similar("Counter-Strike", "Counter Strike", 0.2));
        assert!(!is_similar("Counter-Strike", "Counter Strike", 0.05));
    }

    #[test]
    fn test_different_games_not_similar() {
        assert!(!is_similar("Counter-Strike", "Dota 2", DEFAULT_THRESHOLD));
        assert!(!is_similar("Counter-Strike", "CS:GO", DEFAULT_THRESHOLD));
    }

    #[test]
    fn test_empty_names_are_similar() {
        assert!(is_similar("", "", DEFAULT_THRESHOLD));
        assert!(is_similar("Edition", "!!!", 0.0));
    }

    #[test]
    fn test_short_titles_have_little_tolerance() {
        // 3 chars * 0.2 = 0.6 allowed edits
        assert!(!is_similar("Abc", "Abd", DEFAULT_THRESHOLD));
        // 30 chars * 0.2 = 6 allowed edits
        assert!(is_similar(
            "abcdefghijklmnopqrstuvwxyzabcd",
            "abcdefghijklmnopqrstuvwxyzabce",
            DEFAULT_THRESHOLD
        ));
    }

    #[test]
    fn test_not_transitive() {
        let a = "abcdefghij";
        let b = "abcdefghxy";
        let c = "abcdefuvxy";
        assert!(is_similar(a, b, DEFAULT_THRESHOLD));
        assert!(is_similar(b, c, DEFAULT_THRESHOLD));
        assert!(!is_similar(a, c, DEFAULT_THRESHOLD));
    }

    #[test]
    fn test_matchers() {
        let a = NormalizedName::new("Counter-Strike");
        let b = NormalizedName::new("Counter Strike");
        let c = NormalizedName::new("counter strike!");

        assert!(SimilarityMatcher::default().matches(&a, &b));
        assert!(!ExactMatcher.matches(&a, &b));
        assert!(ExactMatcher.matches(&b, &c));
        assert_eq!(SimilarityMatcher::default().threshold(), DEFAULT_THRESHOLD);
    }
}

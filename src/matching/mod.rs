pub mod normalize;
pub mod similarity;

pub use normalize::{normalize, NormalizedName};
pub use similarity::{
    edit_distance, is_similar, is_similar_normalized, ExactMatcher, SimilarityMatcher,
    DEFAULT_THRESHOLD,
};

/// Trait for deciding whether two normalized titles name the same game
pub trait NameMatcher: Send + Sync {
    /// Must be symmetric in `a` and `b`
    fn matches(&self, a: &NormalizedName, b: &NormalizedName) -> bool;

    /// Get matcher name for logging
    fn name(&self) -> &str;
}

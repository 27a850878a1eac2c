use thiserror::Error;

/// Main error type for wishlist comparison
///
/// Matching itself never fails; errors only come from configuration and
/// the JSON boundaries where source and exclusion snapshots are loaded.
#[derive(Error, Debug)]
pub enum CompareError {
    /// Fuzzy threshold outside `0.0..=1.0` or not finite
    #[error("Invalid fuzzy match threshold: {0} (expected a value between 0.0 and 1.0)")]
    InvalidThreshold(f64),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CompareError>;

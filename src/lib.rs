//! # KissBot Wishlist Compare
//!
//! Reconciles two game wishlists from different catalog platforms into
//! three groups: games on both, games only on the first, games only on
//! the second.
//! - Title normalization (editions, punctuation, roman numerals)
//! - Levenshtein fuzzy matching with a length-relative threshold
//! - Greedy, order-dependent matching with consumption by normalized name
//! - User exclusion snapshots applied to each side first
//!
//! ## Example Usage
//!
//! ```rust
//! use kissbot_wishlist_compare::{CompareEngine, CompareOptions, Game, GameCollection};
//!
//! let steam = GameCollection::new("steam", "alice", vec![Game::new(Some(730), "Counter-Strike")]);
//! let gog = GameCollection::new("gog", "alice", vec![Game::named("Counter Strike")]);
//!
//! let engine = CompareEngine::new(CompareOptions::default()).unwrap();
//! let result = engine.run(&steam, &gog, &[]);
//!
//! assert_eq!(result.match_count(), 1);
//! println!("{}", result.summary());
//! ```

pub mod comparator;
pub mod core;
pub mod engine;
pub mod error;
pub mod exclusion;
pub mod matching;

// Re-export primary types
pub use comparator::{compare, Comparator, ComparisonOutcome, MatchPair};
pub use crate::core::{ComparisonReport, ComparisonResult, ComparisonStats, Game, GameCollection, RawGame};
pub use engine::{CompareEngine, CompareOptions, ComparisonJob};
pub use error::{CompareError, Result};
pub use exclusion::{filter_games, is_excluded, ExclusionEntry, ExclusionFilter, ExclusionList};
pub use matching::{is_similar, normalize, NameMatcher, NormalizedName, SimilarityMatcher};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

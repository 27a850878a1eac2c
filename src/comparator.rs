use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::{Game, GameCollection};
use crate::matching::{NameMatcher, NormalizedName, SimilarityMatcher};

/// One accepted pairing between the two sides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchPair {
    pub first: Game,
    pub second: Game,
}

/// Three-way partition produced by one comparison run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonOutcome {
    pub both: Vec<Game>,
    pub only_in_first: Vec<Game>,
    pub only_in_second: Vec<Game>,
    /// Every pairing behind `both`, in match order
    #[serde(default)]
    pub pairs: Vec<MatchPair>,
}

/// Greedy first-match reconciliation of two collections
///
/// Each game of `first`, in order, takes the first not-yet-consumed game of
/// `second` that the matcher accepts. There is no backtracking, so the
/// result depends on input order. Consumption is keyed by normalized name:
/// once a second-side name is matched, every second-side game with that
/// name is spoken for.
pub struct Comparator<M: NameMatcher = SimilarityMatcher> {
    matcher: M,
}

impl Comparator<SimilarityMatcher> {
    pub fn with_threshold(threshold: f64) -> Self {
        Self::new(SimilarityMatcher::new(threshold))
    }
}

impl<M: NameMatcher> Comparator<M> {
    pub fn new(matcher: M) -> Self {
        Self { matcher }
    }

    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    pub fn compare(&self, first: &GameCollection, second: &GameCollection) -> ComparisonOutcome {
        // Normalize the second side once; the loop below is O(|first| * |second|).
        let candidates: Vec<(NormalizedName, &Game)> =
            second.iter().map(|game| (game.normalized(), game)).collect();

        let mut consumed: HashSet<&str> = HashSet::new();
        let mut outcome = ComparisonOutcome::default();

        for game in first.iter() {
            let name = game.normalized();
            let found = candidates.iter().find(|(candidate, _)| {
                !consumed.contains(candidate.as_str()) && self.matcher.matches(&name, candidate)
            });

            match found {
                Some((candidate, matched)) => {
                    tracing::debug!(
                        "Matched '{}' ({}) with '{}' ({}) via {}",
                        game.name,
                        first.source_label(),
                        matched.name,
                        second.source_label(),
                        self.matcher.name()
                    );
                    consumed.insert(candidate.as_str());
                    outcome.both.push(game.clone());
                    outcome.pairs.push(MatchPair {
                        first: game.clone(),
                        second: (*matched).clone(),
                    });
                }
                None => outcome.only_in_first.push(game.clone()),
            }
        }

        outcome.only_in_second = candidates
            .iter()
            .filter(|(candidate, _)| !consumed.contains(candidate.as_str()))
            .map(|(_, game)| (*game).clone())
            .collect();

        tracing::debug!(
            "Compared {} x {} games: {} both, {} only in {}, {} only in {}",
            first.len(),
            second.len(),
            outcome.both.len(),
            outcome.only_in_first.len(),
            first.source_label(),
            outcome.only_in_second.len(),
            second.source_label()
        );

        outcome
    }
}

impl Default for Comparator<SimilarityMatcher> {
    fn default() -> Self {
        Self::new(SimilarityMatcher::default())
    }
}

/// Compare two collections with the edit-distance matcher at `threshold`
pub fn compare(first: &GameCollection, second: &GameCollection, threshold: f64) -> ComparisonOutcome {
    Comparator::with_threshold(threshold).compare(first, second)
}

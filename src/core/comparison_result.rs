use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::comparator::ComparisonOutcome;
use crate::core::Game;
use crate::error::Result;

/// Final, immutable result of reconciling two wishlists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    /// Games found on both sides (as named by the first source)
    pub both: Vec<Game>,

    /// Games only the first source has
    pub only_in_first: Vec<Game>,

    /// Games only the second source has
    pub only_in_second: Vec<Game>,

    /// Platform label of the first source (steam, gog, ...)
    pub first_label: String,

    /// Platform label of the second source
    pub second_label: String,

    /// When the comparison was run
    pub compared_at: DateTime<Utc>,
}

/// Derived counters, serializable for the reporting side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonStats {
    pub total_unique_games: usize,
    pub match_count: usize,
    pub only_in_first_count: usize,
    pub only_in_second_count: usize,
    pub match_percentage: f64,
    pub are_identical: bool,
    pub have_overlap: bool,
}

/// Presentation view handed to the report renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub first_label: String,
    pub second_label: String,
    pub compared_at: DateTime<Utc>,
    pub stats: ComparisonStats,
    pub both: Vec<String>,
    pub only_in_first: Vec<String>,
    pub only_in_second: Vec<String>,
}

impl ComparisonResult {
    /// Wrap a comparator outcome, stamped with the current time
    pub fn new(
        outcome: ComparisonOutcome,
        first_label: impl Into<String>,
        second_label: impl Into<String>,
    ) -> Self {
        Self {
            both: outcome.both,
            only_in_first: outcome.only_in_first,
            only_in_second: outcome.only_in_second,
            first_label: first_label.into(),
            second_label: second_label.into(),
            compared_at: Utc::now(),
        }
    }

    /// Override the timestamp (replays, fixtures)
    pub fn with_compared_at(mut self, compared_at: DateTime<Utc>) -> Self {
        self.compared_at = compared_at;
        self
    }

    pub fn total_unique_games(&self) -> usize {
        self.both.len() + self.only_in_first.len() + self.only_in_second.len()
    }

    pub fn match_count(&self) -> usize {
        self.both.len()
    }

    /// Share of matched games in percent, `0.0` when there are no games
    pub fn match_percentage(&self) -> f64 {
        let total = self.total_unique_games();
        if total == 0 {
            return 0.0;
        }
        self.match_count() as f64 / total as f64 * 100.0
    }

    pub fn are_identical(&self) -> bool {
        self.only_in_first.is_empty() && self.only_in_second.is_empty()
    }

    pub fn have_overlap(&self) -> bool {
        !self.both.is_empty()
    }

    pub fn stats(&self) -> ComparisonStats {
        ComparisonStats {
            total_unique_games: self.total_unique_games(),
            match_count: self.match_count(),
            only_in_first_count: self.only_in_first.len(),
            only_in_second_count: self.only_in_second.len(),
            match_percentage: self.match_percentage(),
            are_identical: self.are_identical(),
            have_overlap: self.have_overlap(),
        }
    }

    /// Keep only the first game per normalized name across all three lists
    ///
    /// Lists are visited in the order `both`, `only_in_first`,
    /// `only_in_second`, so a name already reported as shared never shows up
    /// again as one-sided.
    pub fn remove_duplicates(&self) -> Self {
        let mut seen = HashSet::new();
        let mut dedupe = |games: &[Game]| -> Vec<Game> {
            games
                .iter()
                .filter(|game| seen.insert(game.identity_key()))
                .cloned()
                .collect()
        };

        let both = dedupe(&self.both);
        let only_in_first = dedupe(&self.only_in_first);
        let only_in_second = dedupe(&self.only_in_second);

        Self {
            both,
            only_in_first,
            only_in_second,
            first_label: self.first_label.clone(),
            second_label: self.second_label.clone(),
            compared_at: self.compared_at,
        }
    }

    /// Apply `predicate` to all three lists
    pub fn filter<F>(&self, predicate: F) -> Self
    where
        F: Fn(&Game) -> bool,
    {
        let keep = |games: &[Game]| -> Vec<Game> {
            games.iter().filter(|&game| predicate(game)).cloned().collect()
        };

        Self {
            both: keep(&self.both),
            only_in_first: keep(&self.only_in_first),
            only_in_second: keep(&self.only_in_second),
            first_label: self.first_label.clone(),
            second_label: self.second_label.clone(),
            compared_at: self.compared_at,
        }
    }

    /// Presentation view: stats plus case-insensitively sorted titles
    pub fn to_report(&self) -> ComparisonReport {
        ComparisonReport {
            first_label: self.first_label.clone(),
            second_label: self.second_label.clone(),
            compared_at: self.compared_at,
            stats: self.stats(),
            both: sorted_titles(&self.both),
            only_in_first: sorted_titles(&self.only_in_first),
            only_in_second: sorted_titles(&self.only_in_second),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Get display string for logging
    pub fn summary(&self) -> String {
        format!(
            "{} vs {}: {} shared, {} only in {}, {} only in {} ({:.1}% match)",
            self.first_label,
            self.second_label,
            self.match_count(),
            self.only_in_first.len(),
            self.first_label,
            self.only_in_second.len(),
            self.second_label,
            self.match_percentage()
        )
    }
}

fn sorted_titles(games: &[Game]) -> Vec<String> {
    let mut titles: Vec<String> = games.iter().map(|game| game.name.clone()).collect();
    titles.sort_by_cached_key(|title| (title.to_lowercase(), title.clone()));
    titles
}

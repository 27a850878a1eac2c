use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::comparator::Comparator;
use crate::core::{ComparisonResult, GameCollection};
use crate::error::{CompareError, Result};
use crate::exclusion::{ExclusionEntry, ExclusionFilter};
use crate::matching::{SimilarityMatcher, DEFAULT_THRESHOLD};

/// Environment variable overriding the fuzzy match threshold
pub const THRESHOLD_ENV: &str = "FUZZY_MATCH_THRESHOLD";

/// Comparison options/configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompareOptions {
    /// Share of the longer title that may differ (0.0 - 1.0)
    pub fuzzy_match_threshold: f64,
    /// Apply the exclusion snapshot before comparing
    pub apply_exclusions: bool,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            fuzzy_match_threshold: DEFAULT_THRESHOLD,
            apply_exclusions: true,
        }
    }
}

impl CompareOptions {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_match_threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let threshold = self.fuzzy_match_threshold;
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(CompareError::InvalidThreshold(threshold));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Defaults, with the threshold taken from `FUZZY_MATCH_THRESHOLD` when set
    pub fn from_env() -> Result<Self> {
        let mut options = Self::default();
        if let Ok(raw) = std::env::var(THRESHOLD_ENV) {
            options.fuzzy_match_threshold = raw.trim().parse::<f64>().map_err(|e| {
                CompareError::Config(format!("{} must be a number, got '{}': {}", THRESHOLD_ENV, raw, e))
            })?;
        }
        options.validate()?;
        Ok(options)
    }
}

/// A pair of wishlists to reconcile
#[derive(Debug, Clone)]
pub struct ComparisonJob {
    pub first: GameCollection,
    pub second: GameCollection,
}

impl ComparisonJob {
    pub fn new(first: GameCollection, second: GameCollection) -> Self {
        Self { first, second }
    }
}

/// Runs the full pipeline: exclusions -> comparator -> result
pub struct CompareEngine {
    options: CompareOptions,
    comparator: Comparator<SimilarityMatcher>,
}

impl CompareEngine {
    pub fn new(options: CompareOptions) -> Result<Self> {
        options.validate()?;
        let comparator = Comparator::with_threshold(options.fuzzy_match_threshold);
        Ok(Self { options, comparator })
    }

    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    /// Reconcile two collections after removing excluded games from each
    pub fn run(
        &self,
        first: &GameCollection,
        second: &GameCollection,
        exclusions: &[ExclusionEntry],
    ) -> ComparisonResult {
        let filter = self.exclusion_filter(exclusions);
        self.run_filtered(first, second, &filter)
    }

    /// Independent runs in parallel; each run's matching stays sequential
    pub fn run_batch(&self, jobs: &[ComparisonJob], exclusions: &[ExclusionEntry]) -> Vec<ComparisonResult> {
        let filter = self.exclusion_filter(exclusions);
        jobs.par_iter()
            .map(|job| self.run_filtered(&job.first, &job.second, &filter))
            .collect()
    }

    fn exclusion_filter(&self, exclusions: &[ExclusionEntry]) -> ExclusionFilter {
        if self.options.apply_exclusions {
            ExclusionFilter::new(exclusions)
        } else {
            ExclusionFilter::default()
        }
    }

    /// Apply exclusions, then warn about titles the remaining list repeats
    fn prepare_side(collection: &GameCollection, filter: &ExclusionFilter) -> GameCollection {
        let filtered = filter.apply(collection);
        let duplicates = filtered.duplicate_names();
        if !duplicates.is_empty() {
            tracing::warn!(
                "{} ({}) lists {} titles more than once: {:?}",
                filtered.source_label(),
                filtered.owner_id(),
                duplicates.len(),
                duplicates
            );
        }
        filtered
    }

    fn run_filtered(
        &self,
        first: &GameCollection,
        second: &GameCollection,
        filter: &ExclusionFilter,
    ) -> ComparisonResult {
        let start = Instant::now();

        let first = Self::prepare_side(first, filter);
        let second = Self::prepare_side(second, filter);

        let outcome = self.comparator.compare(&first, &second);
        // The comparator may list a name twice (repeated titles on one side);
        // the published result is always disjoint by normalized name.
        let result = ComparisonResult::new(outcome, first.source_label(), second.source_label())
            .remove_duplicates();

        tracing::info!(
            "{} in {:.2}ms",
            result.summary(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        result
    }
}

impl Default for CompareEngine {
    fn default() -> Self {
        let options = CompareOptions::default();
        Self {
            comparator: Comparator::with_threshold(options.fuzzy_match_threshold),
            options,
        }
    }
}

//! User-maintained exclusions, applied to each side before comparison.
//!
//! Precedence for one entry against one game:
//! 1. both carry a known id -> the ids must be equal
//! 2. otherwise -> the normalized names must be equal
//!
//! A name-only entry therefore excludes every game with that normalized
//! name, whatever its id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::{Game, GameCollection};
use crate::error::Result;
use crate::matching::normalize;

/// One user-declared exclusion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExclusionEntry {
    pub name: String,

    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    pub reason: String,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl ExclusionEntry {
    pub fn new(name: impl Into<String>, id: Option<i64>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id,
            reason: reason.into(),
            created_at: Utc::now(),
        }
    }

    /// Id usable for matching (`0` counts as missing)
    pub fn known_id(&self) -> Option<i64> {
        self.id.filter(|id| *id != 0)
    }

    /// Whether this entry removes `game`
    pub fn excludes(&self, game: &Game) -> bool {
        match (self.known_id(), game.known_id()) {
            (Some(entry_id), Some(game_id)) => entry_id == game_id,
            _ => normalize(&self.name) == game.normalized_name(),
        }
    }
}

/// Lookup sets precomputed from one exclusion snapshot
#[derive(Debug, Clone, Default)]
pub struct ExclusionFilter {
    ids: HashSet<i64>,
    /// Normalized names of every entry
    names: HashSet<String>,
    /// Normalized names of entries without a known id
    name_only: HashSet<String>,
}

impl ExclusionFilter {
    pub fn new(entries: &[ExclusionEntry]) -> Self {
        let mut filter = Self::default();
        for entry in entries {
            let name = normalize(&entry.name);
            match entry.known_id() {
                Some(id) => {
                    filter.ids.insert(id);
                }
                None => {
                    filter.name_only.insert(name.clone());
                }
            }
            filter.names.insert(name);
        }
        filter
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn is_excluded(&self, game: &Game) -> bool {
        let name = game.normalized_name();
        match game.known_id() {
            // Id-carrying entries can only match by id here; name-only
            // entries still match by name.
            Some(id) => self.ids.contains(&id) || self.name_only.contains(&name),
            None => self.names.contains(&name),
        }
    }

    /// New collection without the excluded games, labels preserved
    pub fn apply(&self, collection: &GameCollection) -> GameCollection {
        if self.is_empty() {
            return collection.clone();
        }
        let filtered = collection.filter(|game| !self.is_excluded(game));
        let removed = collection.len() - filtered.len();
        if removed > 0 {
            tracing::debug!(
                "Excluded {} of {} games from {}",
                removed,
                collection.len(),
                collection.source_label()
            );
        }
        filtered
    }
}

/// Whether any entry removes `game`
pub fn is_excluded(game: &Game, entries: &[ExclusionEntry]) -> bool {
    entries.iter().any(|entry| entry.excludes(game))
}

/// Copy of `collection` without the games any entry removes
pub fn filter_games(collection: &GameCollection, entries: &[ExclusionEntry]) -> GameCollection {
    ExclusionFilter::new(entries).apply(collection)
}

/// Immutable snapshot of the exclusion registry
///
/// Edits produce a new snapshot; whichever snapshot is written back last
/// wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExclusionList {
    entries: Vec<ExclusionEntry>,
}

impl ExclusionList {
    pub fn new(entries: Vec<ExclusionEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ExclusionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot with `entry` added, replacing an entry for the same game
    pub fn with_entry(&self, entry: ExclusionEntry) -> Self {
        let name = normalize(&entry.name);
        let mut entries: Vec<ExclusionEntry> = self
            .entries
            .iter()
            .filter(|existing| {
                existing.known_id() != entry.known_id() || normalize(&existing.name) != name
            })
            .cloned()
            .collect();
        entries.push(entry);
        Self { entries }
    }

    /// Snapshot without entries whose normalized name equals `name`
    pub fn without_name(&self, name: &str) -> Self {
        let key = normalize(name);
        self.retain(|entry| normalize(&entry.name) != key)
    }

    /// Snapshot without entries carrying `id`
    pub fn without_id(&self, id: i64) -> Self {
        self.retain(|entry| entry.known_id() != Some(id))
    }

    fn retain<F>(&self, keep: F) -> Self
    where
        F: Fn(&ExclusionEntry) -> bool,
    {
        Self {
            entries: self.entries.iter().filter(|&entry| keep(entry)).cloned().collect(),
        }
    }

    pub fn is_excluded(&self, game: &Game) -> bool {
        is_excluded(game, &self.entries)
    }

    pub fn filter(&self) -> ExclusionFilter {
        ExclusionFilter::new(&self.entries)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<Vec<ExclusionEntry>> for ExclusionList {
    fn from(entries: Vec<ExclusionEntry>) -> Self {
        Self::new(entries)
    }
}

use std::collections::HashSet;
use std::sync::Arc;

use crate::core::game::{Game, RawGame, RecordKey};
use crate::error::Result;
use crate::matching::normalize;

/// Ordered, immutable list of games from one platform for one owner
///
/// Items live behind an `Arc`, so clones are cheap and every
/// transformation returns a new collection instead of editing in place.
#[derive(Debug, Clone)]
pub struct GameCollection {
    source_label: String,
    owner_id: String,
    items: Arc<[Game]>,
}

impl GameCollection {
    /// Create a collection from already-typed games
    pub fn new(
        source_label: impl Into<String>,
        owner_id: impl Into<String>,
        items: impl IntoIterator<Item = Game>,
    ) -> Self {
        Self {
            source_label: source_label.into(),
            owner_id: owner_id.into(),
            items: items.into_iter().collect(),
        }
    }

    /// Create an empty collection
    pub fn empty(source_label: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self::new(source_label, owner_id, Vec::new())
    }

    /// Build from source adapter rows (bare titles or records)
    pub fn from_raw(
        source_label: impl Into<String>,
        owner_id: impl Into<String>,
        rows: impl IntoIterator<Item = RawGame>,
    ) -> Self {
        Self::new(source_label, owner_id, rows.into_iter().map(Game::from))
    }

    /// Build from a JSON array of source adapter rows
    pub fn from_json(
        source_label: impl Into<String>,
        owner_id: impl Into<String>,
        json: &str,
    ) -> Result<Self> {
        let rows: Vec<RawGame> = serde_json::from_str(json)?;
        Ok(Self::from_raw(source_label, owner_id, rows))
    }

    fn with_items(&self, items: Vec<Game>) -> Self {
        Self {
            source_label: self.source_label.clone(),
            owner_id: self.owner_id.clone(),
            items: items.into(),
        }
    }

    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn items(&self) -> &[Game] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Game> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether both collections share the same item storage
    pub fn ptr_eq(&self, other: &GameCollection) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }

    /// Whether a game with the same normalized name is present
    pub fn contains(&self, game: &Game) -> bool {
        let key = game.identity_key();
        self.items.iter().any(|item| item.identity_key() == key)
    }

    pub fn contains_id(&self, id: i64) -> bool {
        self.find_by_id(id).is_some()
    }

    /// First game carrying `id`; `0` never matches
    pub fn find_by_id(&self, id: i64) -> Option<&Game> {
        self.items.iter().find(|item| item.known_id() == Some(id))
    }

    /// All games whose normalized name equals the normalized `name`
    pub fn find_by_name(&self, name: &str) -> Vec<&Game> {
        let key = normalize(name);
        self.items
            .iter()
            .filter(|item| item.normalized_name() == key)
            .collect()
    }

    /// Append `game`, or hand back this very collection when an item with the
    /// same identity already exists
    pub fn add(&self, game: Game) -> Self {
        if self.contains(&game) {
            return self.clone();
        }
        let mut items = self.items.to_vec();
        items.push(game);
        self.with_items(items)
    }

    /// Drop every item sharing `game`'s normalized name
    pub fn remove(&self, game: &Game) -> Self {
        let key = game.identity_key();
        self.filter(|item| item.identity_key() != key)
    }

    pub fn filter<F>(&self, predicate: F) -> Self
    where
        F: Fn(&Game) -> bool,
    {
        self.with_items(self.items.iter().filter(|&item| predicate(item)).cloned().collect())
    }

    pub fn map<T, F>(&self, f: F) -> Vec<T>
    where
        F: Fn(&Game) -> T,
    {
        self.items.iter().map(f).collect()
    }

    /// Union keeping `self`'s labels; items of `other` whose key is already
    /// present are skipped
    pub fn merge(&self, other: &GameCollection) -> Self {
        let mut seen: HashSet<RecordKey> = self.items.iter().map(RecordKey::of).collect();
        let mut items = self.items.to_vec();
        for game in other.iter() {
            if seen.insert(RecordKey::of(game)) {
                items.push(game.clone());
            }
        }
        self.with_items(items)
    }

    /// Items of `self` whose key is absent from `other`
    pub fn difference(&self, other: &GameCollection) -> Self {
        let keys = other.record_keys();
        self.filter(|item| !keys.contains(&RecordKey::of(item)))
    }

    /// Items of `self` whose key is present in `other`
    pub fn intersection(&self, other: &GameCollection) -> Self {
        let keys = other.record_keys();
        self.filter(|item| keys.contains(&RecordKey::of(item)))
    }

    /// Normalized names that occur more than once, in first-seen order
    pub fn duplicate_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();
        for name in self.items.iter().map(Game::normalized_name) {
            if !seen.insert(name.clone()) && reported.insert(name.clone()) {
                duplicates.push(name);
            }
        }
        duplicates
    }

    fn record_keys(&self) -> HashSet<RecordKey> {
        self.items.iter().map(RecordKey::of).collect()
    }
}

impl<'a> IntoIterator for &'a GameCollection {
    type Item = &'a Game;
    type IntoIter = std::slice::Iter<'a, Game>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

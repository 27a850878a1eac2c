use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::matching::{normalize, NormalizedName};

/// A game record as reported by one catalog platform
///
/// Identity for matching and deduplication is the normalized name; `id` is
/// auxiliary metadata and is often missing or `0` for titles without a
/// cross-platform identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    /// Numeric identifier (e.g. Steam App ID), if the source has one
    #[serde(default)]
    pub id: Option<i64>,

    /// Title as reported by the source
    pub name: String,

    /// Per-platform identifiers (platform -> identifier)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub source_ids: BTreeMap<String, String>,
}

impl Game {
    /// Create a new game with an optional id
    pub fn new(id: Option<i64>, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            source_ids: BTreeMap::new(),
        }
    }

    /// Create a game known only by its title
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(None, name)
    }

    /// Attach a platform-specific identifier
    pub fn with_source_id(mut self, source: impl Into<String>, identifier: impl Into<String>) -> Self {
        self.source_ids.insert(source.into(), identifier.into());
        self
    }

    /// Id usable for identity checks (`0` counts as missing)
    pub fn known_id(&self) -> Option<i64> {
        self.id.filter(|id| *id != 0)
    }

    /// Normalized title, the matching identity of this game
    pub fn normalized_name(&self) -> String {
        normalize(&self.name)
    }

    /// Matching and deduplication identity: the normalized title, never the id
    pub fn identity_key(&self) -> String {
        self.normalized_name()
    }

    /// Title paired with its normalized form
    pub fn normalized(&self) -> NormalizedName {
        NormalizedName::new(self.name.as_str())
    }

    /// Get display name (for logging/UI)
    pub fn display_name(&self) -> String {
        match self.known_id() {
            Some(id) => format!("{} [{}]", self.name, id),
            None => self.name.clone(),
        }
    }
}

/// Key used by collection set operations: known id, or else normalized name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum RecordKey {
    Id(i64),
    Name(String),
}

impl RecordKey {
    pub(crate) fn of(game: &Game) -> Self {
        match game.known_id() {
            Some(id) => RecordKey::Id(id),
            None => RecordKey::Name(game.normalized_name()),
        }
    }
}

/// A row as handed over by a source adapter: either a bare title or a record
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawGame {
    Title(String),
    Record {
        name: String,
        #[serde(default)]
        id: Option<i64>,
        #[serde(default, rename = "sourceIds")]
        source_ids: BTreeMap<String, String>,
    },
}

impl From<RawGame> for Game {
    fn from(raw: RawGame) -> Self {
        match raw {
            RawGame::Title(name) => Game::named(name),
            RawGame::Record {
                name,
                id,
                source_ids,
            } => Game {
                id,
                name,
                source_ids,
            },
        }
    }
}

impl From<&str> for Game {
    fn from(name: &str) -> Self {
        Game::named(name)
    }
}

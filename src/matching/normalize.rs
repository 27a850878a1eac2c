use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Edition/remaster noise that catalogs append to the same title
const FILLER_TOKENS: &[&str] = &["online", "edition", "remastered", "definitive"];

const GAME_OF_THE_YEAR: &[&str] = &["game", "of", "the", "year"];

/// Canonicalize a game title for comparison.
///
/// Steps, in order:
/// - lowercase, then Unicode canonical composition (NFC)
/// - a leading `number` token becomes `#`
/// - every character outside `[a-z0-9 ]` is dropped (`&` and `#`, which this
///   function itself emits, are kept)
/// - `and` becomes `&`, `vi` becomes `6`
/// - filler tokens (`online`, `edition`, `remastered`, `definitive`) and the
///   phrase `game of the year` are removed
/// - whitespace is collapsed and trimmed
///
/// Never fails; empty or whitespace-only input yields an empty string.
/// The result is idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(name: &str) -> String {
    let mut current = normalize_pass(name);

    // Dropping a filler can expose a new leading "number" or rebuild a
    // "game of the year" phrase, so run to a fixpoint.
    loop {
        let next = normalize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_pass(name: &str) -> String {
    let composed: String = name.to_lowercase().nfc().collect();

    let mut tokens: Vec<&str> = composed.split_whitespace().collect();
    if tokens.first() == Some(&"number") {
        tokens[0] = "#";
    }

    let stripped: String = tokens
        .join(" ")
        .chars()
        .filter(|c| is_kept_char(*c))
        .collect();

    let mut tokens: Vec<&str> = stripped
        .split_whitespace()
        .map(|token| match token {
            "and" => "&",
            "vi" => "6",
            other => other,
        })
        .filter(|token| !FILLER_TOKENS.contains(token))
        .collect();

    remove_phrase(&mut tokens, GAME_OF_THE_YEAR);

    tokens.join(" ")
}

#[inline]
fn is_kept_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, ' ' | '&' | '#')
}

fn remove_phrase(tokens: &mut Vec<&str>, phrase: &[&str]) {
    while let Some(start) = tokens
        .windows(phrase.len())
        .position(|window| window == phrase)
    {
        tokens.drain(start..start + phrase.len());
    }
}

/// A title paired with its normalized form, computed once.
///
/// Serialized as the raw title; the normalized form is always recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct NormalizedName {
    raw: String,
    normalized: String,
}

impl NormalizedName {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let normalized = normalize(&raw);
        Self { raw, normalized }
    }

    /// Title as the source reported it
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized comparison key
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// Length in chars, used for the similarity tolerance
    pub fn char_len(&self) -> usize {
        self.normalized.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}

impl From<String> for NormalizedName {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<NormalizedName> for String {
    fn from(name: NormalizedName) -> Self {
        name.raw
    }
}

impl From<&str> for NormalizedName {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

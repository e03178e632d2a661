//! Ingredient resolution.
//!
//! Raw ingredient-list text is split into candidate names, each candidate
//! is looked up in the knowledge base, and misses are explained by the
//! model oracle. The result is keyed by the candidate exactly as the user
//! typed it (after trimming), in order of appearance.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info_span};

use crate::knowledge::KnowledgeBase;
use crate::oracle::{ask, ingredient_prompt, ModelOracle};
use crate::record::IngredientRecord;

/// Splits raw text into candidate ingredient names.
///
/// Newlines act as commas; pieces are trimmed and empty pieces dropped.
/// There is no quoting or escaping.
///
/// ```
/// use knowlabel::resolver::tokenize;
///
/// assert_eq!(tokenize("Water, Glycerin\nParabens"), vec!["Water", "Glycerin", "Parabens"]);
/// ```
#[must_use]
pub fn tokenize(raw: &str) -> Vec<&str> {
    raw.split(|c: char| c == ',' || c == '\n')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Ordered mapping from surface form to record.
///
/// Inserting a surface form that is already present replaces its record
/// but keeps its original position, so `"Water, Water"` yields one entry
/// holding the second occurrence's record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolutionResult {
    entries: IndexMap<String, IngredientRecord>,
}

impl ResolutionResult {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record under a surface form, returning the replaced record.
    pub fn insert(&mut self, surface: impl Into<String>, record: IngredientRecord) -> Option<IngredientRecord> {
        self.entries.insert(surface.into(), record)
    }

    /// Record for an exact surface form.
    #[must_use]
    pub fn get(&self, surface: &str) -> Option<&IngredientRecord> {
        self.entries.get(surface)
    }

    /// Surface forms in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `(surface form, record)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IngredientRecord)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of distinct surface forms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of records that came from the knowledge base.
    #[must_use]
    pub fn curated_count(&self) -> usize {
        self.entries.values().filter(|r| r.is_curated()).count()
    }
}

impl IntoIterator for ResolutionResult {
    type Item = (String, IngredientRecord);
    type IntoIter = indexmap::map::IntoIter<String, IngredientRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Resolves every candidate in `raw` against `kb`, asking `oracle` about
/// misses.
///
/// Each miss is exactly one oracle call with no retry. Oracle failures
/// become the record's description; they never abort the remaining
/// candidates.
pub fn resolve(raw: &str, kb: &KnowledgeBase, oracle: &dyn ModelOracle) -> ResolutionResult {
    let candidates = tokenize(raw);
    let span = info_span!("resolve", candidates = candidates.len());
    let _guard = span.enter();

    let mut result = ResolutionResult::new();
    for candidate in candidates {
        let record = if let Some(record) = kb.lookup(candidate) {
            debug!(candidate, "knowledge base hit");
            record.clone()
        } else {
            debug!(candidate, "knowledge base miss; asking model");
            let description = ask(oracle, &ingredient_prompt(candidate));
            IngredientRecord::fabricated(description)
        };
        result.insert(candidate, record);
    }
    result
}

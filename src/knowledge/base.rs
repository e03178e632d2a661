use indexmap::IndexMap;

use crate::record::IngredientRecord;

/// Normalizes an ingredient name into a lookup key (trimmed, lower-cased).
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Immutable mapping from normalized ingredient name to curated record.
///
/// Iteration order is the order in which names were first inserted, which
/// for a loaded knowledge base is the row order of the source. Chat
/// dispatch depends on this order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeBase {
    records: IndexMap<String, IngredientRecord>,
}

impl KnowledgeBase {
    /// Starts building a knowledge base.
    #[must_use]
    pub fn builder() -> KnowledgeBaseBuilder {
        KnowledgeBaseBuilder::default()
    }

    /// Looks up an ingredient by exact normalized-name equality.
    ///
    /// ```
    /// use knowlabel::KnowledgeBase;
    ///
    /// let kb = KnowledgeBase::builder()
    ///     .ingredient("Glycerin", true, "Humectant.", vec![])
    ///     .build();
    /// assert!(kb.lookup("  GLYCERIN ").is_some());
    /// assert!(kb.lookup("glycer").is_none());
    /// ```
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&IngredientRecord> {
        self.records.get(&normalize_name(name))
    }

    /// Returns the record stored under an already-normalized key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&IngredientRecord> {
        self.records.get(key)
    }

    /// Returns true if the (normalized) name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Normalized keys in stored iteration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// `(key, record)` pairs in stored iteration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IngredientRecord)> {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of ingredients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no ingredients.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Builder for [`KnowledgeBase`].
///
/// Only curated records can be inserted, so every record in a built
/// knowledge base has a definite verdict. A repeated name replaces the
/// earlier record but keeps the earlier position.
#[derive(Debug, Default)]
pub struct KnowledgeBaseBuilder {
    records: IndexMap<String, IngredientRecord>,
}

impl KnowledgeBaseBuilder {
    /// Adds a curated ingredient under its normalized name.
    ///
    /// Blank names are ignored.
    #[must_use]
    pub fn ingredient(
        mut self,
        name: &str,
        beneficial: bool,
        description: impl Into<String>,
        alternatives: Vec<String>,
    ) -> Self {
        self.insert(name, beneficial, description, alternatives);
        self
    }

    /// In-place variant of [`ingredient`](Self::ingredient).
    ///
    /// Returns false when the name was blank and nothing was inserted.
    pub fn insert(
        &mut self,
        name: &str,
        beneficial: bool,
        description: impl Into<String>,
        alternatives: Vec<String>,
    ) -> bool {
        let key = normalize_name(name);
        if key.is_empty() {
            return false;
        }
        self.records
            .insert(key, IngredientRecord::curated(beneficial, description, alternatives));
        true
    }

    /// Number of distinct names added so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Freezes the builder into a knowledge base.
    #[must_use]
    pub fn build(self) -> KnowledgeBase {
        KnowledgeBase {
            records: self.records,
        }
    }
}

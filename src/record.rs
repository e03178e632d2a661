//! Ingredient records.
//!
//! A record is what the analyzer knows about one ingredient: whether it is
//! considered beneficial, a free-text description, and suggested
//! alternatives. Curated records always carry a definite verdict; records
//! synthesized from the model oracle never do.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tri-state verdict on an ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Benefit {
    /// Curated as beneficial.
    Beneficial,
    /// Curated as harmful or controversial.
    Harmful,
    /// Not curated; the record was fabricated from a model answer.
    Unknown,
}

/// Parses the curated flag the way the tabular source encodes it: the
/// literal `true` (any case, surrounding whitespace ignored) is true,
/// anything else is false.
#[must_use]
pub fn parse_flag(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("true")
}

impl Benefit {
    /// Verdict for a curated flag. See [`parse_flag`].
    #[must_use]
    pub fn from_flag(raw: &str) -> Self {
        Self::from(parse_flag(raw))
    }

    /// Returns the verdict as an optional boolean (`None` when unknown).
    #[must_use]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Self::Beneficial => Some(true),
            Self::Harmful => Some(false),
            Self::Unknown => None,
        }
    }

    /// Returns true if the verdict came from curated data.
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl From<bool> for Benefit {
    fn from(beneficial: bool) -> Self {
        if beneficial {
            Self::Beneficial
        } else {
            Self::Harmful
        }
    }
}

impl fmt::Display for Benefit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Beneficial => write!(f, "beneficial"),
            Self::Harmful => write!(f, "harmful"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// What is known about a single ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientRecord {
    /// Verdict on the ingredient.
    pub beneficial: Benefit,
    /// Free-text description (or the model's answer / error text).
    pub description: String,
    /// Suggested replacement ingredients, in source order.
    pub alternatives: Vec<String>,
}

impl IngredientRecord {
    /// Creates a curated record.
    #[must_use]
    pub fn curated(beneficial: bool, description: impl Into<String>, alternatives: Vec<String>) -> Self {
        Self {
            beneficial: Benefit::from(beneficial),
            description: description.into(),
            alternatives,
        }
    }

    /// Creates a record fabricated from model output.
    ///
    /// Fabricated records never carry a verdict or alternatives.
    #[must_use]
    pub fn fabricated(description: impl Into<String>) -> Self {
        Self {
            beneficial: Benefit::Unknown,
            description: description.into(),
            alternatives: Vec::new(),
        }
    }

    /// Returns true if this record came from curated data.
    #[must_use]
    pub const fn is_curated(&self) -> bool {
        self.beneficial.is_known()
    }
}

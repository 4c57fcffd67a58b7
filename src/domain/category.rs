//! Sport category keys.
//!
//! A category is a short machine-facing key such as `american-football`.
//! The known vocabulary carries display labels; unknown keys are kept as-is
//! so records written by other tools survive a round trip.

use serde::{Deserialize, Serialize};

/// Known category keys and their display labels, in menu order
pub const CATEGORY_LABELS: &[(&str, &str)] = &[
    ("football", "Football"),
    ("basketball", "Basketball"),
    ("baseball", "Baseball"),
    ("american-football", "American Football"),
    ("hockey", "Hockey"),
    ("tennis", "Tennis"),
    ("volleyball", "Volleyball"),
    ("athletics", "Athletics"),
    ("cricket", "Cricket"),
];

/// Category key of a stream or event
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Wrap a raw category key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the raw key
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display label, or the key itself when it is not in the vocabulary
    pub fn label(&self) -> &str {
        CATEGORY_LABELS
            .iter()
            .find(|(key, _)| *key == self.0)
            .map(|(_, label)| *label)
            .unwrap_or(self.0.as_str())
    }

    /// Whether the key is part of the known vocabulary
    pub fn is_known(&self) -> bool {
        CATEGORY_LABELS.iter().any(|(key, _)| *key == self.0)
    }

    /// All known categories in menu order
    pub fn known() -> impl Iterator<Item = Category> {
        CATEGORY_LABELS.iter().map(|(key, _)| Category::new(*key))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let key = s.trim().to_lowercase();
        if key.is_empty() {
            anyhow::bail!("Category key must not be empty");
        }
        Ok(Category(key))
    }
}

impl From<&str> for Category {
    fn from(key: &str) -> Self {
        Category::new(key)
    }
}

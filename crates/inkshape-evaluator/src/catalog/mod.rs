//! Registry of categories and the rules that score them.
//!
//! A [`CategoryCatalog`] is an ordered list of [`CategoryEntry`] values plus named
//! contexts. Entry order matters: the classifier breaks score ties in favor of the entry
//! that appears first.
//!
//! A context is a named subset of categories that one actor can produce (the
//! [standard catalog](CategoryCatalog::standard) ships `sunflower`, `cactus` and
//! `water_lily`). Callers may also pass any explicit candidate slice to the classifier.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{category::Category, score_rule::ScoreRule};

pub use self::template::TemplateDescriptor;

mod standard;
mod template;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub category: Category,
    /// Scores how likely a drawing is to be this category.
    pub classification: ScoreRule,
    /// Scores how well a drawing already known to be this category was executed.
    pub quality: ScoreRule,
    pub template: TemplateDescriptor,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryCatalog {
    entries: Vec<CategoryEntry>,
    #[serde(default)]
    contexts: BTreeMap<String, Vec<Category>>,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown context: {context}")]
pub struct UnknownContextError {
    #[error(not(source))]
    pub context: String,
}

impl CategoryCatalog {
    /// Builds a catalog from entries; a category listed twice keeps its first entry.
    #[must_use]
    pub fn new(entries: impl IntoIterator<Item = CategoryEntry>) -> Self {
        let mut unique: Vec<CategoryEntry> = Vec::new();
        for entry in entries {
            if unique.iter().any(|e| e.category == entry.category) {
                tracing::warn!(category = %entry.category, "duplicate catalog entry ignored");
                continue;
            }
            unique.push(entry);
        }
        Self {
            entries: unique,
            contexts: BTreeMap::new(),
        }
    }

    /// Catalog with the built-in rules for every [`Category`] and the standard contexts.
    #[must_use]
    pub fn standard() -> Self {
        standard::catalog()
    }

    #[must_use]
    pub fn with_context(mut self, name: impl Into<String>, categories: Vec<Category>) -> Self {
        self.contexts.insert(name.into(), categories);
        self
    }

    #[must_use]
    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.entries.iter().map(|e| e.category)
    }

    #[must_use]
    pub fn entry(&self, category: Category) -> Option<&CategoryEntry> {
        self.entries.iter().find(|e| e.category == category)
    }

    /// Enumeration index of `category`, used as the tie-break order.
    #[must_use]
    pub fn position(&self, category: Category) -> Option<usize> {
        self.entries.iter().position(|e| e.category == category)
    }

    pub fn contexts(&self) -> impl Iterator<Item = (&str, &[Category])> {
        self.contexts
            .iter()
            .map(|(name, categories)| (name.as_str(), categories.as_slice()))
    }

    pub fn candidates_for(&self, context: &str) -> Result<&[Category], UnknownContextError> {
        self.contexts
            .get(context)
            .map(Vec::as_slice)
            .ok_or_else(|| UnknownContextError {
                context: context.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_covers_every_category_in_order() {
        let catalog = CategoryCatalog::standard();
        assert_eq!(catalog.categories().collect::<Vec<_>>(), Category::ALL);
        for (i, category) in Category::ALL.into_iter().enumerate() {
            assert_eq!(catalog.position(category), Some(i));
        }
    }

    #[test]
    fn test_standard_rule_weights_sum_to_one() {
        for entry in CategoryCatalog::standard().entries() {
            let c = entry.classification.total_weight();
            let q = entry.quality.total_weight();
            assert!((c - 1.0).abs() < 1e-4, "{} classification: {c}", entry.category);
            assert!((q - 1.0).abs() < 1e-4, "{} quality: {q}", entry.category);
            assert!(entry.quality.gates.is_empty(), "{}", entry.category);
        }
    }

    #[test]
    fn test_standard_contexts() {
        let catalog = CategoryCatalog::standard();
        let names = catalog.contexts().map(|(name, _)| name).collect::<Vec<_>>();
        assert_eq!(names, ["cactus", "sunflower", "water_lily"]);
        let sunflower = catalog.candidates_for("sunflower").unwrap();
        assert!(sunflower.contains(&Category::Ball));
        assert!(!sunflower.contains(&Category::Flowing));
        for (_, categories) in catalog.contexts() {
            assert!(categories.iter().all(|&c| catalog.entry(c).is_some()));
        }
    }

    #[test]
    fn test_unknown_context() {
        let err = CategoryCatalog::standard().candidates_for("oak").unwrap_err();
        assert_eq!(err.context, "oak");
        assert_eq!(err.to_string(), "unknown context: oak");
    }

    #[test]
    fn test_duplicate_entries_keep_first() {
        let standard = CategoryCatalog::standard();
        let ball = standard.entry(Category::Ball).unwrap().clone();
        let mut fake = ball.clone();
        fake.template.stroke_count = 9;
        let catalog = CategoryCatalog::new([ball.clone(), fake]);
        assert_eq!(catalog.entries().len(), 1);
        assert_eq!(catalog.entry(Category::Ball), Some(&ball));
    }

    #[test]
    fn test_catalog_json_round_trip() {
        let catalog = CategoryCatalog::standard();
        let json = serde_json::to_string(&catalog).unwrap();
        let parsed: CategoryCatalog = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, catalog);
    }
}

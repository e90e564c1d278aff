//! Argmax classification over a candidate subset.
//!
//! The [`Classifier`] scores each candidate category with its classification rule and
//! picks the highest score. Ties go to the category listed first in the catalog, so the
//! outcome never depends on the order candidates are passed in. A best score below
//! `confidence_threshold` is reported as [`Recognition::Unrecognized`], but the best
//! candidate and every evaluated score are still returned for diagnostics.
//!
//! # Oracle merge
//!
//! When an [`OraclePrediction`] is supplied and its label maps to an evaluated candidate
//! whose gate passed, that candidate's score `s` becomes
//!
//! ```text
//! s + oracle_weight · oracle_score · (1 − s)
//! ```
//!
//! which stays in \[0, 1\] and never revives a gated-out category.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{
    catalog::CategoryCatalog,
    category::Category,
    config::ClassificationConfig,
    feature_vector::FeatureVector,
    oracle::OraclePrediction,
    score_rule::{CategoryScorer, unit_score},
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case", tag = "status", content = "category")]
pub enum Recognition {
    Recognized(Category),
    Unrecognized,
}

impl Recognition {
    #[must_use]
    pub fn category(self) -> Option<Category> {
        match self {
            Self::Recognized(category) => Some(category),
            Self::Unrecognized => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    pub score: f32,
    pub gate_passed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub recognition: Recognition,
    /// Highest-scoring candidate, reported even when unrecognized.
    pub best: Option<CategoryScore>,
    pub confidence: f32,
    /// Every evaluated candidate, in the order the candidates were given.
    pub scores: Vec<CategoryScore>,
    /// Oracle prediction that was merged, if any.
    pub oracle: Option<OraclePrediction>,
}

impl ClassificationResult {
    #[must_use]
    pub fn unrecognized() -> Self {
        Self {
            recognition: Recognition::Unrecognized,
            best: None,
            confidence: 0.0,
            scores: vec![],
            oracle: None,
        }
    }

    #[must_use]
    pub fn category(&self) -> Option<Category> {
        self.recognition.category()
    }

    #[must_use]
    pub fn is_recognized(&self) -> bool {
        self.recognition.is_recognized()
    }

    #[must_use]
    pub fn score_of(&self, category: Category) -> Option<f32> {
        self.scores
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.score)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    catalog: &'a CategoryCatalog,
    config: ClassificationConfig,
}

impl<'a> Classifier<'a> {
    #[must_use]
    pub fn new(catalog: &'a CategoryCatalog, config: ClassificationConfig) -> Self {
        Self { catalog, config }
    }

    #[must_use]
    pub fn classify(
        &self,
        features: &FeatureVector,
        candidates: &[Category],
    ) -> ClassificationResult {
        self.classify_with_oracle(features, candidates, None)
    }

    #[must_use]
    pub fn classify_with_oracle(
        &self,
        features: &FeatureVector,
        candidates: &[Category],
        oracle: Option<&OraclePrediction>,
    ) -> ClassificationResult {
        if candidates.is_empty() {
            tracing::warn!("classification requested with no candidate categories");
            return ClassificationResult::unrecognized();
        }
        if features.is_degenerate() {
            tracing::debug!("drawing has no measurable ink; nothing to classify");
            return ClassificationResult::unrecognized();
        }

        let hinted = oracle.and_then(|prediction| {
            if !prediction.score.is_finite() {
                tracing::debug!(
                    label = %prediction.label,
                    score = prediction.score,
                    "oracle score is not finite; ignoring prediction"
                );
                return None;
            }
            let category = Category::from_label(&prediction.label);
            if category.is_none() {
                tracing::debug!(label = %prediction.label, "oracle label matches no category");
            }
            category.map(|c| (c, prediction.score.clamp(0.0, 1.0)))
        });

        let mut scores: Vec<CategoryScore> = Vec::with_capacity(candidates.len());
        let mut best: Option<(usize, CategoryScore)> = None;

        for &category in candidates {
            if scores.iter().any(|s| s.category == category) {
                continue;
            }
            let (Some(position), Some(entry)) =
                (self.catalog.position(category), self.catalog.entry(category))
            else {
                tracing::warn!(%category, "candidate category is not in the catalog");
                continue;
            };

            let rule = &entry.classification;
            let gate_passed = rule.passes_gate(features);
            let mut score = rule.score(features);
            if let Some((_, oracle_score)) = hinted.filter(|(c, _)| gate_passed && *c == category) {
                score += self.config.oracle_weight * oracle_score * (1.0 - score);
            }
            let score = unit_score(score);
            tracing::debug!(%category, score, gate_passed, "scored candidate");

            let candidate = CategoryScore {
                category,
                score,
                gate_passed,
            };
            scores.push(candidate);

            let is_better = match best {
                None => true,
                Some((best_position, best_score)) => match score.total_cmp(&best_score.score) {
                    Ordering::Greater => true,
                    Ordering::Equal => position < best_position,
                    Ordering::Less => false,
                },
            };
            if is_better {
                best = Some((position, candidate));
            }
        }

        let Some((_, best)) = best else {
            tracing::warn!("none of the candidate categories is in the catalog");
            return ClassificationResult::unrecognized();
        };

        let recognition = if best.score >= self.config.confidence_threshold {
            Recognition::Recognized(best.category)
        } else {
            Recognition::Unrecognized
        };

        ClassificationResult {
            recognition,
            best: Some(best),
            confidence: best.score,
            scores,
            oracle: oracle.cloned(),
        }
    }
}

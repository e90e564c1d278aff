//! Match quality for a confirmed category.
//!
//! Quality answers "how well was this drawn?" once the category is known, and drives a
//! continuous multiplier for a downstream effect.
//!
//! 1. **Raw quality** - blend of the category's quality rule (no gates, soft scoring) and
//!    its template conformity, weighted by `template_weight`
//! 2. **Forgiveness** - `q^(1/forgiveness_factor)`; factors above 1 lift weak drawings
//! 3. **Multiplier** - linear interpolation between `min_multiplier` and `max_multiplier`
//! 4. **Rating** - discrete label for display
//!
//! Degenerate drawings (no strokes, no ink) always score 0 and get the minimum multiplier.

use serde::{Deserialize, Serialize};

use crate::{
    catalog::CategoryCatalog, category::Category, config::QualityConfig,
    feature_vector::FeatureVector, score_rule::CategoryScorer,
};

/// Stroke count at which data confidence saturates.
const CONFIDENT_STROKE_COUNT: f32 = 5.0;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum QualityRating {
    #[display("Very Poor")]
    VeryPoor,
    Poor,
    Decent,
    Good,
    Excellent,
    Perfect,
}

impl QualityRating {
    #[must_use]
    pub fn from_quality(quality: f32) -> Self {
        match quality {
            q if q >= 0.9 => Self::Perfect,
            q if q >= 0.75 => Self::Excellent,
            q if q >= 0.6 => Self::Good,
            q if q >= 0.4 => Self::Decent,
            q if q >= 0.2 => Self::Poor,
            _ => Self::VeryPoor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityResult {
    pub category: Category,
    /// Post-forgiveness quality in \[0, 1\].
    pub quality: f32,
    pub multiplier: f32,
    pub rating: QualityRating,
    /// How much evidence the drawing carries, from its stroke count.
    pub data_confidence: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct QualityScorer<'a> {
    catalog: &'a CategoryCatalog,
    config: QualityConfig,
}

impl<'a> QualityScorer<'a> {
    #[must_use]
    pub fn new(catalog: &'a CategoryCatalog, config: QualityConfig) -> Self {
        Self { catalog, config }
    }

    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn score(&self, category: Category, features: &FeatureVector) -> QualityResult {
        let raw = self.raw_quality(category, features);
        let quality = apply_forgiveness(raw, self.config.forgiveness_factor);
        let multiplier = lerp(self.config.min_multiplier, self.config.max_multiplier, quality);
        let data_confidence =
            (features.stroke_count as f32 / CONFIDENT_STROKE_COUNT).clamp(0.0, 1.0);
        let result = QualityResult {
            category,
            quality,
            multiplier,
            rating: QualityRating::from_quality(quality),
            data_confidence,
        };
        tracing::debug!(%category, raw, quality, multiplier, "scored quality");
        result
    }

    /// Quality before forgiveness, in \[0, 1\].
    #[must_use]
    pub fn raw_quality(&self, category: Category, features: &FeatureVector) -> f32 {
        if features.is_degenerate() {
            return 0.0;
        }
        let Some(entry) = self.catalog.entry(category) else {
            tracing::warn!(%category, "quality requested for a category not in the catalog");
            return 0.0;
        };
        let weight = self.config.template_weight.clamp(0.0, 1.0);
        let rule = entry.quality.score(features);
        let conformity = entry.template.conformity(features);
        ((1.0 - weight) * rule + weight * conformity).clamp(0.0, 1.0)
    }
}

/// Reshapes quality with `q^(1/factor)`; a non-positive factor leaves it unchanged.
#[must_use]
pub fn apply_forgiveness(quality: f32, factor: f32) -> f32 {
    let quality = quality.clamp(0.0, 1.0);
    if !factor.is_finite() || factor <= 0.0 {
        return quality;
    }
    quality.powf(factor.recip()).clamp(0.0, 1.0)
}

// result stays within [min, max] despite rounding
fn lerp(min: f32, max: f32, t: f32) -> f32 {
    (min + (max - min) * t).max(min).min(max)
}

//! Category scoring: the gate / weighted-sum / penalty pattern.
//!
//! Every category is scored by the same three-stage function over a [`FeatureVector`]:
//!
//! 1. **Gate** - every [`Condition`] in `gates` must hold, otherwise the score is exactly
//!    0.0. Gates encode hard requirements ("a ball needs a closed stroke").
//! 2. **Weighted sum** - each [`WeightedTerm`] reads a raw [`FeatureSource`] value, maps
//!    it to \[0.0, 1.0\] through a [`ScoreCurve`], and contributes `weight × value`.
//!    Weights of one rule sum to about 1.0, so the sum stays in range.
//! 3. **Penalties** - each [`Penalty`] whose condition holds multiplies the sum by its
//!    factor. Penalties compound.
//!
//! The result is clamped to \[0.0, 1.0\]:
//!
//! ```text
//! score = clamp01( gate · Σ(wᵢ · curveᵢ(sourceᵢ)) · Π(penalty factors that apply) )
//! ```
//!
//! # Design: Rules as Data
//!
//! [`ScoreRule`] is plain data and (de)serializes with serde, so a caller can ship a tuned
//! catalog as JSON without touching code. The standard rules are built with the fluent
//! constructors:
//!
//! ```rust
//! use inkshape_evaluator::{
//!     score_rule::{Condition, ScoreRule},
//!     shape_feature::{FeatureSource, ScoreCurve},
//! };
//!
//! let rule = ScoreRule::new()
//!     .gate(Condition::at_least(FeatureSource::ClosedStrokes, 1.0))
//!     .term(FeatureSource::Compactness, ScoreCurve::rising(0.3, 0.9), 0.6)
//!     .term(FeatureSource::CurvedFraction, ScoreCurve::Identity, 0.4)
//!     .penalty(Condition::at_least(FeatureSource::SpikyStrokes, 1.0), 0.6);
//! # let _ = rule;
//! ```
//!
//! [`ScoreRule::explain`] returns the full breakdown for diagnostics; [`CategoryScorer`]
//! is the seam the classifier and quality scorer call through.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    feature_vector::FeatureVector,
    shape_feature::{FeatureSource, ScoreCurve},
};

/// Scores a feature vector for one category.
///
/// Implementations must be pure: same input, same output, always within \[0.0, 1.0\].
pub trait CategoryScorer: fmt::Debug + Send + Sync {
    /// Whether the hard preconditions hold. A scorer whose gate fails scores 0.0.
    fn passes_gate(&self, features: &FeatureVector) -> bool;

    /// Final score in \[0.0, 1.0\].
    fn score(&self, features: &FeatureVector) -> f32;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Condition {
    /// `source >= value`
    AtLeast { source: FeatureSource, value: f32 },
    /// `source <= value`
    AtMost { source: FeatureSource, value: f32 },
    /// `source > other`
    Exceeds {
        source: FeatureSource,
        other: FeatureSource,
    },
}

impl Condition {
    #[must_use]
    pub const fn at_least(source: FeatureSource, value: f32) -> Self {
        Self::AtLeast { source, value }
    }

    #[must_use]
    pub const fn at_most(source: FeatureSource, value: f32) -> Self {
        Self::AtMost { source, value }
    }

    #[must_use]
    pub const fn exceeds(source: FeatureSource, other: FeatureSource) -> Self {
        Self::Exceeds { source, other }
    }

    #[must_use]
    pub fn holds(&self, features: &FeatureVector) -> bool {
        match *self {
            Self::AtLeast { source, value } => source.extract(features) >= value,
            Self::AtMost { source, value } => source.extract(features) <= value,
            Self::Exceeds { source, other } => source.extract(features) > other.extract(features),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedTerm {
    pub source: FeatureSource,
    pub curve: ScoreCurve,
    pub weight: f32,
}

impl WeightedTerm {
    #[must_use]
    pub fn value(&self, features: &FeatureVector) -> f32 {
        self.curve.apply(self.source.extract(features))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Penalty {
    pub when: Condition,
    /// Multiplier applied when `when` holds, in \[0.0, 1.0\].
    pub factor: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreRule {
    pub gates: Vec<Condition>,
    pub terms: Vec<WeightedTerm>,
    pub penalties: Vec<Penalty>,
}

/// One term's share of a rule's weighted sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TermContribution {
    pub source: FeatureSource,
    pub raw: f32,
    pub normalized: f32,
    pub weight: f32,
}

/// Full breakdown of a [`ScoreRule`] evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleEvaluation {
    pub gate_passed: bool,
    pub contributions: Vec<TermContribution>,
    pub weighted_sum: f32,
    pub penalty_factor: f32,
    pub score: f32,
}

impl ScoreRule {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn gate(mut self, condition: Condition) -> Self {
        self.gates.push(condition);
        self
    }

    #[must_use]
    pub fn term(mut self, source: FeatureSource, curve: ScoreCurve, weight: f32) -> Self {
        self.terms.push(WeightedTerm {
            source,
            curve,
            weight,
        });
        self
    }

    #[must_use]
    pub fn penalty(mut self, when: Condition, factor: f32) -> Self {
        self.penalties.push(Penalty { when, factor });
        self
    }

    #[must_use]
    pub fn total_weight(&self) -> f32 {
        self.terms.iter().map(|t| t.weight).sum()
    }

    #[must_use]
    pub fn weighted_sum(&self, features: &FeatureVector) -> f32 {
        self.terms.iter().map(|t| t.weight * t.value(features)).sum()
    }

    #[must_use]
    pub fn penalty_factor(&self, features: &FeatureVector) -> f32 {
        self.penalties
            .iter()
            .filter(|p| p.when.holds(features))
            .map(|p| p.factor)
            .product()
    }

    #[must_use]
    pub fn explain(&self, features: &FeatureVector) -> RuleEvaluation {
        let gate_passed = self.passes_gate(features);
        let contributions = self
            .terms
            .iter()
            .map(|t| {
                let raw = t.source.extract(features);
                TermContribution {
                    source: t.source,
                    raw,
                    normalized: t.curve.apply(raw),
                    weight: t.weight,
                }
            })
            .collect::<Vec<_>>();
        let weighted_sum = contributions
            .iter()
            .map(|c| c.weight * c.normalized)
            .sum::<f32>();
        let penalty_factor = self.penalty_factor(features);
        let score = if gate_passed {
            unit_score(weighted_sum * penalty_factor)
        } else {
            0.0
        };
        RuleEvaluation {
            gate_passed,
            contributions,
            weighted_sum,
            penalty_factor,
            score,
        }
    }
}

impl CategoryScorer for ScoreRule {
    fn passes_gate(&self, features: &FeatureVector) -> bool {
        self.gates.iter().all(|g| g.holds(features))
    }

    fn score(&self, features: &FeatureVector) -> f32 {
        if !self.passes_gate(features) {
            return 0.0;
        }
        unit_score(self.weighted_sum(features) * self.penalty_factor(features))
    }
}

/// Clamps `value` to \[0, 1\], mapping NaN to 0.
pub(crate) fn unit_score(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_features() -> FeatureVector {
        FeatureVector {
            stroke_count: 1,
            closed_strokes: 1,
            curved_strokes: 1,
            compactness: 0.9,
            total_length: 6.0,
            ..FeatureVector::default()
        }
    }

    fn ball_like_rule() -> ScoreRule {
        ScoreRule::new()
            .gate(Condition::at_least(FeatureSource::ClosedStrokes, 1.0))
            .term(FeatureSource::Compactness, ScoreCurve::rising(0.3, 0.9), 0.6)
            .term(FeatureSource::CurvedFraction, ScoreCurve::Identity, 0.4)
            .penalty(Condition::at_least(FeatureSource::SpikyStrokes, 1.0), 0.5)
    }

    #[test]
    fn test_gate_failure_scores_zero() {
        let rule = ball_like_rule();
        let features = FeatureVector {
            closed_strokes: 0,
            ..round_features()
        };
        assert!(!rule.passes_gate(&features));
        assert!(rule.score(&features).abs() < f32::EPSILON);
        let explained = rule.explain(&features);
        assert!(!explained.gate_passed);
        assert!(explained.score.abs() < f32::EPSILON);
        // contributions are still reported
        assert!(explained.weighted_sum > 0.9);
    }

    #[test]
    fn test_weighted_sum() {
        let rule = ball_like_rule();
        assert!((rule.total_weight() - 1.0).abs() < 1e-6);
        assert!((rule.score(&round_features()) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_penalties_compound() {
        let rule =
            ball_like_rule().penalty(Condition::at_least(FeatureSource::StrokeCount, 1.0), 0.5);
        let features = FeatureVector {
            spiky_strokes: 1,
            ..round_features()
        };
        assert!((rule.penalty_factor(&features) - 0.25).abs() < 1e-6);
        assert!((rule.score(&features) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_exceeds_condition() {
        let c =
            Condition::exceeds(FeatureSource::HorizontalStrokes, FeatureSource::VerticalStrokes);
        let features = FeatureVector {
            stroke_count: 3,
            horizontal_strokes: 2,
            vertical_strokes: 1,
            ..FeatureVector::default()
        };
        assert!(c.holds(&features));
        assert!(!c.holds(&FeatureVector::default()));
    }

    #[test]
    fn test_explain_matches_score() {
        let rule = ball_like_rule();
        let features = FeatureVector {
            compactness: 0.6,
            ..round_features()
        };
        let explained = rule.explain(&features);
        assert!(explained.gate_passed);
        assert_eq!(explained.contributions.len(), 2);
        assert!((explained.contributions[0].normalized - 0.5).abs() < 1e-6);
        assert!((explained.score - rule.score(&features)).abs() < 1e-6);
    }

    #[test]
    fn test_nan_feature_scores_zero() {
        let features = FeatureVector {
            compactness: f32::NAN,
            ..round_features()
        };
        let rule = ScoreRule::new().term(FeatureSource::Compactness, ScoreCurve::Identity, 1.0);
        assert!(rule.score(&features).abs() < f32::EPSILON);
        assert!(rule.explain(&features).score.abs() < f32::EPSILON);
    }

    #[test]
    fn test_score_is_clamped() {
        let rule = ScoreRule::new().term(FeatureSource::StrokeCount, ScoreCurve::Identity, 3.0);
        assert!((rule.score(&round_features()) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rule_deserializes_from_json() {
        let rule: ScoreRule = serde_json::from_str(
            r#"{
                "gates": [{ "kind": "at_least", "source": "closed_strokes", "value": 1.0 }],
                "terms": [{
                    "source": "compactness",
                    "curve": { "kind": "identity" },
                    "weight": 1.0
                }]
            }"#,
        )
        .unwrap();
        assert!(rule.penalties.is_empty());
        assert!((rule.score(&round_features()) - 0.9).abs() < 1e-6);
    }
}

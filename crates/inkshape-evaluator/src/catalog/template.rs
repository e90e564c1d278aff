use serde::{Deserialize, Serialize};

use crate::{feature_vector::FeatureVector, shape_feature::ScoreCurve};

/// Coarse description of a category's ideal drawing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemplateDescriptor {
    /// Ideal height over width.
    pub aspect_ratio: f32,
    pub stroke_count: usize,
    /// Whether the ideal strokes are closed loops.
    pub closed: bool,
}

impl TemplateDescriptor {
    #[must_use]
    pub const fn new(aspect_ratio: f32, stroke_count: usize, closed: bool) -> Self {
        Self {
            aspect_ratio,
            stroke_count,
            closed,
        }
    }

    /// How closely `features` agree with this template, in \[0.0, 1.0\].
    ///
    /// Mean of three closeness terms: aspect ratio (triangular in log space, one
    /// e-fold of tolerance), stroke count (relative difference) and closedness (share of
    /// strokes whose closedness matches the template).
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn conformity(&self, features: &FeatureVector) -> f32 {
        if features.is_degenerate() {
            return 0.0;
        }
        let ideal_log_aspect = self.aspect_ratio.max(FeatureVector::EPSILON).ln();
        let aspect = ScoreCurve::peak(ideal_log_aspect, 1.0).apply(features.log_aspect_ratio());

        let ideal_count = self.stroke_count.max(1) as f32;
        let count_diff = (features.stroke_count as f32 - self.stroke_count as f32).abs();
        let count = (1.0 - count_diff / ideal_count).clamp(0.0, 1.0);

        let closed = if self.closed {
            features.closed_fraction()
        } else {
            1.0 - features.closed_fraction()
        };

        ((aspect + count + closed) / 3.0).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_match() {
        let template = TemplateDescriptor::new(1.0, 1, true);
        let features = FeatureVector {
            stroke_count: 1,
            closed_strokes: 1,
            total_length: 6.0,
            ..FeatureVector::default()
        };
        assert!((template.conformity(&features) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_partial_match() {
        let template = TemplateDescriptor::new(0.25, 1, false);
        let features = FeatureVector {
            stroke_count: 2,
            closed_strokes: 1,
            aspect_ratio: 0.25,
            total_length: 6.0,
            ..FeatureVector::default()
        };
        // aspect 1, count 0, closedness 0.5
        assert!((template.conformity(&features) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_features() {
        let template = TemplateDescriptor::new(1.0, 1, false);
        assert!(template.conformity(&FeatureVector::default()).abs() < f32::EPSILON);
    }
}

use serde::{Deserialize, Serialize};

/// Geometric summary of one drawing; the only input the scoring stages see.
///
/// Counts are whole strokes. Ratios marked \[0, 1\] are already normalized; lengths and
/// dimensions are in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub stroke_count: usize,
    pub width: f32,
    pub height: f32,
    /// Height over width; 1.0 when the drawing has no extent.
    pub aspect_ratio: f32,
    pub closed_strokes: usize,
    pub vertical_strokes: usize,
    pub horizontal_strokes: usize,
    pub spiky_strokes: usize,
    pub curved_strokes: usize,
    /// \[0, 1\]
    pub curviness: f32,
    /// \[0, 1\]
    pub compactness: f32,
    /// \[0, 1\]
    pub radialness: f32,
    /// \[0, 1\]
    pub branchiness: f32,
    pub total_length: f32,
    pub mean_relative_stroke_length: f32,
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self {
            stroke_count: 0,
            width: 0.0,
            height: 0.0,
            aspect_ratio: 1.0,
            closed_strokes: 0,
            vertical_strokes: 0,
            horizontal_strokes: 0,
            spiky_strokes: 0,
            curved_strokes: 0,
            curviness: 0.0,
            compactness: 0.0,
            radialness: 0.0,
            branchiness: 0.0,
            total_length: 0.0,
            mean_relative_stroke_length: 0.0,
        }
    }
}

impl FeatureVector {
    /// Floor for divisions and "has no extent" checks.
    pub const EPSILON: f32 = 1e-3;

    /// True when there is nothing to score: no strokes or no ink length.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.stroke_count == 0 || self.total_length <= Self::EPSILON
    }

    /// Natural log of the aspect ratio: 0 is square, negative is wide, positive is tall.
    #[must_use]
    pub fn log_aspect_ratio(&self) -> f32 {
        self.aspect_ratio.max(Self::EPSILON).ln()
    }

    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn stroke_fraction(&self, count: usize) -> f32 {
        if self.stroke_count == 0 {
            return 0.0;
        }
        (count as f32 / self.stroke_count as f32).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn closed_fraction(&self) -> f32 {
        self.stroke_fraction(self.closed_strokes)
    }

    #[must_use]
    pub fn vertical_fraction(&self) -> f32 {
        self.stroke_fraction(self.vertical_strokes)
    }

    #[must_use]
    pub fn horizontal_fraction(&self) -> f32 {
        self.stroke_fraction(self.horizontal_strokes)
    }

    #[must_use]
    pub fn spiky_fraction(&self) -> f32 {
        self.stroke_fraction(self.spiky_strokes)
    }

    #[must_use]
    pub fn curved_fraction(&self) -> f32 {
        self.stroke_fraction(self.curved_strokes)
    }
}

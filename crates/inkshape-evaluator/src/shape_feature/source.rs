//! Raw quantities a score rule can read from a [`FeatureVector`].

use serde::{Deserialize, Serialize};

use crate::feature_vector::FeatureVector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureSource {
    // counts
    StrokeCount,
    ClosedStrokes,
    VerticalStrokes,
    HorizontalStrokes,
    SpikyStrokes,
    CurvedStrokes,
    // fractions of stroke count
    ClosedFraction,
    VerticalFraction,
    HorizontalFraction,
    SpikyFraction,
    CurvedFraction,
    // extent
    Width,
    Height,
    AspectRatio,
    LogAspectRatio,
    // shape
    Curviness,
    Compactness,
    Radialness,
    Branchiness,
    TotalLength,
    MeanRelativeStrokeLength,
}

impl FeatureSource {
    pub const ALL: [Self; 21] = [
        Self::StrokeCount,
        Self::ClosedStrokes,
        Self::VerticalStrokes,
        Self::HorizontalStrokes,
        Self::SpikyStrokes,
        Self::CurvedStrokes,
        Self::ClosedFraction,
        Self::VerticalFraction,
        Self::HorizontalFraction,
        Self::SpikyFraction,
        Self::CurvedFraction,
        Self::Width,
        Self::Height,
        Self::AspectRatio,
        Self::LogAspectRatio,
        Self::Curviness,
        Self::Compactness,
        Self::Radialness,
        Self::Branchiness,
        Self::TotalLength,
        Self::MeanRelativeStrokeLength,
    ];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::StrokeCount => "stroke_count",
            Self::ClosedStrokes => "closed_strokes",
            Self::VerticalStrokes => "vertical_strokes",
            Self::HorizontalStrokes => "horizontal_strokes",
            Self::SpikyStrokes => "spiky_strokes",
            Self::CurvedStrokes => "curved_strokes",
            Self::ClosedFraction => "closed_fraction",
            Self::VerticalFraction => "vertical_fraction",
            Self::HorizontalFraction => "horizontal_fraction",
            Self::SpikyFraction => "spiky_fraction",
            Self::CurvedFraction => "curved_fraction",
            Self::Width => "width",
            Self::Height => "height",
            Self::AspectRatio => "aspect_ratio",
            Self::LogAspectRatio => "log_aspect_ratio",
            Self::Curviness => "curviness",
            Self::Compactness => "compactness",
            Self::Radialness => "radialness",
            Self::Branchiness => "branchiness",
            Self::TotalLength => "total_length",
            Self::MeanRelativeStrokeLength => "mean_relative_stroke_length",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::StrokeCount => "Stroke Count",
            Self::ClosedStrokes => "Closed Strokes",
            Self::VerticalStrokes => "Vertical Strokes",
            Self::HorizontalStrokes => "Horizontal Strokes",
            Self::SpikyStrokes => "Spiky Strokes",
            Self::CurvedStrokes => "Curved Strokes",
            Self::ClosedFraction => "Closed Fraction",
            Self::VerticalFraction => "Vertical Fraction",
            Self::HorizontalFraction => "Horizontal Fraction",
            Self::SpikyFraction => "Spiky Fraction",
            Self::CurvedFraction => "Curved Fraction",
            Self::Width => "Width",
            Self::Height => "Height",
            Self::AspectRatio => "Aspect Ratio",
            Self::LogAspectRatio => "Log Aspect Ratio",
            Self::Curviness => "Curviness",
            Self::Compactness => "Compactness",
            Self::Radialness => "Radialness",
            Self::Branchiness => "Branchiness",
            Self::TotalLength => "Total Length",
            Self::MeanRelativeStrokeLength => "Mean Relative Stroke Length",
        }
    }

    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn extract(self, features: &FeatureVector) -> f32 {
        match self {
            Self::StrokeCount => features.stroke_count as f32,
            Self::ClosedStrokes => features.closed_strokes as f32,
            Self::VerticalStrokes => features.vertical_strokes as f32,
            Self::HorizontalStrokes => features.horizontal_strokes as f32,
            Self::SpikyStrokes => features.spiky_strokes as f32,
            Self::CurvedStrokes => features.curved_strokes as f32,
            Self::ClosedFraction => features.closed_fraction(),
            Self::VerticalFraction => features.vertical_fraction(),
            Self::HorizontalFraction => features.horizontal_fraction(),
            Self::SpikyFraction => features.spiky_fraction(),
            Self::CurvedFraction => features.curved_fraction(),
            Self::Width => features.width,
            Self::Height => features.height,
            Self::AspectRatio => features.aspect_ratio,
            Self::LogAspectRatio => features.log_aspect_ratio(),
            Self::Curviness => features.curviness,
            Self::Compactness => features.compactness,
            Self::Radialness => features.radialness,
            Self::Branchiness => features.branchiness,
            Self::TotalLength => features.total_length,
            Self::MeanRelativeStrokeLength => features.mean_relative_stroke_length,
        }
    }
}

//! Built-in rules, templates and contexts.

use crate::{
    category::Category,
    score_rule::{Condition, ScoreRule},
    shape_feature::{FeatureSource as F, ScoreCurve},
};

use super::{CategoryCatalog, CategoryEntry, TemplateDescriptor};

pub(super) fn catalog() -> CategoryCatalog {
    CategoryCatalog::new(Category::ALL.map(entry))
        .with_context(
            "sunflower",
            vec![
                Category::Ball,
                Category::Wave,
                Category::Spike,
                Category::Defensive,
            ],
        )
        .with_context(
            "cactus",
            vec![
                Category::Flowing,
                Category::Scatter,
                Category::Vertical,
                Category::Defensive,
            ],
        )
        .with_context(
            "water_lily",
            vec![
                Category::Flowing,
                Category::Ball,
                Category::Wave,
                Category::Defensive,
            ],
        )
}

fn entry(category: Category) -> CategoryEntry {
    let (classification, quality, template) = match category {
        Category::Ball => (ball(), ball_quality(), TemplateDescriptor::new(1.0, 1, true)),
        Category::Wave => (wave(), wave_quality(), TemplateDescriptor::new(0.25, 1, false)),
        Category::Spike => (spike(), spike_quality(), TemplateDescriptor::new(1.0, 3, false)),
        Category::Vertical => (
            vertical(),
            vertical_quality(),
            TemplateDescriptor::new(2.0, 2, false),
        ),
        Category::Scatter => (
            scatter(),
            scatter_quality(),
            TemplateDescriptor::new(1.0, 5, false),
        ),
        Category::Defensive => (
            defensive(),
            defensive(),
            TemplateDescriptor::new(1.0, 1, true),
        ),
        Category::Flowing => (
            flowing(),
            flowing_quality(),
            TemplateDescriptor::new(1.5, 1, false),
        ),
    };
    CategoryEntry {
        category,
        classification,
        quality,
        template,
    }
}

fn any(source: F) -> Condition {
    Condition::at_least(source, 1.0)
}

// aspect is read in log space: 0 is square, -1.2 is about 3.3 times wider than tall
const SQUARE: ScoreCurve = ScoreCurve::peak(0.0, 1.0);
const WIDE: ScoreCurve = ScoreCurve::falling(-1.2, 0.0);
const TALL: ScoreCurve = ScoreCurve::rising(0.0, 1.2);
const UPRIGHT: ScoreCurve = ScoreCurve::peak(0.4, 1.0);

fn ball() -> ScoreRule {
    ScoreRule::new()
        .gate(any(F::ClosedStrokes))
        .term(F::LogAspectRatio, SQUARE, 0.4)
        .term(F::Compactness, ScoreCurve::rising(0.3, 0.9), 0.4)
        .term(F::CurvedFraction, ScoreCurve::Identity, 0.2)
        .penalty(any(F::SpikyStrokes), 0.6)
}

fn ball_quality() -> ScoreRule {
    ScoreRule::new()
        .term(F::LogAspectRatio, SQUARE, 0.3)
        .term(F::Compactness, ScoreCurve::rising(0.5, 1.0), 0.4)
        .term(F::SpikyFraction, ScoreCurve::falling(0.0, 1.0), 0.2)
        .term(F::ClosedFraction, ScoreCurve::Identity, 0.1)
}

fn wave() -> ScoreRule {
    ScoreRule::new()
        .term(F::Compactness, ScoreCurve::falling(0.2, 0.8), 0.3)
        .term(F::LogAspectRatio, WIDE, 0.4)
        .term(F::CurvedFraction, ScoreCurve::Identity, 0.3)
        .penalty(any(F::ClosedStrokes), 0.5)
        .penalty(any(F::SpikyStrokes), 0.7)
}

fn wave_quality() -> ScoreRule {
    ScoreRule::new()
        .term(F::LogAspectRatio, WIDE, 0.35)
        .term(F::Compactness, ScoreCurve::falling(0.2, 0.8), 0.25)
        .term(F::CurvedFraction, ScoreCurve::Identity, 0.25)
        .term(F::SpikyFraction, ScoreCurve::falling(0.0, 1.0), 0.15)
        .penalty(any(F::ClosedStrokes), 0.7)
}

fn spike() -> ScoreRule {
    ScoreRule::new()
        .gate(any(F::SpikyStrokes))
        .term(F::StrokeCount, ScoreCurve::rising(1.0, 3.0), 0.3)
        .term(F::SpikyFraction, ScoreCurve::Identity, 0.5)
        .term(F::Radialness, ScoreCurve::Identity, 0.2)
        .penalty(any(F::ClosedStrokes), 0.4)
}

fn spike_quality() -> ScoreRule {
    ScoreRule::new()
        .term(F::SpikyFraction, ScoreCurve::Identity, 0.5)
        .term(F::StrokeCount, ScoreCurve::rising(1.0, 3.0), 0.3)
        .term(F::Radialness, ScoreCurve::Identity, 0.2)
}

fn vertical() -> ScoreRule {
    ScoreRule::new()
        .gate(any(F::VerticalStrokes))
        .term(F::LogAspectRatio, TALL, 0.4)
        .term(F::VerticalFraction, ScoreCurve::Identity, 0.6)
        .penalty(Condition::exceeds(F::HorizontalStrokes, F::VerticalStrokes), 0.5)
        .penalty(any(F::ClosedStrokes), 0.5)
}

fn vertical_quality() -> ScoreRule {
    ScoreRule::new()
        .term(F::LogAspectRatio, TALL, 0.35)
        .term(F::VerticalFraction, ScoreCurve::Identity, 0.5)
        .term(F::HorizontalFraction, ScoreCurve::falling(0.0, 1.0), 0.15)
}

fn scatter() -> ScoreRule {
    ScoreRule::new()
        .gate(Condition::at_least(F::StrokeCount, 3.0))
        .term(F::StrokeCount, ScoreCurve::rising(2.0, 6.0), 0.35)
        .term(F::Branchiness, ScoreCurve::falling(0.0, 0.5), 0.3)
        .term(F::MeanRelativeStrokeLength, ScoreCurve::falling(0.2, 0.8), 0.35)
        .penalty(any(F::ClosedStrokes), 0.6)
}

fn scatter_quality() -> ScoreRule {
    ScoreRule::new()
        .term(F::StrokeCount, ScoreCurve::rising(2.0, 7.0), 0.4)
        .term(F::Branchiness, ScoreCurve::falling(0.0, 0.5), 0.3)
        .term(F::MeanRelativeStrokeLength, ScoreCurve::falling(0.2, 0.8), 0.3)
}

// shared by classification and quality
fn defensive() -> ScoreRule {
    ScoreRule::new()
        .term(F::Compactness, ScoreCurve::rising(0.3, 0.9), 0.4)
        .term(F::StrokeCount, ScoreCurve::falling(2.0, 7.0), 0.3)
        .term(F::Curviness, ScoreCurve::peak(0.5, 0.5), 0.3)
}

fn flowing() -> ScoreRule {
    ScoreRule::new()
        .gate(any(F::CurvedStrokes))
        .term(F::StrokeCount, ScoreCurve::falling(1.0, 4.0), 0.3)
        .term(F::CurvedFraction, ScoreCurve::Identity, 0.4)
        .term(F::LogAspectRatio, UPRIGHT, 0.3)
        .penalty(any(F::ClosedStrokes), 0.5)
        .penalty(any(F::SpikyStrokes), 0.5)
}

fn flowing_quality() -> ScoreRule {
    ScoreRule::new()
        .term(F::CurvedFraction, ScoreCurve::Identity, 0.4)
        .term(F::SpikyFraction, ScoreCurve::falling(0.0, 1.0), 0.2)
        .term(F::StrokeCount, ScoreCurve::falling(1.0, 4.0), 0.2)
        .term(F::LogAspectRatio, UPRIGHT, 0.2)
}

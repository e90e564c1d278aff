//! Drawing to [`FeatureVector`] reduction.
//!
//! Extraction is pure and category-agnostic: the same vector feeds classification and
//! quality scoring. Per-stroke metrics come from [`StrokeAnalysis`]; drawing-level
//! metrics are computed here.
//!
//! # Drawing-level metrics
//!
//! - **Compactness** - isoperimetric ratio `4πA / P²` where `A` is the convex hull area
//!   and `P` the larger of total ink length and hull perimeter. A regular polygon
//!   approaches 1 as its vertex count grows; open scribbles stay low because their ink
//!   length dominates `P`.
//! - **Radialness** - share of strokes that run toward or away from the drawing centroid
//!   (start and end distances differ by more than `radial_ratio` of the extent).
//! - **Branchiness** - share of stroke pairs whose endpoints touch (closer than
//!   `connect_ratio` of the extent).
//!
//! The extent is the larger side of the bounding box, so both thresholds scale with the
//! drawing.

use std::f32::consts::PI;

use inkshape_core::{Drawing, Point, Stroke};

use crate::{
    config::FeatureParams,
    feature_vector::FeatureVector,
    geometry,
    stroke_analysis::StrokeAnalysis,
};

const EPSILON: f32 = FeatureVector::EPSILON;

#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor {
    params: FeatureParams,
}

impl FeatureExtractor {
    #[must_use]
    pub fn new(params: FeatureParams) -> Self {
        Self { params }
    }

    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn extract(&self, drawing: &Drawing) -> FeatureVector {
        let Some((min, max)) = drawing.bounds() else {
            return FeatureVector::default();
        };
        let size = max - min;
        let extent = size.max_element();

        let strokes = drawing
            .strokes()
            .iter()
            .map(|stroke| StrokeAnalysis::new(stroke, &self.params))
            .collect::<Vec<_>>();
        let stroke_count = strokes.len();
        let total_length = strokes.iter().map(StrokeAnalysis::length).sum::<f32>();

        let curviness =
            strokes.iter().map(StrokeAnalysis::curviness).sum::<f32>() / stroke_count as f32;
        let mean_relative_stroke_length = if extent > EPSILON {
            total_length / stroke_count as f32 / extent
        } else {
            0.0
        };

        let features = FeatureVector {
            stroke_count,
            width: size.x,
            height: size.y,
            aspect_ratio: aspect_ratio(size),
            closed_strokes: count(&strokes, StrokeAnalysis::is_closed),
            vertical_strokes: count(&strokes, |s| s.direction().is_vertical()),
            horizontal_strokes: count(&strokes, |s| s.direction().is_horizontal()),
            spiky_strokes: count(&strokes, StrokeAnalysis::is_spiky),
            curved_strokes: count(&strokes, StrokeAnalysis::is_curved),
            curviness,
            compactness: compactness(drawing, min, extent, total_length),
            radialness: self.radialness(drawing, extent),
            branchiness: self.branchiness(drawing.strokes(), extent),
            total_length,
            mean_relative_stroke_length,
        };
        tracing::debug!(?features, "extracted drawing features");
        features
    }

    #[expect(clippy::cast_precision_loss)]
    fn radialness(&self, drawing: &Drawing, extent: f32) -> f32 {
        let n = drawing.stroke_count();
        if n < 2 {
            return 0.0;
        }
        let Some(center) = geometry::centroid(drawing.points()) else {
            return 0.0;
        };
        let threshold = self.params.radial_ratio * extent;
        let radial = drawing
            .strokes()
            .iter()
            .filter(|s| (s.first().distance(center) - s.last().distance(center)).abs() > threshold)
            .count();
        radial as f32 / n as f32
    }

    #[expect(clippy::cast_precision_loss)]
    fn branchiness(&self, strokes: &[Stroke], extent: f32) -> f32 {
        let n = strokes.len();
        if n < 2 {
            return 0.0;
        }
        let threshold = self.params.connect_ratio * extent;
        let mut connected = 0_usize;
        for (i, a) in strokes.iter().enumerate() {
            for b in &strokes[i + 1..] {
                if endpoint_distance(a, b) < threshold {
                    connected += 1;
                }
            }
        }
        let pairs = n * (n - 1) / 2;
        connected as f32 / pairs as f32
    }
}

fn count<'a>(strokes: &[StrokeAnalysis<'a>], pred: impl Fn(&StrokeAnalysis<'a>) -> bool) -> usize {
    strokes.iter().filter(|&s| pred(s)).count()
}

fn aspect_ratio(size: Point) -> f32 {
    if size.x < EPSILON && size.y < EPSILON {
        return 1.0;
    }
    size.y / size.x.max(EPSILON)
}

/// Isoperimetric ratio of the convex hull, measured in units of `extent` so that area and
/// squared perimeter stay representable for any finite coordinates.
fn compactness(drawing: &Drawing, origin: Point, extent: f32, total_length: f32) -> f32 {
    if !extent.is_finite() || extent <= 0.0 {
        return 0.0;
    }
    let hull = geometry::convex_hull(drawing.points().map(|p| (p - origin) / extent));
    let area = geometry::polygon_area(&hull);
    let perimeter = (total_length / extent).max(geometry::polygon_perimeter(&hull));
    if perimeter <= EPSILON {
        return 0.0;
    }
    let ratio = 4.0 * PI * area / (perimeter * perimeter);
    if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn endpoint_distance(a: &Stroke, b: &Stroke) -> f32 {
    [
        (a.first(), b.first()),
        (a.first(), b.last()),
        (a.last(), b.first()),
        (a.last(), b.last()),
    ]
    .into_iter()
    .map(|(p, q)| p.distance(q))
    .fold(f32::INFINITY, f32::min)
}

#[cfg(test)]
mod tests {
    use std::f32::consts::TAU;

    use super::*;

    fn drawing(strokes: &[&[(f32, f32)]]) -> Drawing {
        strokes
            .iter()
            .map(|coords| Stroke::from_xy(coords.iter().copied()).unwrap())
            .collect()
    }

    #[expect(clippy::cast_precision_loss)]
    fn polygon(sides: usize) -> Drawing {
        let stroke = Stroke::from_xy((0..=sides).map(|i| {
            let t = TAU * i as f32 / sides as f32;
            (t.cos(), t.sin())
        }))
        .unwrap();
        Drawing::new(vec![stroke])
    }

    fn extract(drawing: &Drawing) -> FeatureVector {
        FeatureExtractor::default().extract(drawing)
    }

    #[test]
    fn test_empty_drawing() {
        let features = extract(&Drawing::default());
        assert_eq!(features, FeatureVector::default());
        assert!((features.aspect_ratio - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_single_point_drawing() {
        let features = extract(&drawing(&[&[(2.0, 3.0)]]));
        assert_eq!(features.stroke_count, 1);
        assert!((features.aspect_ratio - 1.0).abs() < f32::EPSILON);
        assert!(features.total_length.abs() < f32::EPSILON);
        assert!(features.compactness.abs() < f32::EPSILON);
        assert!(features.is_degenerate());
    }

    #[test]
    fn test_bounding_box_and_aspect() {
        let features = extract(&drawing(&[&[(0.0, 0.0), (4.0, 1.0)]]));
        assert!((features.width - 4.0).abs() < 1e-6);
        assert!((features.height - 1.0).abs() < 1e-6);
        assert!((features.aspect_ratio - 0.25).abs() < 1e-6);
        assert_eq!(features.horizontal_strokes, 1);
    }

    #[test]
    fn test_vertical_line_aspect_uses_epsilon_floor() {
        let features = extract(&drawing(&[&[(1.0, 0.0), (1.0, 2.0)]]));
        assert!((features.aspect_ratio - 2.0 / EPSILON).abs() < 1.0);
        assert_eq!(features.vertical_strokes, 1);
    }

    #[test]
    fn test_compactness_grows_with_polygon_density() {
        let octagon = extract(&polygon(8)).compactness;
        let dense = extract(&polygon(32)).compactness;
        assert!(octagon > 0.9);
        assert!(dense > octagon);
        assert!(dense <= 1.0);
    }

    #[test]
    fn test_compactness_is_scale_free() {
        let unit = polygon(32);
        let scaled = unit.points().map(|p| p * 1e19).collect();
        let huge = Drawing::new(vec![Stroke::new(scaled).unwrap()]);
        let expected = extract(&unit).compactness;
        let features = extract(&huge);
        assert!(features.compactness.is_finite());
        assert!((features.compactness - expected).abs() < 1e-3);
        assert!(features.curviness.is_finite());
    }

    #[test]
    fn test_straight_line_is_not_compact() {
        let features = extract(&drawing(&[&[(0.0, 0.0), (1.0, 0.2), (2.0, 0.0)]]));
        assert!(features.compactness < 0.2);
    }

    #[test]
    fn test_radial_strokes() {
        // four spokes pointing away from the middle
        let features = extract(&drawing(&[
            &[(0.1, 0.0), (1.0, 0.0)],
            &[(-0.1, 0.0), (-1.0, 0.0)],
            &[(0.0, 0.1), (0.0, 1.0)],
            &[(0.0, -0.1), (0.0, -1.0)],
        ]));
        assert!((features.radialness - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_single_stroke_has_no_radialness_or_branchiness() {
        let features = extract(&polygon(12));
        assert!(features.radialness.abs() < f32::EPSILON);
        assert!(features.branchiness.abs() < f32::EPSILON);
    }

    #[test]
    fn test_connected_strokes_branch() {
        let features = extract(&drawing(&[
            &[(0.0, 0.0), (1.0, 1.0)],
            &[(1.0, 1.0), (2.0, 0.0)],
            &[(5.0, 5.0), (5.0, 6.0)],
        ]));
        // one of three pairs touches
        assert!((features.branchiness - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_mean_relative_stroke_length() {
        let features = extract(&drawing(&[
            &[(0.0, 0.0), (1.0, 0.0)],
            &[(0.0, 2.0), (2.0, 2.0)],
        ]));
        // mean length 1.5 over extent 2
        assert!((features.mean_relative_stroke_length - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let d = polygon(16);
        assert_eq!(extract(&d), extract(&d));
    }
}

//! Per-stroke geometric measurements.
//!
//! [`StrokeAnalysis`] wraps a single [`Stroke`] and computes its metrics lazily, so the
//! feature extractor only pays for what it reads. Turn angles in particular are shared by
//! the spiky, curved and curviness tests and are computed once.

use std::cell::OnceCell;

use inkshape_core::{Point, Stroke};

use crate::config::FeatureParams;

/// Dominant direction of a stroke's endpoint displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum StrokeDirection {
    Vertical,
    Horizontal,
    Diagonal,
    /// Start and end coincide.
    Stationary,
}

#[derive(Debug)]
pub struct StrokeAnalysis<'a> {
    stroke: &'a Stroke,
    params: &'a FeatureParams,
    length: OnceCell<f32>,
    turn_angles: OnceCell<Vec<f32>>,
}

impl<'a> StrokeAnalysis<'a> {
    #[must_use]
    pub fn new(stroke: &'a Stroke, params: &'a FeatureParams) -> Self {
        Self {
            stroke,
            params,
            length: OnceCell::new(),
            turn_angles: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn length(&self) -> f32 {
        *self.length.get_or_init(|| self.stroke.length())
    }

    /// Turn angles in degrees at each interior point, in \[0, 180\].
    ///
    /// A vertex is skipped when either adjoining segment is no longer than
    /// `min_segment_length`.
    #[must_use]
    pub fn turn_angles(&self) -> &[f32] {
        self.turn_angles.get_or_init(|| {
            let min_len = self.params.min_segment_length;
            self.stroke
                .points()
                .windows(3)
                .filter_map(|w| turn_angle(w[0], w[1], w[2], min_len))
                .collect()
        })
    }

    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn mean_turn_angle(&self) -> Option<f32> {
        let angles = self.turn_angles();
        if angles.is_empty() {
            return None;
        }
        Some(angles.iter().sum::<f32>() / angles.len() as f32)
    }

    #[must_use]
    pub fn sharp_turns(&self) -> usize {
        let threshold = self.params.sharp_turn_degrees;
        self.turn_angles().iter().filter(|&&a| a > threshold).count()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        let length = self.length();
        self.stroke.num_points() >= self.params.closed_min_points
            && length > self.params.closed_min_length
            && self.stroke.endpoint_gap() < self.params.closed_gap_ratio * length
    }

    #[must_use]
    pub fn direction(&self) -> StrokeDirection {
        let d = self.stroke.displacement().abs();
        let ratio = self.params.direction_ratio;
        if d.x <= f32::EPSILON && d.y <= f32::EPSILON {
            StrokeDirection::Stationary
        } else if d.y > ratio * d.x {
            StrokeDirection::Vertical
        } else if d.x > ratio * d.y {
            StrokeDirection::Horizontal
        } else {
            StrokeDirection::Diagonal
        }
    }

    #[must_use]
    pub fn is_spiky(&self) -> bool {
        self.sharp_turns() >= self.params.spiky_min_sharp_turns
    }

    #[must_use]
    pub fn is_curved(&self) -> bool {
        if self.stroke.num_points() < self.params.curved_min_points {
            return false;
        }
        self.mean_turn_angle().is_some_and(|mean| {
            mean > self.params.curved_min_degrees && mean < self.params.curved_max_degrees
        })
    }

    /// Mean turn angle scaled so that 90 degrees maps to 1.
    #[must_use]
    pub fn curviness(&self) -> f32 {
        self.mean_turn_angle()
            .map_or(0.0, |mean| (mean / 90.0).clamp(0.0, 1.0))
    }
}

fn turn_angle(prev: Point, at: Point, next: Point, min_segment_length: f32) -> Option<f32> {
    let incoming = at - prev;
    let outgoing = next - at;
    let (l1, l2) = (incoming.length(), outgoing.length());
    if l1 <= min_segment_length || l2 <= min_segment_length {
        return None;
    }
    let cos = incoming.dot(outgoing) / l1 / l2;
    if cos.is_nan() {
        return None;
    }
    Some(cos.clamp(-1.0, 1.0).acos().to_degrees())
}

#[cfg(test)]
mod tests {
    use std::f32::consts::TAU;

    use super::*;

    fn stroke(coords: &[(f32, f32)]) -> Stroke {
        Stroke::from_xy(coords.iter().copied()).unwrap()
    }

    #[expect(clippy::cast_precision_loss)]
    fn circle(points: usize, closing_point: bool) -> Stroke {
        let n = if closing_point { points + 1 } else { points };
        Stroke::from_xy((0..n).map(|i| {
            let t = TAU * i as f32 / points as f32;
            (t.cos(), t.sin())
        }))
        .unwrap()
    }

    #[test]
    fn test_length_is_cached_value() {
        let params = FeatureParams::default();
        let s = stroke(&[(0.0, 0.0), (3.0, 4.0), (3.0, 5.0)]);
        let analysis = StrokeAnalysis::new(&s, &params);
        assert!((analysis.length() - 6.0).abs() < 1e-6);
        assert!((analysis.length() - 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_right_angle_turn() {
        let params = FeatureParams::default();
        let s = stroke(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        let analysis = StrokeAnalysis::new(&s, &params);
        assert_eq!(analysis.turn_angles().len(), 1);
        assert!((analysis.turn_angles()[0] - 90.0).abs() < 1e-3);
        assert_eq!(analysis.sharp_turns(), 1);
        assert!(!analysis.is_spiky());
    }

    #[test]
    fn test_short_segments_are_skipped() {
        let params = FeatureParams::default();
        let s = stroke(&[(0.0, 0.0), (1.0, 0.0), (1.0, 0.001), (2.0, 0.001)]);
        let analysis = StrokeAnalysis::new(&s, &params);
        assert!(analysis.turn_angles().is_empty());
        assert_eq!(analysis.mean_turn_angle(), None);
        assert!(analysis.curviness().abs() < f32::EPSILON);
    }

    #[test]
    fn test_zigzag_is_spiky() {
        let params = FeatureParams::default();
        let s = stroke(&[
            (0.0, 0.0),
            (0.5, 1.0),
            (1.0, 0.0),
            (1.5, 1.0),
            (2.0, 0.0),
        ]);
        let analysis = StrokeAnalysis::new(&s, &params);
        assert_eq!(analysis.sharp_turns(), 3);
        assert!(analysis.is_spiky());
        assert!(!analysis.is_curved());
    }

    mod closed {
        use super::*;

        #[test]
        fn test_circle_with_closing_point() {
            let params = FeatureParams::default();
            let s = circle(16, true);
            assert!(StrokeAnalysis::new(&s, &params).is_closed());
        }

        #[test]
        fn test_circle_without_closing_point() {
            // gap is one chord, well under the ratio of the perimeter
            let params = FeatureParams::default();
            let s = circle(16, false);
            assert!(StrokeAnalysis::new(&s, &params).is_closed());
        }

        #[test]
        fn test_too_few_points() {
            let params = FeatureParams::default();
            let s = circle(5, true);
            assert!(!StrokeAnalysis::new(&s, &params).is_closed());
        }

        #[test]
        fn test_open_arc() {
            let params = FeatureParams::default();
            let s = Stroke::from_xy((0..12).map(|i| {
                #[expect(clippy::cast_precision_loss)]
                let t = std::f32::consts::PI * i as f32 / 11.0;
                (t.cos(), t.sin())
            }))
            .unwrap();
            assert!(!StrokeAnalysis::new(&s, &params).is_closed());
        }
    }

    mod direction {
        use super::*;

        #[test]
        fn test_vertical() {
            let params = FeatureParams::default();
            let s = stroke(&[(0.0, 0.0), (0.3, 3.0)]);
            assert_eq!(
                StrokeAnalysis::new(&s, &params).direction(),
                StrokeDirection::Vertical
            );
        }

        #[test]
        fn test_horizontal() {
            let params = FeatureParams::default();
            let s = stroke(&[(0.0, 0.0), (-4.0, 1.0)]);
            assert!(StrokeAnalysis::new(&s, &params).direction().is_horizontal());
        }

        #[test]
        fn test_diagonal() {
            let params = FeatureParams::default();
            let s = stroke(&[(0.0, 0.0), (1.0, 1.1)]);
            assert!(StrokeAnalysis::new(&s, &params).direction().is_diagonal());
        }

        #[test]
        fn test_closed_loop_is_stationary() {
            let params = FeatureParams::default();
            let s = stroke(&[(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)]);
            assert!(StrokeAnalysis::new(&s, &params).direction().is_stationary());
        }
    }

    #[test]
    fn test_circle_is_curved() {
        let params = FeatureParams::default();
        let s = circle(16, true);
        let analysis = StrokeAnalysis::new(&s, &params);
        assert!(analysis.is_curved());
        assert!((analysis.mean_turn_angle().unwrap() - 22.5).abs() < 1e-2);
        assert!((analysis.curviness() - 0.25).abs() < 1e-3);
    }
}

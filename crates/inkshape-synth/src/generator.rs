use inkshape_core::{Drawing, Point, Stroke};
use rand::{Rng as _, SeedableRng as _};
use rand_distr::Normal;
use rand_pcg::Pcg32;

use crate::TemplateShape;

#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
#[display("jitter must be finite and non-negative, got {jitter}")]
pub struct InvalidJitterError {
    #[error(not(source))]
    pub jitter: f32,
}

/// Renders [`TemplateShape`]s with seeded Gaussian jitter.
///
/// Jitter is the standard deviation, in canvas units, of independent noise added to each
/// coordinate.
#[derive(Debug, Clone)]
pub struct ShapeGenerator {
    rng: Pcg32,
    jitter: f32,
    noise: Normal<f32>,
}

impl ShapeGenerator {
    pub fn new(seed: u64, jitter: f32) -> Result<Self, InvalidJitterError> {
        if !jitter.is_finite() || jitter < 0.0 {
            return Err(InvalidJitterError { jitter });
        }
        let noise = Normal::new(0.0, jitter).map_err(|_| InvalidJitterError { jitter })?;
        Ok(Self {
            rng: Pcg32::seed_from_u64(seed),
            jitter,
            noise,
        })
    }

    #[must_use]
    pub fn jitter(&self) -> f32 {
        self.jitter
    }

    #[must_use]
    pub fn generate(&mut self, shape: TemplateShape) -> Drawing {
        shape
            .strokes()
            .into_iter()
            .filter_map(|points| Stroke::new(self.perturb(points)).ok())
            .collect()
    }

    fn perturb(&mut self, mut points: Vec<Point>) -> Vec<Point> {
        if self.jitter <= 0.0 {
            return points;
        }
        for p in &mut points {
            *p += Point::new(self.rng.sample(self.noise), self.rng.sample(self.noise));
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_jitter_is_exact() {
        let mut generator = ShapeGenerator::new(7, 0.0).unwrap();
        let drawing = generator.generate(TemplateShape::Box);
        assert_eq!(drawing.stroke_count(), 1);
        assert_eq!(drawing.strokes()[0].points().to_vec(), TemplateShape::Box.strokes()[0]);
    }

    #[test]
    fn test_same_seed_same_drawing() {
        let mut a = ShapeGenerator::new(42, 0.05).unwrap();
        let mut b = ShapeGenerator::new(42, 0.05).unwrap();
        for shape in [TemplateShape::Circle, TemplateShape::Scatter { count: 6 }] {
            assert_eq!(a.generate(shape), b.generate(shape));
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = ShapeGenerator::new(1, 0.05).unwrap().generate(TemplateShape::Wave);
        let b = ShapeGenerator::new(2, 0.05).unwrap().generate(TemplateShape::Wave);
        assert_ne!(a, b);
    }

    #[test]
    fn test_jitter_stays_near_template() {
        let mut generator = ShapeGenerator::new(3, 0.01).unwrap();
        let drawing = generator.generate(TemplateShape::Circle);
        for p in drawing.points() {
            assert!((p.length() - 1.0).abs() < 0.1);
        }
    }

    #[test]
    fn test_invalid_jitter() {
        assert!(ShapeGenerator::new(0, -0.1).is_err());
        assert!(ShapeGenerator::new(0, f32::NAN).is_err());
    }

    #[test]
    fn test_degenerate_polygon_yields_empty_drawing() {
        let mut generator = ShapeGenerator::new(0, 0.0).unwrap();
        assert!(generator.generate(TemplateShape::Polygon { sides: 2 }).is_empty());
    }
}

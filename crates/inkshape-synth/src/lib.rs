//! Seeded synthetic drawings for calibration and tests.
//!
//! [`TemplateShape`] names an idealized drawing; [`ShapeGenerator`] renders it as a
//! [`Drawing`](inkshape_core::Drawing), optionally perturbing every point with Gaussian
//! jitter. The same seed and jitter always produce the same drawing, and zero jitter
//! reproduces the exact template geometry.
//!
//! ```rust
//! use inkshape_synth::{ShapeGenerator, TemplateShape};
//!
//! let mut generator = ShapeGenerator::new(42, 0.02)?;
//! let wave = generator.generate(TemplateShape::Wave);
//! assert_eq!(wave.stroke_count(), 1);
//! # Ok::<(), inkshape_synth::InvalidJitterError>(())
//! ```

pub use self::{generator::*, shape::*};

mod generator;
mod shape;

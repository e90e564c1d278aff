//! Ink model for freehand gesture recognition.
//!
//! This crate holds the plain value types the recognizer consumes:
//!
//! - [`Point`] - a 2D coordinate in canvas-local units (not screen pixels)
//! - [`Stroke`] - one pen-down-to-pen-up polyline, never empty, immutable once built
//! - [`Drawing`] - the ordered set of strokes submitted for one analysis
//! - [`DrawingBuilder`] - a small capture helper that turns pointer events into a
//!   finalized [`Drawing`]
//!
//! Nothing here knows about categories or scoring; see `inkshape-evaluator` for that.
//!
//! # Serialization
//!
//! Points serialize as `[x, y]`, strokes as arrays of points and drawings as arrays of
//! strokes, so a two-stroke drawing looks like:
//!
//! ```json
//! [[[0.0, 0.0], [1.0, 0.5]], [[2.0, 2.0], [2.0, 3.0], [2.5, 3.5]]]
//! ```
//!
//! Deserialization enforces the same invariants as the constructors.

pub use self::{capture::*, drawing::*, stroke::*};

pub mod capture;
pub mod drawing;
pub mod stroke;

/// A 2D coordinate in canvas-local units.
pub type Point = glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StrokeError {
    #[display("stroke must contain at least one point")]
    Empty,
    #[display("stroke point {index} has a non-finite coordinate")]
    NonFinitePoint { index: usize },
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error,
    derive_more::IsVariant,
)]
pub enum CaptureError {
    #[display("a stroke is already in progress")]
    StrokeInProgress,
    #[display("no stroke is in progress")]
    NoStrokeInProgress,
    #[display("drawing already holds the maximum of {max} strokes")]
    TooManyStrokes { max: usize },
    #[display("invalid point")]
    InvalidPoint(StrokeError),
}

//! Turning pointer events into a finalized [`Drawing`].
//!
//! The recognizer must only ever see finished strokes. [`DrawingBuilder`] owns the
//! in-progress stroke while the pen is down and only hands out an immutable [`Drawing`]
//! from [`DrawingBuilder::finish`], which commits a dangling stroke first.

use crate::{CaptureError, Drawing, Point, Stroke, StrokeError};

/// Default cap on the number of strokes in one drawing.
pub const DEFAULT_MAX_STROKES: usize = 30;

/// Collects pen-down / move / pen-up events into strokes.
///
/// # Example
///
/// ```
/// use inkshape_core::{DrawingBuilder, Point};
///
/// let mut builder = DrawingBuilder::new(5);
/// builder.begin_stroke(Point::new(0.0, 0.0)).unwrap();
/// builder.extend_stroke(Point::new(1.0, 0.0)).unwrap();
/// builder.end_stroke().unwrap();
///
/// let drawing = builder.finish();
/// assert_eq!(drawing.stroke_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct DrawingBuilder {
    max_strokes: usize,
    strokes: Vec<Stroke>,
    current: Option<Vec<Point>>,
}

impl Default for DrawingBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STROKES)
    }
}

impl DrawingBuilder {
    #[must_use]
    pub fn new(max_strokes: usize) -> Self {
        Self {
            max_strokes,
            strokes: Vec::new(),
            current: None,
        }
    }

    #[must_use]
    pub fn max_strokes(&self) -> usize {
        self.max_strokes
    }

    /// Number of committed strokes (the in-progress stroke is not counted).
    #[must_use]
    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.current.is_some()
    }

    /// Pen down: starts a new stroke at `point`.
    pub fn begin_stroke(&mut self, point: Point) -> Result<(), CaptureError> {
        if self.current.is_some() {
            return Err(CaptureError::StrokeInProgress);
        }
        if self.strokes.len() >= self.max_strokes {
            return Err(CaptureError::TooManyStrokes {
                max: self.max_strokes,
            });
        }
        check_finite(point, 0)?;
        self.current = Some(vec![point]);
        Ok(())
    }

    /// Pen move: appends `point` to the in-progress stroke.
    pub fn extend_stroke(&mut self, point: Point) -> Result<(), CaptureError> {
        let current = self
            .current
            .as_mut()
            .ok_or(CaptureError::NoStrokeInProgress)?;
        check_finite(point, current.len())?;
        current.push(point);
        Ok(())
    }

    /// Pen up: commits the in-progress stroke.
    pub fn end_stroke(&mut self) -> Result<(), CaptureError> {
        let points = self
            .current
            .take()
            .ok_or(CaptureError::NoStrokeInProgress)?;
        let stroke = Stroke::new(points).map_err(CaptureError::InvalidPoint)?;
        self.strokes.push(stroke);
        Ok(())
    }

    /// Discards the in-progress stroke, if any.
    pub fn cancel_stroke(&mut self) {
        self.current = None;
    }

    /// Returns the committed strokes as a drawing, leaving the builder untouched.
    #[must_use]
    pub fn snapshot(&self) -> Drawing {
        Drawing::new(self.strokes.clone())
    }

    /// Commits any in-progress stroke and returns the finished drawing.
    #[must_use]
    pub fn finish(mut self) -> Drawing {
        if let Some(points) = self.current.take() {
            // points were validated as they were added and the vector is never empty
            if let Ok(stroke) = Stroke::new(points) {
                self.strokes.push(stroke);
            }
        }
        Drawing::new(self.strokes)
    }
}

fn check_finite(point: Point, index: usize) -> Result<(), CaptureError> {
    if point.is_finite() {
        Ok(())
    } else {
        Err(CaptureError::InvalidPoint(StrokeError::NonFinitePoint {
            index,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_stroke_lifecycle() {
        let mut builder = DrawingBuilder::new(3);
        assert!(!builder.is_drawing());

        builder.begin_stroke(p(0.0, 0.0)).unwrap();
        assert!(builder.is_drawing());
        builder.extend_stroke(p(1.0, 1.0)).unwrap();
        builder.extend_stroke(p(2.0, 1.0)).unwrap();
        builder.end_stroke().unwrap();

        assert_eq!(builder.stroke_count(), 1);
        let drawing = builder.finish();
        assert_eq!(drawing.strokes()[0].num_points(), 3);
    }

    #[test]
    fn test_nested_begin_is_rejected() {
        let mut builder = DrawingBuilder::default();
        builder.begin_stroke(p(0.0, 0.0)).unwrap();
        assert_eq!(
            builder.begin_stroke(p(1.0, 0.0)),
            Err(CaptureError::StrokeInProgress)
        );
    }

    #[test]
    fn test_move_and_end_without_stroke_are_rejected() {
        let mut builder = DrawingBuilder::default();
        assert_eq!(
            builder.extend_stroke(p(0.0, 0.0)),
            Err(CaptureError::NoStrokeInProgress)
        );
        assert_eq!(builder.end_stroke(), Err(CaptureError::NoStrokeInProgress));
    }

    #[test]
    fn test_stroke_cap() {
        let mut builder = DrawingBuilder::new(2);
        for i in 0..2 {
            builder.begin_stroke(p(i as f32, 0.0)).unwrap();
            builder.end_stroke().unwrap();
        }
        assert_eq!(
            builder.begin_stroke(p(5.0, 0.0)),
            Err(CaptureError::TooManyStrokes { max: 2 })
        );
    }

    #[test]
    fn test_non_finite_points_are_rejected() {
        let mut builder = DrawingBuilder::default();
        assert!(builder.begin_stroke(p(f32::NAN, 0.0)).unwrap_err().is_invalid_point());

        builder.begin_stroke(p(0.0, 0.0)).unwrap();
        let err = builder.extend_stroke(p(0.0, f32::INFINITY)).unwrap_err();
        assert_eq!(
            err,
            CaptureError::InvalidPoint(StrokeError::NonFinitePoint { index: 1 })
        );
    }

    #[test]
    fn test_snapshot_excludes_in_progress_stroke() {
        let mut builder = DrawingBuilder::default();
        builder.begin_stroke(p(0.0, 0.0)).unwrap();
        builder.end_stroke().unwrap();
        builder.begin_stroke(p(1.0, 1.0)).unwrap();

        assert_eq!(builder.snapshot().stroke_count(), 1);
    }

    #[test]
    fn test_finish_commits_in_progress_stroke() {
        let mut builder = DrawingBuilder::default();
        builder.begin_stroke(p(0.0, 0.0)).unwrap();
        builder.extend_stroke(p(0.0, 1.0)).unwrap();

        let drawing = builder.finish();
        assert_eq!(drawing.stroke_count(), 1);
        assert_eq!(drawing.strokes()[0].num_points(), 2);
    }

    #[test]
    fn test_cancel_discards_stroke() {
        let mut builder = DrawingBuilder::default();
        builder.begin_stroke(p(0.0, 0.0)).unwrap();
        builder.cancel_stroke();
        assert!(builder.finish().is_empty());
    }
}

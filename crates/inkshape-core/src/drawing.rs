use serde::{Deserialize, Serialize};

use crate::{Point, Stroke};

/// A finished drawing: the ordered strokes submitted for one analysis.
///
/// Stroke order is preserved but only the stroke count matters to scoring. A drawing
/// may be empty; the recognizer treats that as a failed attempt rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Drawing {
    strokes: Vec<Stroke>,
}

impl Drawing {
    #[must_use]
    pub fn new(strokes: Vec<Stroke>) -> Self {
        Self { strokes }
    }

    #[must_use]
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    #[must_use]
    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Iterates over every point of every stroke, in drawing order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.strokes.iter().flat_map(|s| s.points().iter().copied())
    }

    #[must_use]
    pub fn num_points(&self) -> usize {
        self.strokes.iter().map(Stroke::num_points).sum()
    }

    /// Returns the `(min, max)` corners of the bounding box, or `None` for an empty drawing.
    #[must_use]
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let mut points = self.points();
        let first = points.next()?;
        Some(points.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }

    /// Returns a copy holding at most the first `max_strokes` strokes.
    #[must_use]
    pub fn truncated(&self, max_strokes: usize) -> Self {
        Self {
            strokes: self.strokes.iter().take(max_strokes).cloned().collect(),
        }
    }
}

impl From<Vec<Stroke>> for Drawing {
    fn from(strokes: Vec<Stroke>) -> Self {
        Self::new(strokes)
    }
}

impl FromIterator<Stroke> for Drawing {
    fn from_iter<T: IntoIterator<Item = Stroke>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Drawing {
    type Item = &'a Stroke;
    type IntoIter = std::slice::Iter<'a, Stroke>;

    fn into_iter(self) -> Self::IntoIter {
        self.strokes.iter()
    }
}

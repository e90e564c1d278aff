use serde::{Deserialize, Serialize};

use crate::{Point, StrokeError};

/// One continuous pen-down-to-pen-up polyline.
///
/// A stroke always holds at least one point and every coordinate is finite. A single-point
/// stroke (a tap) is legal; it has zero length and contributes no turn angles.
///
/// # Example
///
/// ```
/// use inkshape_core::Stroke;
///
/// let stroke = Stroke::from_xy([(0.0, 0.0), (3.0, 4.0)]).unwrap();
/// assert_eq!(stroke.length(), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct Stroke {
    points: Vec<Point>,
}

impl Stroke {
    /// Creates a stroke from its points in drawing order.
    pub fn new(points: Vec<Point>) -> Result<Self, StrokeError> {
        if points.is_empty() {
            return Err(StrokeError::Empty);
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(StrokeError::NonFinitePoint { index });
        }
        Ok(Self { points })
    }

    /// Creates a stroke from `(x, y)` pairs.
    pub fn from_xy<I>(coords: I) -> Result<Self, StrokeError>
    where
        I: IntoIterator<Item = (f32, f32)>,
    {
        Self::new(coords.into_iter().map(|(x, y)| Point::new(x, y)).collect())
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn first(&self) -> Point {
        self.points[0]
    }

    #[must_use]
    pub fn last(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Returns consecutive point pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Sum of Euclidean distances between consecutive points.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.segments().map(|(a, b)| a.distance(b)).sum()
    }

    /// Distance between the first and the last point.
    #[must_use]
    pub fn endpoint_gap(&self) -> f32 {
        self.first().distance(self.last())
    }

    /// Vector from the first to the last point.
    #[must_use]
    pub fn displacement(&self) -> Point {
        self.last() - self.first()
    }
}

impl TryFrom<Vec<Point>> for Stroke {
    type Error = StrokeError;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<Stroke> for Vec<Point> {
    fn from(stroke: Stroke) -> Self {
        stroke.points
    }
}

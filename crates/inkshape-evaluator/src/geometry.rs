//! Planar helpers shared by the feature extractor.

use inkshape_core::Point;

/// Convex hull of `points` in counter-clockwise order (Andrew's monotone chain).
///
/// Duplicate points are removed. Fewer than three distinct points yield the distinct
/// points themselves.
pub(crate) fn convex_hull(points: impl IntoIterator<Item = Point>) -> Vec<Point> {
    let mut points = points.into_iter().collect::<Vec<_>>();
    points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    points.dedup();
    if points.len() < 3 {
        return points;
    }

    let mut hull: Vec<Point> = Vec::with_capacity(points.len() * 2);
    for &p in &points {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }
    let lower_len = hull.len() + 1;
    for &p in points.iter().rev().skip(1) {
        while hull.len() >= lower_len && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0
        {
            hull.pop();
        }
        hull.push(p);
    }
    hull.pop();
    hull
}

fn cross(o: Point, a: Point, b: Point) -> f32 {
    (a - o).perp_dot(b - o)
}

/// Unsigned shoelace area of a closed polygon.
pub(crate) fn polygon_area(polygon: &[Point]) -> f32 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let twice_area: f32 = closed_edges(polygon).map(|(a, b)| a.perp_dot(b)).sum();
    twice_area.abs() / 2.0
}

/// Perimeter of a closed polygon; a two-point "polygon" is walked there and back.
pub(crate) fn polygon_perimeter(polygon: &[Point]) -> f32 {
    if polygon.len() < 2 {
        return 0.0;
    }
    closed_edges(polygon).map(|(a, b)| a.distance(b)).sum()
}

fn closed_edges(polygon: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    polygon
        .iter()
        .copied()
        .zip(polygon.iter().copied().cycle().skip(1))
}

/// Mean of `points`, or `None` when there are none.
#[expect(clippy::cast_precision_loss)]
pub(crate) fn centroid(points: impl IntoIterator<Item = Point>) -> Option<Point> {
    let (sum, count) = points
        .into_iter()
        .fold((Point::ZERO, 0_usize), |(sum, count), p| (sum + p, count + 1));
    (count > 0).then(|| sum / count as f32)
}

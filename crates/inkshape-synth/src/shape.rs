use std::{f32::consts::TAU, fmt, str::FromStr};

use inkshape_core::Point;
use serde::{Deserialize, Serialize};

/// Idealized drawings the generator can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "shape")]
pub enum TemplateShape {
    /// Closed 32-point circle of radius 1.
    Circle,
    /// Closed regular polygon of radius 1.
    Polygon { sides: usize },
    /// One wide sine period, 4 units across and 1 unit tall.
    Wave,
    /// Two rows of sharp zigzags.
    Zigzag,
    /// Parallel upright strokes, 3 units tall.
    VerticalStrokes { count: usize },
    /// Short, separate strokes spread over the canvas.
    Scatter { count: usize },
    /// A single upright stroke swaying gently side to side.
    Vine,
    /// Closed unit square drawn in one stroke.
    Box,
}

const EXPECTED_SHAPES: &str =
    "circle, polygon[:N], wave, zigzag, vertical[:N], scatter[:N], vine or box";

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown shape {input:?}; expected {}", EXPECTED_SHAPES)]
pub struct ParseShapeError {
    #[error(not(source))]
    pub input: String,
}

impl TemplateShape {
    pub const DEFAULT_POLYGON_SIDES: usize = 6;
    pub const DEFAULT_VERTICAL_STROKES: usize = 2;
    pub const DEFAULT_SCATTER_STROKES: usize = 5;

    /// Exact stroke geometry, before jitter.
    #[must_use]
    pub fn strokes(self) -> Vec<Vec<Point>> {
        match self {
            Self::Circle => vec![regular_polygon(32, 1.0, true)],
            Self::Polygon { sides } => vec![regular_polygon(sides, 1.0, true)],
            Self::Wave => vec![wave()],
            Self::Zigzag => zigzag(),
            Self::VerticalStrokes { count } => vertical_strokes(count),
            Self::Scatter { count } => scatter(count),
            Self::Vine => vec![vine()],
            Self::Box => vec![square(1.0, 4)],
        }
    }
}

impl fmt::Display for TemplateShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Circle => write!(f, "circle"),
            Self::Polygon { sides } => write!(f, "polygon:{sides}"),
            Self::Wave => write!(f, "wave"),
            Self::Zigzag => write!(f, "zigzag"),
            Self::VerticalStrokes { count } => write!(f, "vertical:{count}"),
            Self::Scatter { count } => write!(f, "scatter:{count}"),
            Self::Vine => write!(f, "vine"),
            Self::Box => write!(f, "box"),
        }
    }
}

impl FromStr for TemplateShape {
    type Err = ParseShapeError;

    /// Parses `name` or `name:N` for the shapes that take a count.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseShapeError {
            input: s.to_owned(),
        };
        let (name, arg) = match s.trim().split_once(':') {
            Some((name, arg)) => (name, Some(arg.trim().parse::<usize>().map_err(|_| err())?)),
            None => (s.trim(), None),
        };
        let shape = match (name.to_ascii_lowercase().as_str(), arg) {
            ("circle", None) => Self::Circle,
            ("polygon", sides) => Self::Polygon {
                sides: sides.unwrap_or(Self::DEFAULT_POLYGON_SIDES),
            },
            ("wave", None) => Self::Wave,
            ("zigzag", None) => Self::Zigzag,
            ("vertical", count) => Self::VerticalStrokes {
                count: count.unwrap_or(Self::DEFAULT_VERTICAL_STROKES),
            },
            ("scatter", count) => Self::Scatter {
                count: count.unwrap_or(Self::DEFAULT_SCATTER_STROKES),
            },
            ("vine", None) => Self::Vine,
            ("box", None) => Self::Box,
            _ => return Err(err()),
        };
        Ok(shape)
    }
}

/// Vertices of a regular polygon centered on the origin, starting at angle 0.
///
/// With `closed`, the first vertex is repeated at the end. Fewer than three sides yields
/// an empty list.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn regular_polygon(sides: usize, radius: f32, closed: bool) -> Vec<Point> {
    if sides < 3 {
        return vec![];
    }
    let count = if closed { sides + 1 } else { sides };
    (0..count)
        .map(|i| {
            let t = TAU * (i % sides) as f32 / sides as f32;
            Point::new(t.cos(), t.sin()) * radius
        })
        .collect()
}

/// Square outline from the origin, `per_side` points along each side plus the closing
/// point.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn square(size: f32, per_side: usize) -> Vec<Point> {
    let per_side = per_side.max(1);
    let corners = [
        Point::ZERO,
        Point::new(size, 0.0),
        Point::new(size, size),
        Point::new(0.0, size),
        Point::ZERO,
    ];
    corners
        .windows(2)
        .flat_map(|side| {
            (0..per_side).map(move |k| side[0].lerp(side[1], k as f32 / per_side as f32))
        })
        .chain([Point::ZERO])
        .collect()
}

#[expect(clippy::cast_precision_loss)]
fn wave() -> Vec<Point> {
    (0..24)
        .map(|i| {
            let t = i as f32 / 23.0;
            Point::new(4.0 * t, 0.5 * (TAU * t).sin())
        })
        .collect()
}

fn zigzag() -> Vec<Vec<Point>> {
    let row = |y: f32, peaks: usize| {
        (0..=peaks)
            .map(|i| {
                #[expect(clippy::cast_precision_loss)]
                let x = 0.5 * i as f32;
                Point::new(x, if i % 2 == 0 { y } else { y + 1.0 })
            })
            .collect::<Vec<_>>()
    };
    vec![row(0.0, 5), row(2.0, 4)]
}

#[expect(clippy::cast_precision_loss)]
fn vertical_strokes(count: usize) -> Vec<Vec<Point>> {
    (0..count)
        .map(|k| {
            let x0 = 1.5 * k as f32;
            (0..12)
                .map(|i| {
                    let t = i as f32 / 11.0;
                    Point::new(x0 + 0.3 * t, 3.0 * t)
                })
                .collect()
        })
        .collect()
}

/// Five hand-placed short strokes; larger counts repeat the pattern to the right.
const SCATTER_PATTERN: [&[(f32, f32)]; 5] = [
    &[(0.0, 0.0), (0.8, 0.6)],
    &[(5.0, 1.0), (5.3, 1.9), (5.1, 2.4)],
    &[(2.0, 6.0), (1.2, 6.5), (0.8, 6.4), (0.5, 7.2)],
    &[(8.0, 7.0), (8.9, 6.6)],
    &[(4.0, 3.5), (4.4, 4.4), (5.0, 4.2)],
];

#[expect(clippy::cast_precision_loss)]
fn scatter(count: usize) -> Vec<Vec<Point>> {
    (0..count)
        .map(|k| {
            let offset = Point::new(10.0 * (k / SCATTER_PATTERN.len()) as f32, 0.0);
            SCATTER_PATTERN[k % SCATTER_PATTERN.len()]
                .iter()
                .map(|&(x, y)| Point::new(x, y) + offset)
                .collect()
        })
        .collect()
}

#[expect(clippy::cast_precision_loss)]
fn vine() -> Vec<Point> {
    (0..20)
        .map(|i| {
            let t = i as f32 / 19.0;
            Point::new(0.6 * (1.5 * std::f32::consts::PI * t).sin(), 2.0 * t)
        })
        .collect()
}

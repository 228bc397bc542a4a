//! Integer geometry primitives used to describe maps and robot footprints.

use std::{
    ops::{Add, Sub},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// Location on the integer lattice expressed as column (`x`) and row (`y`).
///
/// The `y` axis grows upwards, matching the map description format, so row
/// zero is the bottom edge of the map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Rotates the point about the origin into the frame of `orientation`.
    ///
    /// Offsets are authored for a robot facing [`Orientation::Right`], which is
    /// therefore the identity rotation. Each clockwise step turns the offset by
    /// a quarter turn clockwise.
    #[must_use]
    pub const fn rotate(self, orientation: Orientation) -> Self {
        match orientation {
            Orientation::Right => self,
            Orientation::Down => Self::new(self.y, -self.x),
            Orientation::Left => Self::new(-self.x, -self.y),
            Orientation::Up => Self::new(-self.y, self.x),
        }
    }

    /// Rotates like [`Point::rotate`], returning `None` when a component
    /// cannot be negated within `i32`.
    #[must_use]
    pub const fn checked_rotate(self, orientation: Orientation) -> Option<Self> {
        match orientation {
            Orientation::Right => Some(self),
            Orientation::Down => match self.x.checked_neg() {
                Some(x) => Some(Self::new(self.y, x)),
                None => None,
            },
            Orientation::Left => match (self.x.checked_neg(), self.y.checked_neg()) {
                (Some(x), Some(y)) => Some(Self::new(x, y)),
                _ => None,
            },
            Orientation::Up => match self.y.checked_neg() {
                Some(y) => Some(Self::new(y, self.x)),
                None => None,
            },
        }
    }

    /// Translates the point, returning `None` on `i32` overflow.
    #[must_use]
    pub const fn checked_add(self, rhs: Point) -> Option<Self> {
        match (self.x.checked_add(rhs.x), self.y.checked_add(rhs.y)) {
            (Some(x), Some(y)) => Some(Self::new(x, y)),
            _ => None,
        }
    }

    /// Computes the Manhattan distance between two points.
    #[must_use]
    pub fn manhattan_distance(self, other: Point) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Reports whether `other` is exactly one orthogonal step away.
    #[must_use]
    pub fn is_adjacent(self, other: Point) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl FromStr for Point {
    type Err = PointParseError;

    /// Parses the `(x,y)` notation used by map descriptions.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || PointParseError(value.to_owned());
        let inner = value
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;
        let (x, y) = inner.split_once(',').ok_or_else(invalid)?;
        let x = x.trim().parse::<i32>().map_err(|_| invalid())?;
        let y = y.trim().parse::<i32>().map_err(|_| invalid())?;
        Ok(Point::new(x, y))
    }
}

/// Raised when a point literal is not of the form `(x,y)`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("malformed point `{0}`")]
pub struct PointParseError(pub String);

/// Direction a robot is facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Facing increasing `y`.
    Up,
    /// Facing increasing `x`.
    Right,
    /// Facing decreasing `y`.
    Down,
    /// Facing decreasing `x`.
    Left,
}

impl Orientation {
    /// Returns the orientation reached after a single quarter turn.
    #[must_use]
    pub const fn rotated(self, rotation: Rotation) -> Self {
        match (self, rotation) {
            (Self::Up, Rotation::Clockwise) => Self::Right,
            (Self::Right, Rotation::Clockwise) => Self::Down,
            (Self::Down, Rotation::Clockwise) => Self::Left,
            (Self::Left, Rotation::Clockwise) => Self::Up,
            (Self::Up, Rotation::Counterclockwise) => Self::Left,
            (Self::Left, Rotation::Counterclockwise) => Self::Down,
            (Self::Down, Rotation::Counterclockwise) => Self::Right,
            (Self::Right, Rotation::Counterclockwise) => Self::Up,
        }
    }
}

/// Quarter-turn direction applied to an [`Orientation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    /// Turn right.
    Clockwise,
    /// Turn left.
    Counterclockwise,
}

/// Axis-aligned rectangle spanned by two corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Corner with the smallest coordinates.
    pub min: Point,
    /// Corner with the largest coordinates.
    pub max: Point,
}

impl BoundingBox {
    /// Horizontal extent of the box.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.max.x.abs_diff(self.min.x)
    }

    /// Vertical extent of the box.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.max.y.abs_diff(self.min.y)
    }
}

/// Closed boundary described by its vertices in order.
///
/// The last vertex is implicitly connected back to the first one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Creates a polygon from the provided vertices.
    #[must_use]
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// Vertices of the boundary in declaration order.
    #[must_use]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Iterates the closed edges of the boundary as `(start, end)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let count = self.vertices.len();
        (0..count).map(move |index| (self.vertices[index], self.vertices[(index + 1) % count]))
    }

    /// Smallest axis-aligned box containing every vertex.
    ///
    /// Returns `None` for a polygon without vertices.
    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let first = *self.vertices.first()?;
        let bbox = self.vertices.iter().fold(
            BoundingBox {
                min: first,
                max: first,
            },
            |bbox, vertex| BoundingBox {
                min: Point::new(bbox.min.x.min(vertex.x), bbox.min.y.min(vertex.y)),
                max: Point::new(bbox.max.x.max(vertex.x), bbox.max.y.max(vertex.y)),
            },
        );
        Some(bbox)
    }

    /// Reports whether the unit cell anchored at `(x, y)` lies inside.
    ///
    /// The cell is sampled at its centre using the even-odd rule. A centre
    /// that falls exactly on an edge counts as inside.
    #[must_use]
    pub fn contains_cell(&self, x: i32, y: i32) -> bool {
        if self.vertices.len() < 3 {
            return false;
        }

        // Doubled coordinates keep the centre sample on the integer lattice.
        let px = 2 * i64::from(x) + 1;
        let py = 2 * i64::from(y) + 1;
        let mut inside = false;

        for (start, end) in self.edges() {
            let (sx, sy) = (2 * i64::from(start.x), 2 * i64::from(start.y));
            let (ex, ey) = (2 * i64::from(end.x), 2 * i64::from(end.y));

            if on_segment((sx, sy), (ex, ey), (px, py)) {
                return true;
            }

            if (sy > py) != (ey > py) {
                // Crossing abscissa compared without division.
                let lhs = (px - sx) * (ey - sy);
                let rhs = (ex - sx) * (py - sy);
                let crosses = if ey > sy { lhs < rhs } else { lhs > rhs };
                if crosses {
                    inside = !inside;
                }
            }
        }

        inside
    }
}

fn on_segment(start: (i64, i64), end: (i64, i64), point: (i64, i64)) -> bool {
    let cross = (end.0 - start.0) * (point.1 - start.1) - (end.1 - start.1) * (point.0 - start.0);
    cross == 0
        && point.0 >= start.0.min(end.0)
        && point.0 <= start.0.max(end.0)
        && point.1 >= start.1.min(end.1)
        && point.1 <= start.1.max(end.1)
}

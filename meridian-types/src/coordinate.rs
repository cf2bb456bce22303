//! [`Coordinate`] and the [`CartesianPoint2d`] trait shared by map and screen points.

use nalgebra::{Point2, Scalar, Vector2};
use num_traits::{Float, Num};
use serde::{Deserialize, Serialize};

/// Point with `x` and `y` coordinates in some 2d cartesian space.
pub trait CartesianPoint2d {
    /// Numeric type of the coordinates.
    type Num: Num + Copy + PartialOrd + Scalar;

    /// X coordinate.
    fn x(&self) -> Self::Num;
    /// Y coordinate.
    fn y(&self) -> Self::Num;

    /// Vector from `other` to `self`.
    fn sub(&self, other: &impl CartesianPoint2d<Num = Self::Num>) -> Vector2<Self::Num> {
        Vector2::new(self.x() - other.x(), self.y() - other.y())
    }

    /// Squared euclidean distance between the points.
    fn distance_sq(&self, other: &impl CartesianPoint2d<Num = Self::Num>) -> Self::Num {
        let v = self.sub(other);
        v.x * v.x + v.y * v.y
    }
}

/// Float version of [`CartesianPoint2d`].
pub trait CartesianPoint2dFloat<N: Float = f64>: CartesianPoint2d<Num = N> {
    /// Euclidean distance between the points.
    fn distance(&self, other: &impl CartesianPoint2d<Num = N>) -> N {
        self.distance_sq(other).sqrt()
    }
}

impl<N: Float + Scalar, T: CartesianPoint2d<Num = N>> CartesianPoint2dFloat<N> for T {}

impl<N: Num + Copy + PartialOrd + Scalar> CartesianPoint2d for Point2<N> {
    type Num = N;

    fn x(&self) -> N {
        self.x
    }

    fn y(&self) -> N {
        self.y
    }
}

/// Immutable coordinate pair in a geographic (`x` = longitude, `y` = latitude) or projected frame.
///
/// Serialized as a plain `[x, y]` number pair.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    /// X coordinate (or longitude).
    pub x: f64,
    /// Y coordinate (or latitude).
    pub y: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns a copy of the coordinate moved by the given offsets.
    pub fn add(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// The coordinate as a GeoJSON position.
    pub fn to_position(&self) -> Vec<f64> {
        vec![self.x, self.y]
    }
}

impl CartesianPoint2d for Coordinate {
    type Num = f64;

    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(value: Coordinate) -> Self {
        [value.x, value.y]
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Converts a sequence of coordinates into GeoJSON positions.
pub(crate) fn to_positions(coordinates: &[Coordinate]) -> Vec<Vec<f64>> {
    coordinates.iter().map(Coordinate::to_position).collect()
}

/// Converts a ring into GeoJSON positions, repeating the first vertex at the end if the ring is not
/// closed yet.
pub(crate) fn to_closed_ring(ring: &[Coordinate]) -> Vec<Vec<f64>> {
    let mut positions = to_positions(ring);
    if let (Some(first), Some(last)) = (ring.first(), ring.last()) {
        if ring.len() > 1 && first != last {
            positions.push(first.to_position());
        }
    }

    positions
}

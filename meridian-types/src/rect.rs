//! Axis-aligned rectangles: map [`Extent`]s and screen-space marker boxes.

use crate::coordinate::{CartesianPoint2d, Coordinate};
use nalgebra::Scalar;
use num_traits::{Float, Num};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect<N = f64> {
    x_min: N,
    y_min: N,
    x_max: N,
    y_max: N,
}

/// Bounding box of a geometry in map coordinates.
pub type Extent = Rect<f64>;

impl<N: Num + Copy + PartialOrd + Scalar> Rect<N> {
    /// Creates a new rectangle. The caller is responsible for `min <= max`.
    pub fn new(x_min: N, y_min: N, x_max: N, y_max: N) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Rectangle spanning two opposite corners given in any order.
    pub fn from_corners(
        a: &impl CartesianPoint2d<Num = N>,
        b: &impl CartesianPoint2d<Num = N>,
    ) -> Self {
        let (x_min, x_max) = min_max(a.x(), b.x());
        let (y_min, y_max) = min_max(a.y(), b.y());
        Self::new(x_min, y_min, x_max, y_max)
    }

    /// Smallest rectangle containing all the points. `None` for an empty iterator.
    pub fn from_points<'a, P: CartesianPoint2d<Num = N> + 'a>(
        mut points: impl Iterator<Item = &'a P>,
    ) -> Option<Self> {
        let first = points.next()?;
        let mut rect = Self::new(first.x(), first.y(), first.x(), first.y());

        for p in points {
            if rect.x_min > p.x() {
                rect.x_min = p.x();
            }
            if rect.y_min > p.y() {
                rect.y_min = p.y();
            }
            if rect.x_max < p.x() {
                rect.x_max = p.x();
            }
            if rect.y_max < p.y() {
                rect.y_max = p.y();
            }
        }

        Some(rect)
    }

    /// Minimum x.
    pub fn x_min(&self) -> N {
        self.x_min
    }

    /// Maximum x.
    pub fn x_max(&self) -> N {
        self.x_max
    }

    /// Minimum y.
    pub fn y_min(&self) -> N {
        self.y_min
    }

    /// Maximum y.
    pub fn y_max(&self) -> N {
        self.y_max
    }

    /// Width of the rectangle.
    pub fn width(&self) -> N {
        self.x_max - self.x_min
    }

    /// Height of the rectangle.
    pub fn height(&self) -> N {
        self.y_max - self.y_min
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn merge(&self, other: Self) -> Self {
        Self {
            x_min: min_max(self.x_min, other.x_min).0,
            y_min: min_max(self.y_min, other.y_min).0,
            x_max: min_max(self.x_max, other.x_max).1,
            y_max: min_max(self.y_max, other.y_max).1,
        }
    }

    /// Returns true if the point is inside the rectangle or on its border.
    pub fn contains(&self, point: &impl CartesianPoint2d<Num = N>) -> bool {
        self.x_min <= point.x()
            && self.x_max >= point.x()
            && self.y_min <= point.y()
            && self.y_max >= point.y()
    }

    /// Grows the rectangle by `amount` on every side.
    pub fn expand(&self, amount: N) -> Self {
        Self {
            x_min: self.x_min - amount,
            x_max: self.x_max + amount,
            y_min: self.y_min - amount,
            y_max: self.y_max + amount,
        }
    }
}

impl<N: Float + Scalar> Rect<N> {
    /// Center of the rectangle.
    pub fn center(&self) -> [N; 2] {
        let two = N::one() + N::one();
        [
            (self.x_min + self.x_max) / two,
            (self.y_min + self.y_max) / two,
        ]
    }
}

impl Extent {
    /// Center of the extent as a coordinate.
    pub fn center_coordinate(&self) -> Coordinate {
        self.center().into()
    }
}

fn min_max<N: PartialOrd>(a: N, b: N) -> (N, N) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    #[test]
    fn corners_are_normalized() {
        let extent = Extent::from_corners(&Coordinate::new(2.0, -1.0), &Coordinate::new(-2.0, 1.0));
        assert_eq!(extent, Extent::new(-2.0, -1.0, 2.0, 1.0));
        assert_eq!(extent.width(), 4.0);
        assert_eq!(extent.height(), 2.0);
        assert_eq!(extent.center_coordinate(), Coordinate::new(0.0, 0.0));
    }

    #[test]
    fn from_points_and_merge() {
        let points = [Point2::new(1.0, 5.0), Point2::new(-3.0, 2.0), Point2::new(0.0, 7.0)];
        let rect = Rect::from_points(points.iter()).unwrap();
        assert_eq!(rect, Rect::new(-3.0, 2.0, 1.0, 7.0));
        assert!(Rect::<f64>::from_points(std::iter::empty::<&Point2<f64>>()).is_none());

        let merged = rect.merge(Rect::new(0.0, 0.0, 10.0, 3.0));
        assert_eq!(merged, Rect::new(-3.0, 0.0, 10.0, 7.0));
        assert!(merged.contains(&Point2::new(10.0, 0.0)));
        assert!(!merged.contains(&Point2::new(10.1, 0.0)));
    }
}

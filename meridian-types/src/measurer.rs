//! [`Measurer`] abstracts how planar offsets and distances map onto a coordinate frame.

use crate::coordinate::{CartesianPoint2dFloat, Coordinate};
use crate::datum::Datum;
use std::fmt::Debug;

/// Computes positions, distances and areas in some coordinate frame.
///
/// Offsets and results are expressed in the measurer's length unit: the coordinate unit for
/// [`PlanarMeasurer`], meters for [`SphereMeasurer`].
pub trait Measurer: Debug + Send + Sync {
    /// Returns the coordinate found by moving `dx` along the x axis (east) and `dy` along the y axis
    /// (north) from `coordinate`.
    fn locate(&self, coordinate: &Coordinate, dx: f64, dy: f64) -> Coordinate;

    /// Distance between two coordinates.
    fn distance(&self, a: &Coordinate, b: &Coordinate) -> f64;

    /// Length of the line going through the coordinates. If `closed` is set, the segment from the last
    /// vertex back to the first one is included.
    fn measure_length(&self, coordinates: &[Coordinate], closed: bool) -> f64 {
        let mut length: f64 = coordinates
            .windows(2)
            .map(|pair| self.distance(&pair[0], &pair[1]))
            .sum();
        if closed && coordinates.len() > 2 {
            if let (Some(first), Some(last)) = (coordinates.first(), coordinates.last()) {
                length += self.distance(last, first);
            }
        }

        length
    }

    /// Area enclosed by the ring. Orientation does not matter.
    fn measure_area(&self, ring: &[Coordinate]) -> f64;
}

/// Measurer for projected (cartesian) coordinates. Offsets are added to the coordinates as is.
#[derive(Debug, Default, Copy, Clone)]
pub struct PlanarMeasurer;

impl Measurer for PlanarMeasurer {
    fn locate(&self, coordinate: &Coordinate, dx: f64, dy: f64) -> Coordinate {
        coordinate.add(dx, dy)
    }

    fn distance(&self, a: &Coordinate, b: &Coordinate) -> f64 {
        a.distance(b)
    }

    fn measure_area(&self, ring: &[Coordinate]) -> f64 {
        if ring.len() < 3 {
            return 0.0;
        }

        let mut area = 0.0;
        let mut prev = ring[ring.len() - 1];
        for p in ring {
            area += prev.x * p.y - p.x * prev.y;
            prev = *p;
        }

        (area / 2.0).abs()
    }
}

/// Geodesic measurer on a sphere with the datum's mean radius. Coordinates are longitude
/// and latitude in degrees, offsets and distances are in meters.
#[derive(Debug, Default, Copy, Clone)]
pub struct SphereMeasurer {
    datum: Datum,
}

impl SphereMeasurer {
    /// Creates a new measurer for the datum.
    pub fn new(datum: Datum) -> Self {
        Self { datum }
    }

    /// Radius of the sphere in meters.
    pub fn radius(&self) -> f64 {
        self.datum.mean_radius()
    }
}

impl Measurer for SphereMeasurer {
    fn locate(&self, coordinate: &Coordinate, dx: f64, dy: f64) -> Coordinate {
        let radius = self.radius();
        let lat = coordinate.y + (dy / radius).to_degrees();
        let cos_lat = coordinate.y.to_radians().cos();
        let lon = if cos_lat.abs() < f64::EPSILON {
            coordinate.x
        } else {
            coordinate.x + (dx / (radius * cos_lat)).to_degrees()
        };

        Coordinate::new(lon, lat)
    }

    fn distance(&self, a: &Coordinate, b: &Coordinate) -> f64 {
        let lat1 = a.y.to_radians();
        let lat2 = b.y.to_radians();
        let d_lat = lat2 - lat1;
        let d_lon = (b.x - a.x).to_radians();

        let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * self.radius() * h.sqrt().min(1.0).asin()
    }

    fn measure_area(&self, ring: &[Coordinate]) -> f64 {
        if ring.len() < 3 {
            return 0.0;
        }

        let radius = self.radius();
        let mut area = 0.0;
        let mut prev = ring[ring.len() - 1];
        for p in ring {
            area += (p.x - prev.x).to_radians()
                * (2.0 + prev.y.to_radians().sin() + p.y.to_radians().sin());
            prev = *p;
        }

        (area * radius * radius / 2.0).abs()
    }
}

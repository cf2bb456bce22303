//! Projections from geometry coordinates into the map (projected) plane.

use crate::coordinate::Coordinate;
use crate::datum::Datum;
use std::fmt::Debug;

/// Converts coordinates between two coordinate frames.
pub trait Projection: Debug + Send + Sync {
    /// Projects a coordinate. Returns `None` if the coordinate cannot be projected.
    fn project(&self, input: &Coordinate) -> Option<Coordinate>;
    /// Inverse of [`Projection::project`].
    fn unproject(&self, input: &Coordinate) -> Option<Coordinate>;
}

/// Projection that returns its input. Used when geometries are already in the map frame.
#[derive(Debug, Default, Copy, Clone)]
pub struct IdentityProjection;

impl Projection for IdentityProjection {
    fn project(&self, input: &Coordinate) -> Option<Coordinate> {
        Some(*input)
    }

    fn unproject(&self, input: &Coordinate) -> Option<Coordinate> {
        Some(*input)
    }
}

/// Spherical Web Mercator (EPSG:3857) projection of longitude/latitude degrees into meters.
#[derive(Debug, Default, Copy, Clone)]
pub struct WebMercator {
    datum: Datum,
}

impl WebMercator {
    /// Creates a new projection for the datum.
    pub fn new(datum: Datum) -> Self {
        Self { datum }
    }
}

impl Projection for WebMercator {
    fn project(&self, input: &Coordinate) -> Option<Coordinate> {
        let x = self.datum.semimajor() * input.x.to_radians();
        let y = self.datum.semimajor()
            * (std::f64::consts::FRAC_PI_4 + input.y.to_radians() / 2.0)
                .tan()
                .ln();

        if x.is_finite() && y.is_finite() {
            Some(Coordinate::new(x, y))
        } else {
            None
        }
    }

    fn unproject(&self, input: &Coordinate) -> Option<Coordinate> {
        let lat = std::f64::consts::FRAC_PI_2
            - 2.0 * (-input.y / self.datum.semimajor()).exp().atan();
        let lon = input.x / self.datum.semimajor();

        Some(Coordinate::new(lon.to_degrees(), lat.to_degrees()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn web_mercator_round_trip() {
        let projection = WebMercator::default();
        let input = Coordinate::new(37.6, 55.75);
        let projected = projection.project(&input).unwrap();
        let back = projection.unproject(&projected).unwrap();

        assert_relative_eq!(back.x, input.x, epsilon = 1e-9);
        assert_relative_eq!(back.y, input.y, epsilon = 1e-9);
    }

    #[test]
    fn web_mercator_rejects_invalid_latitude() {
        assert!(WebMercator::default()
            .project(&Coordinate::new(0.0, 120.0))
            .is_none());
        assert!(WebMercator::default()
            .project(&Coordinate::new(f64::NAN, 0.0))
            .is_none());
    }
}

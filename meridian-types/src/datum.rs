/// Reference ellipsoid given by its semimajor axis and inverse flattening.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Datum {
    semimajor: f64,
    inv_flattening: f64,
}

impl Datum {
    /// WGS84 ellipsoid.
    pub const WGS84: Self = Self::new(6_378_137.0, 298.257223563);

    /// Creates an ellipsoid. `inv_flattening` of `f64::INFINITY` describes a sphere.
    pub const fn new(semimajor: f64, inv_flattening: f64) -> Self {
        Self {
            semimajor,
            inv_flattening,
        }
    }

    /// Equatorial radius in meters.
    pub fn semimajor(&self) -> f64 {
        self.semimajor
    }

    /// Polar radius in meters.
    pub fn semiminor(&self) -> f64 {
        self.semimajor * (1.0 - 1.0 / self.inv_flattening)
    }

    /// Mean radius `(2a + b) / 3`, the radius of the sphere used for geodesic approximations.
    pub fn mean_radius(&self) -> f64 {
        (2.0 * self.semimajor + self.semiminor()) / 3.0
    }
}

impl Default for Datum {
    fn default() -> Self {
        Self::WGS84
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn wgs84_radii() {
        let datum = Datum::WGS84;
        assert_relative_eq!(datum.semiminor(), 6_356_752.314245, epsilon = 1e-3);
        assert_relative_eq!(datum.mean_radius(), 6_371_008.771415, epsilon = 1e-3);
    }

    #[test]
    fn sphere_has_equal_radii() {
        let sphere = Datum::new(1000.0, f64::INFINITY);
        assert_eq!(sphere.semiminor(), 1000.0);
        assert_eq!(sphere.mean_radius(), 1000.0);
    }
}

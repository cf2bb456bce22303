use crate::config::GeometryConfig;
use crate::coordinate::Coordinate;
use crate::geometry::{Geometry, GeometryBase};
use crate::measurer::Measurer;
use crate::rect::Extent;

/// Single point geometry.
#[derive(Debug, Clone)]
pub struct Point {
    base: GeometryBase,
    coordinate: Coordinate,
}

impl Point {
    /// Creates a new point.
    pub fn new(coordinate: impl Into<Coordinate>, config: GeometryConfig) -> Self {
        Self {
            base: GeometryBase::new(config),
            coordinate: coordinate.into(),
        }
    }

    /// Position of the point.
    pub fn coordinates(&self) -> Coordinate {
        self.coordinate
    }

    /// Moves the point.
    pub fn set_coordinates(&mut self, coordinate: impl Into<Coordinate>) -> &mut Self {
        self.coordinate = coordinate.into();
        self.on_shape_changed();
        self
    }
}

impl Geometry for Point {
    fn geometry_type(&self) -> &'static str {
        "Point"
    }

    fn base(&self) -> &GeometryBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut GeometryBase {
        &mut self.base
    }

    fn compute_extent(&self, measurer: Option<&dyn Measurer>) -> Option<Extent> {
        measurer?;
        Some(Extent::from_corners(&self.coordinate, &self.coordinate))
    }

    fn geodesic_length(&self) -> f64 {
        0.0
    }

    fn geodesic_area(&self) -> f64 {
        0.0
    }

    fn center(&self) -> Option<Coordinate> {
        Some(self.coordinate)
    }

    fn vertices(&self) -> Vec<Coordinate> {
        vec![self.coordinate]
    }

    fn to_geojson_geometry(&self) -> geojson::Geometry {
        geojson::Geometry::new(geojson::Value::Point(self.coordinate.to_position()))
    }
}

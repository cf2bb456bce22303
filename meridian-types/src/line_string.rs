use crate::config::GeometryConfig;
use crate::coordinate::{to_positions, Coordinate};
use crate::geometry::{average, Geometry, GeometryBase};
use crate::measurer::Measurer;
use crate::rect::Extent;

/// Open polyline.
#[derive(Debug, Clone)]
pub struct LineString {
    base: GeometryBase,
    coordinates: Vec<Coordinate>,
}

impl LineString {
    /// Creates a new line.
    pub fn new(coordinates: Vec<Coordinate>, config: GeometryConfig) -> Self {
        Self {
            base: GeometryBase::new(config),
            coordinates,
        }
    }

    /// Vertices of the line.
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    /// Replaces the vertices of the line.
    pub fn set_coordinates(&mut self, coordinates: Vec<Coordinate>) -> &mut Self {
        self.coordinates = coordinates;
        self.on_shape_changed();
        self
    }
}

impl Geometry for LineString {
    fn geometry_type(&self) -> &'static str {
        "LineString"
    }

    fn base(&self) -> &GeometryBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut GeometryBase {
        &mut self.base
    }

    fn compute_extent(&self, measurer: Option<&dyn Measurer>) -> Option<Extent> {
        measurer?;
        Extent::from_points(self.coordinates.iter())
    }

    fn geodesic_length(&self) -> f64 {
        self.config()
            .measurer()
            .map(|m| m.measure_length(&self.coordinates, false))
            .unwrap_or(0.0)
    }

    fn geodesic_area(&self) -> f64 {
        0.0
    }

    fn center(&self) -> Option<Coordinate> {
        average(&self.coordinates)
    }

    fn vertices(&self) -> Vec<Coordinate> {
        self.coordinates.clone()
    }

    fn to_geojson_geometry(&self) -> geojson::Geometry {
        geojson::Geometry::new(geojson::Value::LineString(to_positions(&self.coordinates)))
    }
}

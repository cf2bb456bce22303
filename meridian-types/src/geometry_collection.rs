use crate::config::GeometryConfig;
use crate::coordinate::Coordinate;
use crate::geom::Geom;
use crate::geometry::{average, Geometry, GeometryBase};
use crate::measurer::Measurer;
use crate::rect::Extent;

/// Collection of geometries of any type.
#[derive(Debug, Clone)]
pub struct GeometryCollection {
    base: GeometryBase,
    geometries: Vec<Geom>,
}

impl GeometryCollection {
    /// Creates a new collection.
    pub fn new(geometries: Vec<Geom>, config: GeometryConfig) -> Self {
        Self {
            base: GeometryBase::new(config),
            geometries,
        }
    }

    /// Members of the collection.
    pub fn geometries(&self) -> &[Geom] {
        &self.geometries
    }

    /// Replaces the members of the collection.
    pub fn set_geometries(&mut self, geometries: Vec<Geom>) -> &mut Self {
        self.geometries = geometries;
        self.on_shape_changed();
        self
    }
}

impl Geometry for GeometryCollection {
    fn geometry_type(&self) -> &'static str {
        "GeometryCollection"
    }

    fn base(&self) -> &GeometryBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut GeometryBase {
        &mut self.base
    }

    fn compute_extent(&self, measurer: Option<&dyn Measurer>) -> Option<Extent> {
        self.geometries
            .iter()
            .filter_map(|g| g.compute_extent(measurer))
            .reduce(|a, b| a.merge(b))
    }

    fn geodesic_length(&self) -> f64 {
        self.geometries.iter().map(Geometry::geodesic_length).sum()
    }

    fn geodesic_area(&self) -> f64 {
        self.geometries.iter().map(Geometry::geodesic_area).sum()
    }

    fn center(&self) -> Option<Coordinate> {
        let centers: Vec<_> = self.geometries.iter().filter_map(Geometry::center).collect();
        average(&centers)
    }

    fn vertices(&self) -> Vec<Coordinate> {
        self.geometries.iter().flat_map(Geometry::vertices).collect()
    }

    fn to_geojson_geometry(&self) -> geojson::Geometry {
        geojson::Geometry::new(geojson::Value::GeometryCollection(
            self.geometries
                .iter()
                .map(Geometry::to_geojson_geometry)
                .collect(),
        ))
    }
}

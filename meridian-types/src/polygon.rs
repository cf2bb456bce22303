use crate::config::GeometryConfig;
use crate::coordinate::{to_closed_ring, Coordinate};
use crate::geometry::{average, Geometry, GeometryBase};
use crate::measurer::Measurer;
use crate::rect::Extent;

/// Polygon with an outer shell and optional holes.
#[derive(Debug, Clone)]
pub struct Polygon {
    base: GeometryBase,
    shell: Vec<Coordinate>,
    holes: Vec<Vec<Coordinate>>,
}

impl Polygon {
    /// Creates a polygon from its rings. The first ring is the shell, the rest are holes.
    pub fn new(rings: Vec<Vec<Coordinate>>, config: GeometryConfig) -> Self {
        let (shell, holes) = split_rings(rings);
        Self {
            base: GeometryBase::new(config),
            shell,
            holes,
        }
    }

    /// Outer ring.
    pub fn shell(&self) -> &[Coordinate] {
        &self.shell
    }

    /// Inner rings.
    pub fn holes(&self) -> &[Vec<Coordinate>] {
        &self.holes
    }

    /// All rings, shell first.
    pub fn coordinates(&self) -> Vec<Vec<Coordinate>> {
        let mut rings = Vec::with_capacity(self.holes.len() + 1);
        rings.push(self.shell.clone());
        rings.extend(self.holes.iter().cloned());
        rings
    }

    /// Replaces all rings of the polygon.
    pub fn set_coordinates(&mut self, rings: Vec<Vec<Coordinate>>) -> &mut Self {
        (self.shell, self.holes) = split_rings(rings);
        self.on_shape_changed();
        self
    }
}

fn split_rings(rings: Vec<Vec<Coordinate>>) -> (Vec<Coordinate>, Vec<Vec<Coordinate>>) {
    let mut rings = rings.into_iter();
    let shell = rings.next().unwrap_or_default();
    (shell, rings.collect())
}

impl Geometry for Polygon {
    fn geometry_type(&self) -> &'static str {
        "Polygon"
    }

    fn base(&self) -> &GeometryBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut GeometryBase {
        &mut self.base
    }

    fn compute_extent(&self, measurer: Option<&dyn Measurer>) -> Option<Extent> {
        measurer?;
        Extent::from_points(self.shell.iter())
    }

    fn geodesic_length(&self) -> f64 {
        self.config()
            .measurer()
            .map(|m| m.measure_length(&self.shell, true))
            .unwrap_or(0.0)
    }

    fn geodesic_area(&self) -> f64 {
        let Some(measurer) = self.config().measurer() else {
            return 0.0;
        };

        let holes: f64 = self.holes.iter().map(|h| measurer.measure_area(h)).sum();
        (measurer.measure_area(&self.shell) - holes).max(0.0)
    }

    fn center(&self) -> Option<Coordinate> {
        average(&self.shell)
    }

    fn vertices(&self) -> Vec<Coordinate> {
        self.shell.clone()
    }

    fn to_geojson_geometry(&self) -> geojson::Geometry {
        let mut rings = vec![to_closed_ring(&self.shell)];
        rings.extend(self.holes.iter().map(|h| to_closed_ring(h)));
        geojson::Geometry::new(geojson::Value::Polygon(rings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Coordinate> {
        vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(4.0, 0.0),
            Coordinate::new(4.0, 4.0),
            Coordinate::new(0.0, 4.0),
        ]
    }

    #[test]
    fn area_subtracts_holes() {
        let hole = vec![
            Coordinate::new(1.0, 1.0),
            Coordinate::new(2.0, 1.0),
            Coordinate::new(2.0, 2.0),
            Coordinate::new(1.0, 2.0),
        ];
        let polygon = Polygon::new(vec![square(), hole], GeometryConfig::default());
        assert_eq!(polygon.geodesic_area(), 15.0);
        assert_eq!(polygon.geodesic_length(), 16.0);
        assert_eq!(polygon.center(), Some(Coordinate::new(2.0, 2.0)));
    }

    #[test]
    fn set_coordinates_invalidates_extent() {
        let mut polygon = Polygon::new(vec![square()], GeometryConfig::default());
        assert_eq!(polygon.extent(), Some(Extent::new(0.0, 0.0, 4.0, 4.0)));

        polygon.set_coordinates(vec![vec![
            Coordinate::new(-1.0, -1.0),
            Coordinate::new(1.0, -1.0),
            Coordinate::new(1.0, 1.0),
        ]]);
        assert_eq!(polygon.extent(), Some(Extent::new(-1.0, -1.0, 1.0, 1.0)));
        assert_eq!(polygon.base().version(), 1);
    }

    #[test]
    fn geojson_rings_are_closed() {
        let polygon = Polygon::new(vec![square()], GeometryConfig::default());
        let geojson::Value::Polygon(rings) = polygon.to_geojson_geometry().value else {
            panic!("expected polygon");
        };
        assert_eq!(rings[0].len(), 5);
        assert_eq!(rings[0][0], rings[0][4]);
    }
}

//! Typed geometry collections: [`MultiPoint`], [`MultiLineString`] and [`MultiPolygon`].
//!
//! All three are instances of [`MultiGeometry<E>`], which holds an ordered list of elements of a single
//! type `E`. The coordinates of a collection are the list of its elements' coordinates, so nesting depth
//! of the coordinates grows by one compared to the element type.

use crate::config::GeometryConfig;
use crate::coordinate::{to_closed_ring, to_positions, Coordinate};
use crate::error::GeometryError;
use crate::geom::Geom;
use crate::geometry::{average, Geometry, GeometryBase};
use crate::line_string::LineString;
use crate::measurer::Measurer;
use crate::point::Point;
use crate::polygon::Polygon;
use crate::rect::Extent;
use std::fmt::Debug;

/// Geometry that can be an element of a [`MultiGeometry`].
pub trait CollectionElement: Geometry + Sized {
    /// Coordinates of a single element.
    type Coords: Clone + Debug;

    /// Name of the element type.
    const NAME: &'static str;

    /// Type name of the collection of such elements.
    const COLLECTION_TYPE: &'static str;

    /// Constructs an element from its coordinates.
    fn from_coordinates(coordinates: Self::Coords, config: GeometryConfig) -> Self;

    /// Coordinates of the element.
    fn element_coordinates(&self) -> Self::Coords;

    /// Returns true if the geometry is of the element type.
    fn accepts(geometry: &Geom) -> bool;

    /// Extracts the element from the geometry, returning the geometry back if it has a different type.
    fn try_from_geom(geometry: Geom) -> Result<Self, Geom>;

    /// GeoJSON value of a collection with the given element coordinates.
    fn collection_value(coordinates: &[Self::Coords]) -> geojson::Value;
}

/// Input of a collection: either raw element coordinates or already constructed elements.
#[derive(Debug, Clone)]
pub enum CollectionInput<E: CollectionElement> {
    /// One entry per element; each is turned into an element with the collection's configuration.
    Coordinates(Vec<E::Coords>),
    /// Elements used as is.
    Geometries(Vec<E>),
}

/// Collection of geometries of type `E`.
#[derive(Debug, Clone)]
pub struct MultiGeometry<E> {
    base: GeometryBase,
    geometries: Vec<E>,
}

/// Collection of points.
pub type MultiPoint = MultiGeometry<Point>;
/// Collection of lines.
pub type MultiLineString = MultiGeometry<LineString>;
/// Collection of polygons.
pub type MultiPolygon = MultiGeometry<Polygon>;

impl<E: CollectionElement> MultiGeometry<E> {
    /// Creates a new collection.
    pub fn new(input: CollectionInput<E>, config: GeometryConfig) -> Self {
        let mut collection = Self {
            base: GeometryBase::new(config),
            geometries: vec![],
        };
        collection.geometries = match input {
            CollectionInput::Coordinates(coordinates) => collection.build_elements(coordinates),
            CollectionInput::Geometries(geometries) => geometries,
        };

        collection
    }

    /// Creates an empty collection.
    pub fn empty(config: GeometryConfig) -> Self {
        Self::new(CollectionInput::Geometries(vec![]), config)
    }

    /// Elements of the collection.
    pub fn geometries(&self) -> &[E] {
        &self.geometries
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    /// Returns true if the collection has no elements.
    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    /// Coordinates of every element, in order.
    pub fn coordinates(&self) -> Vec<E::Coords> {
        self.geometries
            .iter()
            .map(CollectionElement::element_coordinates)
            .collect()
    }

    /// Replaces all elements with new ones built from `coordinates`. An empty input leaves an empty
    /// collection.
    pub fn set_coordinates(&mut self, coordinates: Vec<E::Coords>) -> &mut Self {
        let geometries = self.build_elements(coordinates);
        self.set_elements(geometries)
    }

    /// Replaces all elements.
    pub fn set_elements(&mut self, geometries: Vec<E>) -> &mut Self {
        self.geometries = geometries;
        self.on_shape_changed();
        self
    }

    /// Replaces all elements with the given geometries.
    ///
    /// Fails without modifying the collection if any of the geometries is not of type `E`.
    pub fn set_geometries(&mut self, geometries: Vec<Geom>) -> Result<&mut Self, GeometryError> {
        Self::check_geometries(&geometries)?;
        let geometries = geometries
            .into_iter()
            .enumerate()
            .map(|(index, geometry)| {
                E::try_from_geom(geometry).map_err(|_| invalid_element::<E>(index))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(self.set_elements(geometries))
    }

    /// Checks that every geometry is of the element type. The error names the first offending index.
    pub fn check_geometries(geometries: &[Geom]) -> Result<(), GeometryError> {
        match geometries.iter().position(|g| !E::accepts(g)) {
            Some(index) => Err(invalid_element::<E>(index)),
            None => Ok(()),
        }
    }

    fn build_elements(&self, coordinates: Vec<E::Coords>) -> Vec<E> {
        coordinates
            .into_iter()
            .map(|c| E::from_coordinates(c, self.base.config().clone()))
            .collect()
    }
}

fn invalid_element<E: CollectionElement>(index: usize) -> GeometryError {
    GeometryError::InvalidCollectionElement {
        index,
        expected: E::NAME,
    }
}

impl<E: CollectionElement> Geometry for MultiGeometry<E> {
    fn geometry_type(&self) -> &'static str {
        E::COLLECTION_TYPE
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
        geojson::Geometry::new(E::collection_value(&self.coordinates()))
    }
}

impl CollectionElement for Point {
    type Coords = Coordinate;
    const NAME: &'static str = "Point";
    const COLLECTION_TYPE: &'static str = "MultiPoint";

    fn from_coordinates(coordinates: Coordinate, config: GeometryConfig) -> Self {
        Point::new(coordinates, config)
    }

    fn element_coordinates(&self) -> Coordinate {
        self.coordinates()
    }

    fn accepts(geometry: &Geom) -> bool {
        matches!(geometry, Geom::Point(_))
    }

    fn try_from_geom(geometry: Geom) -> Result<Self, Geom> {
        match geometry {
            Geom::Point(p) => Ok(p),
            other => Err(other),
        }
    }

    fn collection_value(coordinates: &[Coordinate]) -> geojson::Value {
        geojson::Value::MultiPoint(to_positions(coordinates))
    }
}

impl CollectionElement for LineString {
    type Coords = Vec<Coordinate>;
    const NAME: &'static str = "LineString";
    const COLLECTION_TYPE: &'static str = "MultiLineString";

    fn from_coordinates(coordinates: Vec<Coordinate>, config: GeometryConfig) -> Self {
        LineString::new(coordinates, config)
    }

    fn element_coordinates(&self) -> Vec<Coordinate> {
        self.coordinates().to_vec()
    }

    fn accepts(geometry: &Geom) -> bool {
        matches!(geometry, Geom::LineString(_))
    }

    fn try_from_geom(geometry: Geom) -> Result<Self, Geom> {
        match geometry {
            Geom::LineString(l) => Ok(l),
            other => Err(other),
        }
    }

    fn collection_value(coordinates: &[Vec<Coordinate>]) -> geojson::Value {
        geojson::Value::MultiLineString(coordinates.iter().map(|l| to_positions(l)).collect())
    }
}

impl CollectionElement for Polygon {
    type Coords = Vec<Vec<Coordinate>>;
    const NAME: &'static str = "Polygon";
    const COLLECTION_TYPE: &'static str = "MultiPolygon";

    fn from_coordinates(coordinates: Vec<Vec<Coordinate>>, config: GeometryConfig) -> Self {
        Polygon::new(coordinates, config)
    }

    fn element_coordinates(&self) -> Vec<Vec<Coordinate>> {
        self.coordinates()
    }

    fn accepts(geometry: &Geom) -> bool {
        matches!(geometry, Geom::Polygon(_))
    }

    fn try_from_geom(geometry: Geom) -> Result<Self, Geom> {
        match geometry {
            Geom::Polygon(p) => Ok(p),
            other => Err(other),
        }
    }

    fn collection_value(coordinates: &[Vec<Vec<Coordinate>>]) -> geojson::Value {
        geojson::Value::MultiPolygon(
            coordinates
                .iter()
                .map(|rings| rings.iter().map(|r| to_closed_ring(r)).collect())
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circle::Circle;
    use assert_matches::assert_matches;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn multi_point() -> MultiPoint {
        MultiPoint::new(
            CollectionInput::Coordinates(vec![c(0.0, 0.0), c(1.0, 1.0)]),
            GeometryConfig::default(),
        )
    }

    #[test]
    fn set_coordinates_builds_elements() {
        let mut points = MultiPoint::empty(GeometryConfig::default());
        points.set_coordinates(vec![c(0.0, 0.0), c(1.0, 1.0)]);

        assert_eq!(points.len(), 2);
        assert_eq!(points.geometries()[1].coordinates(), c(1.0, 1.0));
        assert_eq!(points.coordinates(), vec![c(0.0, 0.0), c(1.0, 1.0)]);
    }

    #[test]
    fn set_empty_coordinates_clears_collection() {
        let mut points = multi_point();
        points.set_coordinates(vec![]);
        assert!(points.is_empty());
        assert_eq!(points.coordinates(), Vec::<Coordinate>::new());
    }

    #[test]
    fn elements_share_collection_config() {
        let config = GeometryConfig::default().with_shell_points(7).without_measurer();
        let lines = MultiLineString::new(
            CollectionInput::Coordinates(vec![vec![c(0.0, 0.0), c(3.0, 4.0)]]),
            config,
        );
        assert_eq!(lines.geometries()[0].config().shell_points(), 7);
        assert_eq!(lines.geodesic_length(), 0.0);
        assert_eq!(lines.extent(), None);
    }

    #[test]
    fn construct_from_geometries() {
        let config = GeometryConfig::default();
        let points = MultiPoint::new(
            CollectionInput::Geometries(vec![
                Point::new(c(5.0, 5.0), config.clone()),
                Point::new(c(-1.0, 2.0), config.clone()),
            ]),
            config,
        );
        assert_eq!(points.coordinates(), vec![c(5.0, 5.0), c(-1.0, 2.0)]);
        assert_eq!(points.extent(), Some(Extent::new(-1.0, 2.0, 5.0, 5.0)));
        assert_eq!(points.center(), Some(c(2.0, 3.5)));
    }

    #[test]
    fn wrong_element_type_is_rejected_without_mutation() {
        let config = GeometryConfig::default();
        let mut points = multi_point();

        let result = points.set_geometries(vec![
            Geom::Point(Point::new(c(7.0, 7.0), config.clone())),
            Geom::Circle(Circle::new(c(0.0, 0.0), 1.0, config.clone())),
        ]);
        assert_matches!(
            result,
            Err(GeometryError::InvalidCollectionElement {
                index: 1,
                expected: "Point"
            })
        );
        assert_eq!(points.coordinates(), vec![c(0.0, 0.0), c(1.0, 1.0)]);
        assert_eq!(points.base().version(), 0);

        points
            .set_geometries(vec![Geom::Point(Point::new(c(7.0, 7.0), config))])
            .unwrap();
        assert_eq!(points.coordinates(), vec![c(7.0, 7.0)]);
        assert_eq!(points.base().version(), 1);
    }

    #[test]
    fn check_geometries_reports_first_offender() {
        let config = GeometryConfig::default();
        let geometries = vec![
            Geom::LineString(LineString::new(vec![], config.clone())),
            Geom::Point(Point::new(c(0.0, 0.0), config.clone())),
            Geom::Point(Point::new(c(0.0, 0.0), config)),
        ];
        assert_matches!(
            MultiLineString::check_geometries(&geometries),
            Err(GeometryError::InvalidCollectionElement { index: 1, .. })
        );
    }

    #[test]
    fn geojson_export() {
        let geometry = multi_point().to_geojson_geometry();
        assert_eq!(
            geometry.value,
            geojson::Value::MultiPoint(vec![vec![0.0, 0.0], vec![1.0, 1.0]])
        );

        let polygons = MultiPolygon::new(
            CollectionInput::Coordinates(vec![vec![vec![c(0.0, 0.0), c(1.0, 0.0), c(1.0, 1.0)]]]),
            GeometryConfig::default(),
        );
        assert_eq!(polygons.geometry_type(), "MultiPolygon");
        let geojson::Value::MultiPolygon(value) = polygons.to_geojson_geometry().value else {
            panic!("expected multipolygon");
        };
        assert_eq!(value[0][0].len(), 4);
    }

    #[test]
    fn metrics_are_summed() {
        let polygons = MultiPolygon::new(
            CollectionInput::Coordinates(vec![
                vec![vec![c(0.0, 0.0), c(2.0, 0.0), c(2.0, 2.0), c(0.0, 2.0)]],
                vec![vec![c(5.0, 5.0), c(6.0, 5.0), c(6.0, 6.0), c(5.0, 6.0)]],
            ]),
            GeometryConfig::default(),
        );
        assert_eq!(polygons.geodesic_area(), 5.0);
        assert_eq!(polygons.geodesic_length(), 12.0);
        assert_eq!(polygons.extent(), Some(Extent::new(0.0, 0.0, 6.0, 6.0)));
    }
}

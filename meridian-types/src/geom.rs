use crate::circle::Circle;
use crate::collection::{MultiLineString, MultiPoint, MultiPolygon};
use crate::coordinate::Coordinate;
use crate::geometry::{Geometry, GeometryBase};
use crate::geometry_collection::GeometryCollection;
use crate::line_string::LineString;
use crate::measurer::Measurer;
use crate::point::Point;
use crate::polygon::Polygon;
use crate::rect::Extent;

/// Any geometry supported by the crate.
#[derive(Debug, Clone)]
pub enum Geom {
    /// Point.
    Point(Point),
    /// Line.
    LineString(LineString),
    /// Polygon.
    Polygon(Polygon),
    /// Circle.
    Circle(Circle),
    /// Set of points.
    MultiPoint(MultiPoint),
    /// Set of lines.
    MultiLineString(MultiLineString),
    /// Set of polygons.
    MultiPolygon(MultiPolygon),
    /// Heterogeneous collection.
    GeometryCollection(GeometryCollection),
}

macro_rules! dispatch {
    ($self:ident, $v:ident => $e:expr) => {
        match $self {
            Geom::Point($v) => $e,
            Geom::LineString($v) => $e,
            Geom::Polygon($v) => $e,
            Geom::Circle($v) => $e,
            Geom::MultiPoint($v) => $e,
            Geom::MultiLineString($v) => $e,
            Geom::MultiPolygon($v) => $e,
            Geom::GeometryCollection($v) => $e,
        }
    };
}

impl Geometry for Geom {
    fn geometry_type(&self) -> &'static str {
        dispatch!(self, v => v.geometry_type())
    }

    fn base(&self) -> &GeometryBase {
        dispatch!(self, v => v.base())
    }

    fn base_mut(&mut self) -> &mut GeometryBase {
        dispatch!(self, v => v.base_mut())
    }

    fn compute_extent(&self, measurer: Option<&dyn Measurer>) -> Option<Extent> {
        dispatch!(self, v => v.compute_extent(measurer))
    }

    fn extent(&self) -> Option<Extent> {
        dispatch!(self, v => v.extent())
    }

    fn geodesic_length(&self) -> f64 {
        dispatch!(self, v => v.geodesic_length())
    }

    fn geodesic_area(&self) -> f64 {
        dispatch!(self, v => v.geodesic_area())
    }

    fn center(&self) -> Option<Coordinate> {
        dispatch!(self, v => v.center())
    }

    fn vertices(&self) -> Vec<Coordinate> {
        dispatch!(self, v => v.vertices())
    }

    fn to_geojson_geometry(&self) -> geojson::Geometry {
        dispatch!(self, v => v.to_geojson_geometry())
    }
}

macro_rules! impl_from {
    ($variant:ident, $ty:ty) => {
        impl From<$ty> for Geom {
            fn from(value: $ty) -> Self {
                Self::$variant(value)
            }
        }
    };
}

impl_from!(Point, Point);
impl_from!(LineString, LineString);
impl_from!(Polygon, Polygon);
impl_from!(Circle, Circle);
impl_from!(MultiPoint, MultiPoint);
impl_from!(MultiLineString, MultiLineString);
impl_from!(MultiPolygon, MultiPolygon);
impl_from!(GeometryCollection, GeometryCollection);

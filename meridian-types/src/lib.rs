//! Geometry model used by `meridian`.
//!
//! Geometries keep their coordinates in a geographic or projected frame and compute their metrics
//! (extent, length, area) through a pluggable [`Measurer`]. Besides simple geometries the crate provides
//! a parametric [`Circle`] and typed collections ([`MultiPoint`], [`MultiLineString`],
//! [`MultiPolygon`]) built on [`MultiGeometry`]. All geometries can be exported as GeoJSON.
//!
//! ```
//! use meridian_types::{Circle, Geometry, GeometryConfig};
//!
//! let circle = Circle::new([0.0, 0.0], 10.0, GeometryConfig::default());
//! let extent = circle.extent().unwrap();
//! assert_eq!(extent.width(), 20.0);
//! assert_eq!(circle.shell().len(), 60);
//! ```

mod circle;
mod collection;
mod config;
mod coordinate;
mod datum;
pub mod error;
mod geom;
mod geometry;
mod geometry_collection;
mod line_string;
mod measurer;
mod point;
mod polygon;
mod projection;
mod rect;

pub use circle::{Circle, CircleJson, CircleOptions, FeatureStub, GeometryStub};
pub use collection::{
    CollectionElement, CollectionInput, MultiGeometry, MultiLineString, MultiPoint, MultiPolygon,
};
pub use config::{GeometryConfig, DEFAULT_HIT_TOLERANCE, DEFAULT_SHELL_POINTS};
pub use coordinate::{CartesianPoint2d, CartesianPoint2dFloat, Coordinate};
pub use datum::Datum;
pub use error::GeometryError;
pub use geom::Geom;
pub use geometry::{Geometry, GeometryBase, JsonObject, ShapeListener};
pub use geometry_collection::GeometryCollection;
pub use line_string::LineString;
pub use measurer::{Measurer, PlanarMeasurer, SphereMeasurer};
pub use point::Point;
pub use polygon::Polygon;
pub use projection::{IdentityProjection, Projection, WebMercator};
pub use rect::{Extent, Rect};

pub use nalgebra::{Point2, Vector2};

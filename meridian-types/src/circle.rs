//! Parametric circle geometry.

use crate::config::{GeometryConfig, DEFAULT_SHELL_POINTS};
use crate::coordinate::{to_closed_ring, CartesianPoint2dFloat, Coordinate};
use crate::error::GeometryError;
use crate::geometry::{Geometry, GeometryBase, JsonObject};
use crate::measurer::Measurer;
use crate::rect::Extent;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Circle given by its center and radius.
///
/// The radius is in the units of the configured [`Measurer`] (meters for geodesic measurers). A circle
/// without a radius is empty: its length and area are zero and it has no extent.
///
/// When a polygon is needed (GeoJSON export, vertex placement) the circle is approximated by its
/// [shell](Circle::shell), regenerated on every call from the current center and radius.
#[derive(Debug, Clone)]
pub struct Circle {
    base: GeometryBase,
    center: Coordinate,
    radius: Option<f64>,
}

impl Circle {
    /// Creates a new circle.
    pub fn new(
        center: impl Into<Coordinate>,
        radius: impl Into<Option<f64>>,
        config: GeometryConfig,
    ) -> Self {
        Self {
            base: GeometryBase::new(config),
            center: center.into(),
            radius: radius.into(),
        }
    }

    /// Radius of the circle.
    pub fn radius(&self) -> Option<f64> {
        self.radius
    }

    /// Sets a new radius.
    pub fn set_radius(&mut self, radius: impl Into<Option<f64>>) -> &mut Self {
        self.radius = radius.into();
        self.on_shape_changed();
        self
    }

    /// Center of the circle.
    pub fn coordinates(&self) -> Coordinate {
        self.center
    }

    /// Moves the circle.
    pub fn set_coordinates(&mut self, center: impl Into<Coordinate>) -> &mut Self {
        self.center = center.into();
        self.on_shape_changed();
        self
    }

    /// Polygon approximation of the circle with [`GeometryConfig::shell_points`] vertices.
    ///
    /// Vertex `i` is located at angle `360° * i / N` counting counterclockwise from the x axis. The
    /// ring is not closed (the first vertex is not repeated). Empty if there is no radius or measurer.
    pub fn shell(&self) -> Vec<Coordinate> {
        let (Some(measurer), Some(radius)) = (self.config().measurer(), self.radius) else {
            return vec![];
        };

        let number_of_points = self.config().shell_points();
        (0..number_of_points)
            .map(|i| {
                let rad = (360.0 * i as f64 / number_of_points as f64).to_radians();
                measurer.locate(&self.center, radius * rad.cos(), radius * rad.sin())
            })
            .collect()
    }

    /// A circle never has holes.
    pub fn holes(&self) -> Vec<Vec<Coordinate>> {
        vec![]
    }

    /// Checks if the screen `point` hits the circle.
    ///
    /// `to_screen` converts map coordinates into screen pixels. The point is inside if its distance from
    /// the projected center does not exceed the projected radius plus `tolerance` (the configured hit
    /// tolerance if not given).
    pub fn contains_point(
        &self,
        point: &Point2<f64>,
        tolerance: Option<f64>,
        to_screen: impl Fn(&Coordinate) -> Option<Point2<f64>>,
    ) -> bool {
        let Some(center) = to_screen(&self.center) else {
            return false;
        };
        let Some(extent) = self.extent() else {
            return false;
        };
        let (Some(min), Some(max)) = (
            to_screen(&Coordinate::new(extent.x_min(), extent.y_min())),
            to_screen(&Coordinate::new(extent.x_max(), extent.y_max())),
        ) else {
            return false;
        };

        let radius = (max.x - min.x).abs() / 2.0;
        let tolerance = tolerance.unwrap_or_else(|| self.config().hit_tolerance());
        center.distance(point) <= radius + tolerance
    }

    /// Persisted form of the circle that keeps the exact center and radius.
    pub fn to_json(&self) -> CircleJson {
        let feature = self.to_geojson(false);
        CircleJson {
            feature: FeatureStub {
                kind: "Feature".to_string(),
                geometry: GeometryStub {
                    kind: "Polygon".to_string(),
                },
                id: self.base.id().map(str::to_string),
                properties: feature.properties,
            },
            sub_type: CIRCLE_SUB_TYPE.to_string(),
            coordinates: self.center,
            radius: self.radius,
            options: CircleOptions {
                number_of_shell_points: self.config().shell_points(),
            },
            symbol: self.base.symbol().cloned(),
        }
    }

    /// Restores a circle from its persisted form.
    ///
    /// The measurer and hit tolerance come from `config`, the number of shell points from the persisted
    /// options.
    pub fn from_json(json: CircleJson, config: GeometryConfig) -> Result<Self, GeometryError> {
        if json.sub_type != CIRCLE_SUB_TYPE {
            return Err(GeometryError::Persisted(format!(
                "expected sub type {CIRCLE_SUB_TYPE}, got {}",
                json.sub_type
            )));
        }

        let config = config.with_shell_points(json.options.number_of_shell_points);
        let mut circle = Circle::new(json.coordinates, json.radius, config);
        circle.base.set_id(json.feature.id);
        circle.base.set_properties(json.feature.properties);
        circle.base.set_symbol(json.symbol);

        Ok(circle)
    }

    /// Restores a circle from a JSON value holding its persisted form.
    pub fn from_json_value(
        value: serde_json::Value,
        config: GeometryConfig,
    ) -> Result<Self, GeometryError> {
        Self::from_json(serde_json::from_value(value)?, config)
    }
}

impl Geometry for Circle {
    fn geometry_type(&self) -> &'static str {
        "Circle"
    }

    fn base(&self) -> &GeometryBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut GeometryBase {
        &mut self.base
    }

    // Offsetting by the radius along both axes is an approximation under geodesic measurers.
    fn compute_extent(&self, measurer: Option<&dyn Measurer>) -> Option<Extent> {
        let measurer = measurer?;
        let radius = self.radius?;

        let p1 = measurer.locate(&self.center, radius, radius);
        let p2 = measurer.locate(&self.center, -radius, -radius);
        Some(Extent::from_corners(&p1, &p2))
    }

    fn geodesic_length(&self) -> f64 {
        self.radius.map(|r| 2.0 * PI * r).unwrap_or(0.0)
    }

    fn geodesic_area(&self) -> f64 {
        self.radius.map(|r| PI * r * r).unwrap_or(0.0)
    }

    fn center(&self) -> Option<Coordinate> {
        Some(self.center)
    }

    fn vertices(&self) -> Vec<Coordinate> {
        self.shell()
    }

    fn to_geojson_geometry(&self) -> geojson::Geometry {
        geojson::Geometry::new(geojson::Value::Polygon(vec![to_closed_ring(&self.shell())]))
    }
}

const CIRCLE_SUB_TYPE: &str = "Circle";

/// Persisted form of a [`Circle`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleJson {
    /// Feature envelope with a stubbed geometry.
    pub feature: FeatureStub,
    /// Always `"Circle"`.
    pub sub_type: String,
    /// Center as `[x, y]`.
    pub coordinates: Coordinate,
    /// Radius.
    pub radius: Option<f64>,
    /// Construction options.
    #[serde(default)]
    pub options: CircleOptions,
    /// Symbol of the geometry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<JsonObject>,
}

/// GeoJSON-like feature whose geometry only carries the type tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureStub {
    /// Always `"Feature"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Stubbed geometry.
    pub geometry: GeometryStub,
    /// Feature id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Feature properties.
    #[serde(default)]
    pub properties: Option<JsonObject>,
}

/// Geometry with a type tag and no coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryStub {
    /// Geometry type, `"Polygon"` for circles.
    #[serde(rename = "type")]
    pub kind: String,
}

/// Persisted construction options of a circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleOptions {
    /// Number of shell points.
    pub number_of_shell_points: usize,
}

impl Default for CircleOptions {
    fn default() -> Self {
        Self {
            number_of_shell_points: DEFAULT_SHELL_POINTS,
        }
    }
}

//! The [`Geometry`] trait and the state every geometry shares ([`GeometryBase`]).

use crate::config::GeometryConfig;
use crate::coordinate::Coordinate;
use crate::measurer::Measurer;
use crate::rect::Extent;
use geojson::feature::Id;
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, OnceLock};

/// JSON object used for feature properties and symbols.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// Receives notifications when the shape of a geometry changes.
pub trait ShapeListener: Send + Sync {
    /// Called after every shape-changing mutation, once derived caches have been dropped.
    fn on_shape_changed(&self, id: Option<&str>, version: u64);
}

/// Identity, properties, symbol and derived caches of a geometry.
#[derive(Clone, Default)]
pub struct GeometryBase {
    id: Option<String>,
    properties: Option<JsonObject>,
    symbol: Option<JsonObject>,
    config: GeometryConfig,
    extent: OnceLock<Option<Extent>>,
    version: u64,
    listener: Option<Arc<dyn ShapeListener>>,
}

impl Debug for GeometryBase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeometryBase")
            .field("id", &self.id)
            .field("properties", &self.properties)
            .field("symbol", &self.symbol)
            .field("config", &self.config)
            .field("version", &self.version)
            .finish()
    }
}

impl GeometryBase {
    /// Creates an empty base with the given configuration.
    pub fn new(config: GeometryConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Id of the geometry.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Sets id of the geometry.
    pub fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    /// Feature properties.
    pub fn properties(&self) -> Option<&JsonObject> {
        self.properties.as_ref()
    }

    /// Replaces feature properties.
    pub fn set_properties(&mut self, properties: Option<JsonObject>) {
        self.properties = properties;
    }

    /// Raw symbol (style) of the geometry.
    pub fn symbol(&self) -> Option<&JsonObject> {
        self.symbol.as_ref()
    }

    /// Replaces the symbol.
    pub fn set_symbol(&mut self, symbol: Option<JsonObject>) {
        self.symbol = symbol;
    }

    /// Configuration of the geometry.
    pub fn config(&self) -> &GeometryConfig {
        &self.config
    }

    /// Number of shape changes since construction.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Sets the listener notified about shape changes.
    pub fn set_listener(&mut self, listener: Option<Arc<dyn ShapeListener>>) {
        self.listener = listener;
    }

    /// Drops derived caches and notifies the listener.
    pub fn shape_changed(&mut self) {
        self.extent = OnceLock::new();
        self.version += 1;
        if let Some(listener) = &self.listener {
            listener.on_shape_changed(self.id.as_deref(), self.version);
        }
    }

    fn extent_or_init(&self, compute: impl FnOnce() -> Option<Extent>) -> Option<Extent> {
        *self.extent.get_or_init(compute)
    }
}

/// Common behaviour of all geometries.
pub trait Geometry {
    /// Type name of the geometry, e.g. `"Circle"` or `"MultiPoint"`.
    fn geometry_type(&self) -> &'static str;

    /// Shared geometry state.
    fn base(&self) -> &GeometryBase;

    /// Mutable shared geometry state.
    fn base_mut(&mut self) -> &mut GeometryBase;

    /// Computes the bounding extent with the given measurer. Returns `None` if the measurer is absent
    /// or the geometry is empty.
    fn compute_extent(&self, measurer: Option<&dyn Measurer>) -> Option<Extent>;

    /// Length of the geometry (perimeter for areal geometries) in measurer units.
    fn geodesic_length(&self) -> f64;

    /// Area of the geometry in squared measurer units.
    fn geodesic_area(&self) -> f64;

    /// Representative center of the geometry.
    fn center(&self) -> Option<Coordinate>;

    /// All vertices of the geometry in drawing order.
    fn vertices(&self) -> Vec<Coordinate>;

    /// GeoJSON representation of the geometry itself.
    fn to_geojson_geometry(&self) -> geojson::Geometry;

    /// Configuration of the geometry.
    fn config(&self) -> &GeometryConfig {
        self.base().config()
    }

    /// Extent computed with the configured measurer. The value is cached until the next shape change.
    fn extent(&self) -> Option<Extent> {
        let base = self.base();
        base.extent_or_init(|| self.compute_extent(base.config().measurer()))
    }

    /// Must be called by every shape-changing setter.
    fn on_shape_changed(&mut self) {
        self.base_mut().shape_changed();
    }

    /// GeoJSON feature with the geometry's id and properties.
    fn to_geojson(&self, include_geometry: bool) -> geojson::Feature {
        let base = self.base();
        geojson::Feature {
            bbox: None,
            geometry: include_geometry.then(|| self.to_geojson_geometry()),
            id: base.id().map(|id| Id::String(id.to_string())),
            properties: base.properties().cloned(),
            foreign_members: None,
        }
    }
}

/// Arithmetic mean of the coordinates.
pub(crate) fn average(coordinates: &[Coordinate]) -> Option<Coordinate> {
    if coordinates.is_empty() {
        return None;
    }

    let n = coordinates.len() as f64;
    let (x, y) = coordinates
        .iter()
        .fold((0.0, 0.0), |(x, y), c| (x + c.x, y + c.y));
    Some(Coordinate::new(x / n, y / n))
}

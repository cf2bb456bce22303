//! Symbols describe how geometries are drawn. A symbol is a JSON object stored with the geometry; a
//! symbolizer turns it into draw calls against a [`RasterContext`](crate::render::RasterContext).
//!
//! Only image markers are provided. [`ImageMarkerSymbolizer::test`] lets a dispatcher decide whether a
//! symbol is handled by it.

mod image_marker;

pub use image_marker::{ImageMarkerStyle, ImageMarkerSymbolizer};

use crate::error::RenderError;
use meridian_types::JsonObject;
use serde::{Deserialize, Serialize};

/// Where markers are put along a geometry.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerPlacement {
    /// The point itself for point geometries, the center for everything else.
    #[default]
    Point,
    /// Every vertex of the geometry.
    Vertex,
}

/// Marker properties of a symbol as they are stored with the geometry.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerSymbol {
    /// Image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker_file: Option<String>,
    /// Opacity in `0..=1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker_opacity: Option<f64>,
    /// Width in pixels. Natural image width if not set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker_width: Option<u32>,
    /// Height in pixels. Natural image height if not set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker_height: Option<u32>,
    /// Horizontal offset in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker_dx: Option<f64>,
    /// Vertical offset in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker_dy: Option<f64>,
    /// Clockwise rotation in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker_rotation: Option<f64>,
    /// Marker placement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker_placement: Option<MarkerPlacement>,
}

impl MarkerSymbol {
    /// Image marker symbol with the given image and default properties.
    pub fn image(file: impl Into<String>) -> Self {
        Self {
            marker_file: Some(file.into()),
            ..Default::default()
        }
    }

    /// Reads marker properties from a symbol object. Unknown keys are ignored.
    pub fn from_json(symbol: &JsonObject) -> Result<Self, RenderError> {
        Ok(serde_json::from_value(serde_json::Value::Object(
            symbol.clone(),
        ))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn object(value: serde_json::Value) -> JsonObject {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn reads_camel_case_keys() {
        let symbol = MarkerSymbol::from_json(&object(json!({
            "markerFile": "pin.png",
            "markerOpacity": 0.5,
            "markerWidth": 10,
            "markerDy": -4.0,
            "markerPlacement": "vertex",
            "lineColor": "#f00",
        })))
        .unwrap();

        assert_eq!(symbol.marker_file.as_deref(), Some("pin.png"));
        assert_eq!(symbol.marker_opacity, Some(0.5));
        assert_eq!(symbol.marker_width, Some(10));
        assert_eq!(symbol.marker_height, None);
        assert_eq!(symbol.marker_dy, Some(-4.0));
        assert_eq!(symbol.marker_placement, Some(MarkerPlacement::Vertex));
    }

    #[test]
    fn invalid_symbol() {
        let result = MarkerSymbol::from_json(&object(json!({ "markerWidth": "wide" })));
        assert_matches!(result, Err(RenderError::Symbol(_)));
    }

    #[test]
    fn serializes_only_set_keys() {
        let value = serde_json::to_value(MarkerSymbol::image("pin.png")).unwrap();
        assert_eq!(value, json!({ "markerFile": "pin.png" }));
    }
}

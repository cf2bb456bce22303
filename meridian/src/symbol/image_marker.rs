use crate::decoded_image::DecodedImage;
use crate::error::RenderError;
use crate::painter::Painter;
use crate::render::{AlphaScope, RasterContext, SavedState};
use crate::resource::{ResourceCache, ResourceKey};
use crate::symbol::{MarkerPlacement, MarkerSymbol};
use log::{debug, warn};
use meridian_types::{Geometry, Rect};
use nalgebra::Point2;
use std::sync::Arc;

/// Image marker properties with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageMarkerStyle {
    /// Image reference.
    pub file: Option<String>,
    /// Opacity in `0..=1`.
    pub opacity: f64,
    /// Width in pixels. `None` until the natural size of the image is known.
    pub width: Option<u32>,
    /// Height in pixels. `None` until the natural size of the image is known.
    pub height: Option<u32>,
    /// Horizontal offset in pixels.
    pub dx: f64,
    /// Vertical offset in pixels.
    pub dy: f64,
    /// Clockwise rotation in degrees.
    pub rotation: f64,
    /// Marker placement.
    pub placement: MarkerPlacement,
}

impl ImageMarkerStyle {
    /// Applies defaults to the raw symbol.
    pub fn translate(symbol: &MarkerSymbol) -> Self {
        Self {
            file: symbol.marker_file.clone(),
            opacity: symbol.marker_opacity.unwrap_or(1.0),
            width: symbol.marker_width,
            height: symbol.marker_height,
            dx: symbol.marker_dx.unwrap_or(0.0),
            dy: symbol.marker_dy.unwrap_or(0.0),
            rotation: symbol.marker_rotation.unwrap_or(0.0),
            placement: symbol.marker_placement.unwrap_or_default(),
        }
    }

    /// Rotation in radians.
    pub fn rotation(&self) -> f64 {
        self.rotation.to_radians()
    }

    /// Marker offset.
    pub fn dx_dy(&self) -> (f64, f64) {
        (self.dx, self.dy)
    }

    /// Key the image of the marker is stored under in a [`ResourceCache`].
    pub fn resource_key(&self) -> Option<ResourceKey> {
        self.file
            .as_ref()
            .map(|file| ResourceKey::new(file.clone(), self.width, self.height))
    }

    /// Returns a copy of the style with both dimensions set.
    pub fn with_dimensions(&self, width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..self.clone()
        }
    }

    fn has_dimensions(&self) -> bool {
        self.width.is_some() && self.height.is_some()
    }

    fn is_invisible(&self) -> bool {
        self.width == Some(0) || self.height == Some(0) || self.opacity == 0.0
    }
}

/// Draws an image at every render point of a geometry.
///
/// The image is anchored by its bottom-center: the point (shifted by the marker offset) lies on the
/// middle of the bottom edge of the image. Rotation turns the image around that point.
#[derive(Debug)]
pub struct ImageMarkerSymbolizer {
    symbol: MarkerSymbol,
    style: ImageMarkerStyle,
    painter: Arc<dyn Painter>,
}

impl ImageMarkerSymbolizer {
    /// Creates a symbolizer drawing the symbol through the painter.
    pub fn new(symbol: MarkerSymbol, painter: Arc<dyn Painter>) -> Self {
        let style = ImageMarkerStyle::translate(&symbol);
        Self {
            symbol,
            style,
            painter,
        }
    }

    /// Creates a symbolizer for the symbol stored with the geometry.
    ///
    /// Returns `Ok(None)` if the geometry has no symbol or the symbol is not an image marker.
    pub fn for_geometry(
        geometry: &impl Geometry,
        painter: Arc<dyn Painter>,
    ) -> Result<Option<Self>, RenderError> {
        let Some(symbol) = geometry.base().symbol() else {
            return Ok(None);
        };

        let symbol = MarkerSymbol::from_json(symbol)?;
        Ok(Self::test(Some(&symbol)).then(|| Self::new(symbol, painter)))
    }

    /// Returns true if the symbol is drawn by this symbolizer.
    pub fn test(symbol: Option<&MarkerSymbol>) -> bool {
        symbol.is_some_and(|s| s.marker_file.is_some())
    }

    /// Symbol the symbolizer was created with.
    pub fn symbol(&self) -> &MarkerSymbol {
        &self.symbol
    }

    /// Current style. Dimensions are filled in once the image has been resolved.
    pub fn style(&self) -> &ImageMarkerStyle {
        &self.style
    }

    /// Box occupied by the marker relative to its anchor point, in screen pixels with `y` growing down.
    ///
    /// Unset dimensions are taken from the image in `resources` if it is loaded, and are zero otherwise.
    pub fn get_marker_extent(&self, resources: Option<&dyn ResourceCache>) -> Rect {
        let image = resources.and_then(|resources| {
            self.style
                .resource_key()
                .and_then(|key| resources.get_image(&key))
        });
        let natural = |f: fn(&DecodedImage) -> u32| image.as_deref().map(f).unwrap_or(0);

        let width = self.style.width.unwrap_or_else(|| natural(DecodedImage::width)) as f64;
        let height = self
            .style
            .height
            .unwrap_or_else(|| natural(DecodedImage::height)) as f64;
        let (dx, dy) = self.style.dx_dy();

        Rect::from_corners(
            &Point2::new(dx - width / 2.0, dy),
            &Point2::new(dx + width / 2.0, dy - height),
        )
    }

    /// Looks up the marker image.
    ///
    /// If either dimension of the style is unset, both are replaced with the natural size of the image,
    /// the image is registered under the resolved key and the render cache of the painter is dropped
    /// (except during sprite composition). Returns `None` if the image is not loaded.
    pub fn resolve(&mut self, resources: &mut dyn ResourceCache) -> Option<Arc<DecodedImage>> {
        let key = self.style.resource_key()?;
        let Some(image) = resources.get_image(&key) else {
            warn!("Marker image {key} is not loaded, skipping");
            return None;
        };

        if !self.style.has_dimensions() {
            let resolved = self.style.with_dimensions(image.width(), image.height());
            if let Some(resolved_key) = resolved.resource_key() {
                if !resources.is_resource_loaded(&resolved_key) {
                    resources.add_resource(resolved_key, image.clone());
                }
            }
            self.style = resolved;

            if !self.painter.is_spriting() {
                debug!("Marker size of {key} is resolved, dropping render cache");
                self.painter.remove_cache();
            }
        }

        Some(image)
    }

    /// Draws the marker at every render point of the geometry.
    ///
    /// Nothing is drawn while the image is not in `resources`. Failed draw calls are logged and the rest
    /// of the points are still drawn.
    pub fn symbolize(&mut self, context: &mut dyn RasterContext, resources: &mut dyn ResourceCache) {
        if self.style.is_invisible() {
            return;
        }

        let points = self.painter.render_points(self.style.placement);
        if points.is_empty() {
            return;
        }

        let Some(image) = self.resolve(resources) else {
            return;
        };

        let width = self.style.width.unwrap_or(image.width()) as f64;
        let height = self.style.height.unwrap_or(image.height()) as f64;
        let rotation = self.style.rotation();
        let (dx, dy) = self.style.dx_dy();

        let mut context = AlphaScope::new(context, self.style.opacity);
        for point in points {
            let (x, y) = (point.x + dx, point.y + dy);
            let result = if rotation != 0.0 {
                let mut saved = SavedState::new(&mut *context);
                saved.translate(x, y);
                saved.rotate(rotation);
                saved.draw_image(&image, -width / 2.0, -height, width, height)
            } else {
                context.draw_image(&image, x - width / 2.0, y - height, width, height)
            };

            if let Err(err) = result {
                warn!("Failed to draw marker at ({x}, {y}): {err}");
            }
        }
    }
}

use meridian_types::{Coordinate, IdentityProjection, Projection};
use nalgebra::Point2;
use std::sync::Arc;

/// Part of the map displayed on the screen.
///
/// Geometry coordinates are first projected into the map plane with the view's [`Projection`], then
/// scaled by the resolution (map units per pixel) around the view position. Screen `y` grows
/// downwards.
#[derive(Debug, Clone)]
pub struct MapView {
    position: Coordinate,
    resolution: f64,
    size: (f64, f64),
    projection: Arc<dyn Projection>,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            position: Coordinate::default(),
            resolution: 1.0,
            size: (0.0, 0.0),
            projection: Arc::new(IdentityProjection),
        }
    }
}

impl MapView {
    /// Creates a view centered at `position` (in the map plane).
    pub fn new(position: Coordinate, resolution: f64) -> Self {
        Self {
            position,
            resolution,
            ..Default::default()
        }
    }

    /// Map units per pixel.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Returns a copy of the view with the given resolution.
    pub fn with_resolution(&self, resolution: f64) -> Self {
        Self {
            resolution,
            ..self.clone()
        }
    }

    /// Screen size in pixels.
    pub fn size(&self) -> (f64, f64) {
        self.size
    }

    /// Returns a copy of the view with the given screen size.
    pub fn with_size(&self, width: f64, height: f64) -> Self {
        Self {
            size: (width, height),
            ..self.clone()
        }
    }

    /// Returns a copy of the view with the given projection.
    pub fn with_projection(&self, projection: Arc<dyn Projection>) -> Self {
        Self {
            projection,
            ..self.clone()
        }
    }

    /// Position of the view center in the map plane.
    pub fn position(&self) -> Coordinate {
        self.position
    }

    /// Converts a geometry coordinate into screen pixels.
    pub fn map_to_screen(&self, coordinate: &Coordinate) -> Option<Point2<f64>> {
        let projected = self.projection.project(coordinate)?;
        let x = (projected.x - self.position.x) / self.resolution + self.size.0 / 2.0;
        let y = self.size.1 / 2.0 - (projected.y - self.position.y) / self.resolution;

        (x.is_finite() && y.is_finite()).then(|| Point2::new(x, y))
    }

    /// Converts a screen point into geometry coordinates.
    pub fn screen_to_map(&self, point: &Point2<f64>) -> Option<Coordinate> {
        let x = (point.x - self.size.0 / 2.0) * self.resolution + self.position.x;
        let y = (self.size.1 / 2.0 - point.y) * self.resolution + self.position.y;
        self.projection.unproject(&Coordinate::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use meridian_types::WebMercator;

    #[test]
    fn map_to_screen_flips_y() {
        let view = MapView::new(Coordinate::new(100.0, 100.0), 2.0).with_size(200.0, 100.0);

        assert_eq!(
            view.map_to_screen(&Coordinate::new(100.0, 100.0)),
            Some(Point2::new(100.0, 50.0))
        );
        assert_eq!(
            view.map_to_screen(&Coordinate::new(120.0, 110.0)),
            Some(Point2::new(110.0, 45.0))
        );
        assert_eq!(
            view.screen_to_map(&Point2::new(110.0, 45.0)),
            Some(Coordinate::new(120.0, 110.0))
        );
    }

    #[test]
    fn projected_view() {
        let view = MapView::new(Coordinate::new(0.0, 0.0), 1000.0)
            .with_size(100.0, 100.0)
            .with_projection(Arc::new(WebMercator::default()));
        let center = view.map_to_screen(&Coordinate::new(0.0, 0.0)).unwrap();
        assert_relative_eq!(center.x, 50.0, epsilon = 1e-6);
        assert_relative_eq!(center.y, 50.0, epsilon = 1e-6);

        let east = view.map_to_screen(&Coordinate::new(0.1, 0.0)).unwrap();
        assert!(east.x > 50.0);
    }
}

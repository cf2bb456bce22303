use crate::symbol::MarkerPlacement;
use crate::view::MapView;
use log::debug;
use meridian_types::{Coordinate, Geom, Geometry};
use nalgebra::Point2;
use parking_lot::RwLock;
use std::fmt::Debug;
use std::sync::Arc;

/// Render session of a single geometry.
///
/// A painter supplies the screen-space points a symbolizer draws at and owns whatever render cache is
/// derived from the geometry.
pub trait Painter: Debug + Send + Sync {
    /// Screen points of the geometry for the given placement, in drawing order.
    fn render_points(&self, placement: MarkerPlacement) -> Vec<Point2<f64>>;

    /// Whether the current pass composes a sprite. Cache invalidation is skipped during such passes.
    fn is_spriting(&self) -> bool;

    /// Drops the render cache so the next pass recomputes it.
    fn remove_cache(&self);
}

#[derive(Debug)]
struct CachedPoints {
    version: u64,
    placement: MarkerPlacement,
    points: Vec<Point2<f64>>,
}

/// [`Painter`] projecting a shared [`Geom`] through a [`MapView`].
///
/// Projected points are cached until the geometry changes shape, the view changes or
/// [`Painter::remove_cache`] is called.
#[derive(Debug)]
pub struct GeometryPainter {
    geometry: Arc<RwLock<Geom>>,
    view: RwLock<MapView>,
    spriting: RwLock<bool>,
    cache: RwLock<Option<CachedPoints>>,
}

impl GeometryPainter {
    /// Creates a painter for the geometry.
    pub fn new(geometry: Arc<RwLock<Geom>>, view: MapView) -> Self {
        Self {
            geometry,
            view: RwLock::new(view),
            spriting: RwLock::new(false),
            cache: RwLock::new(None),
        }
    }

    /// Geometry being painted.
    pub fn geometry(&self) -> &Arc<RwLock<Geom>> {
        &self.geometry
    }

    /// Current view.
    pub fn view(&self) -> MapView {
        self.view.read().clone()
    }

    /// Replaces the view and drops the projected points.
    pub fn set_view(&self, view: MapView) {
        *self.view.write() = view;
        self.remove_cache();
    }

    /// Marks the start or the end of a sprite composition pass.
    pub fn set_spriting(&self, spriting: bool) {
        *self.spriting.write() = spriting;
    }

    /// Whether projected points are currently cached.
    pub fn has_cache(&self) -> bool {
        self.cache.read().is_some()
    }

    fn project(&self, geometry: &Geom, placement: MarkerPlacement) -> Vec<Point2<f64>> {
        let view = self.view.read();
        placement_coordinates(geometry, placement)
            .iter()
            .filter_map(|c| view.map_to_screen(c))
            .collect()
    }
}

impl Painter for GeometryPainter {
    fn render_points(&self, placement: MarkerPlacement) -> Vec<Point2<f64>> {
        let geometry = self.geometry.read();
        let version = geometry.base().version();

        if let Some(cached) = &*self.cache.read() {
            if cached.version == version && cached.placement == placement {
                return cached.points.clone();
            }
        }

        let points = self.project(&geometry, placement);
        *self.cache.write() = Some(CachedPoints {
            version,
            placement,
            points: points.clone(),
        });

        points
    }

    fn is_spriting(&self) -> bool {
        *self.spriting.read()
    }

    fn remove_cache(&self) {
        if self.cache.write().take().is_some() {
            debug!("Render cache of the geometry painter is dropped");
        }
    }
}

fn placement_coordinates(geometry: &Geom, placement: MarkerPlacement) -> Vec<Coordinate> {
    match placement {
        MarkerPlacement::Vertex => geometry.vertices(),
        MarkerPlacement::Point => match geometry {
            Geom::Point(point) => vec![point.coordinates()],
            Geom::MultiPoint(points) => points.geometries().iter().map(|p| p.coordinates()).collect(),
            other => other.center().into_iter().collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_types::{CollectionInput, GeometryConfig, LineString, MultiPoint, Point, Polygon};

    fn painter(geometry: impl Into<Geom>) -> GeometryPainter {
        let view = MapView::new(Coordinate::new(0.0, 0.0), 1.0).with_size(100.0, 100.0);
        GeometryPainter::new(Arc::new(RwLock::new(geometry.into())), view)
    }

    #[test]
    fn point_placement_of_points() {
        let config = GeometryConfig::default();
        let points = MultiPoint::new(
            CollectionInput::Coordinates(vec![
                Coordinate::new(0.0, 0.0),
                Coordinate::new(10.0, 10.0),
            ]),
            config.clone(),
        );

        let multi = painter(points);
        assert_eq!(
            multi.render_points(MarkerPlacement::Point),
            vec![Point2::new(50.0, 50.0), Point2::new(60.0, 40.0)]
        );

        let single = painter(Point::new([-10.0, 0.0], config));
        assert_eq!(
            single.render_points(MarkerPlacement::Point),
            vec![Point2::new(40.0, 50.0)]
        );
    }

    #[test]
    fn point_placement_of_polygon_uses_center() {
        let polygon = Polygon::new(
            vec![vec![
                Coordinate::new(0.0, 0.0),
                Coordinate::new(20.0, 0.0),
                Coordinate::new(20.0, 20.0),
                Coordinate::new(0.0, 20.0),
            ]],
            GeometryConfig::default(),
        );
        let painter = painter(polygon);
        let points = painter.render_points(MarkerPlacement::Point);
        assert_eq!(points.len(), 1);

        assert_eq!(painter.render_points(MarkerPlacement::Vertex).len(), 4);
    }

    #[test]
    fn cache_follows_geometry_version() {
        let line = LineString::new(
            vec![Coordinate::new(0.0, 0.0), Coordinate::new(10.0, 0.0)],
            GeometryConfig::default(),
        );
        let painter = painter(line);
        assert!(!painter.has_cache());

        let first = painter.render_points(MarkerPlacement::Vertex);
        assert!(painter.has_cache());
        assert_eq!(first[1], Point2::new(60.0, 50.0));

        if let Geom::LineString(line) = &mut *painter.geometry().write() {
            line.set_coordinates(vec![Coordinate::new(0.0, 0.0), Coordinate::new(20.0, 0.0)]);
        }

        let second = painter.render_points(MarkerPlacement::Vertex);
        assert_eq!(second[1], Point2::new(70.0, 50.0));

        painter.remove_cache();
        assert!(!painter.has_cache());
    }

    #[test]
    fn view_change_drops_cache() {
        let painter = painter(Point::new([0.0, 0.0], GeometryConfig::default()));
        painter.render_points(MarkerPlacement::Point);

        painter.set_view(painter.view().with_size(200.0, 200.0));
        assert!(!painter.has_cache());
        assert_eq!(
            painter.render_points(MarkerPlacement::Point),
            vec![Point2::new(100.0, 100.0)]
        );
    }
}

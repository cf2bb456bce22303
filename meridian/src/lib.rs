//! Meridian renders vector geometries onto raster surfaces.
//!
//! Geometries come from [`meridian_types`]. A [`Painter`] projects a geometry through a [`MapView`] into
//! screen points, and a symbolizer turns those points plus a style into draw calls against a
//! [`RasterContext`](render::RasterContext). Images used by symbols are looked up in a
//! [`ResourceCache`]; the renderer never loads images itself, so a missing image only skips the draw
//! until a later pass.
//!
//! # Example
//!
//! ```ignore
//! use meridian::render::PixmapContext;
//! use meridian::symbol::{ImageMarkerSymbolizer, MarkerSymbol};
//! use meridian::{GeometryPainter, ImageResources, MapView};
//!
//! let painter = Arc::new(GeometryPainter::new(geometry, MapView::default().with_size(256.0, 256.0)));
//! let mut symbolizer = ImageMarkerSymbolizer::new(MarkerSymbol::image("pin.png"), painter);
//! let mut context = PixmapContext::new(256, 256)?;
//! symbolizer.symbolize(&mut context, &mut resources);
//! ```
//!
//! The tiny-skia backed [`PixmapContext`](render::PixmapContext) is provided; other surfaces can be used
//! by implementing [`RasterContext`](render::RasterContext).

mod decoded_image;
pub mod error;
mod painter;
pub mod render;
mod resource;
pub mod symbol;
mod view;

pub use decoded_image::DecodedImage;
pub use error::RenderError;
pub use painter::{GeometryPainter, Painter};
pub use resource::{ImageResources, ResourceCache, ResourceKey};
pub use view::MapView;

pub use meridian_types;

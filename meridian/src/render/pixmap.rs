use super::RasterContext;
use crate::decoded_image::DecodedImage;
use crate::error::RenderError;
use tiny_skia::{
    FilterQuality, IntSize, Paint, Pattern, Pixmap, PremultipliedColorU8, Rect, SpreadMode,
    Transform,
};

#[derive(Debug, Clone, Copy)]
struct ContextState {
    transform: Transform,
    alpha: f64,
}

impl Default for ContextState {
    fn default() -> Self {
        Self {
            transform: Transform::identity(),
            alpha: 1.0,
        }
    }
}

/// [`RasterContext`] drawing into a `tiny-skia` pixmap.
#[derive(Debug)]
pub struct PixmapContext {
    pixmap: Pixmap,
    state: ContextState,
    stack: Vec<ContextState>,
}

impl PixmapContext {
    /// Creates a transparent surface of the given size.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let pixmap = Pixmap::new(width, height).ok_or(RenderError::InvalidSize { width, height })?;
        Ok(Self {
            pixmap,
            state: ContextState::default(),
            stack: vec![],
        })
    }

    /// Width of the surface.
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Height of the surface.
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Number of saved states.
    pub fn state_depth(&self) -> usize {
        self.stack.len()
    }

    /// Premultiplied RGBA value of a pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?;
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Underlying pixmap.
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Consumes the context returning the pixmap.
    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }
}

impl RasterContext for PixmapContext {
    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state.transform = self.state.transform.pre_translate(dx as f32, dy as f32);
    }

    fn rotate(&mut self, angle: f64) {
        self.state.transform = self
            .state
            .transform
            .pre_concat(Transform::from_rotate(angle.to_degrees() as f32));
    }

    fn global_alpha(&self) -> f64 {
        self.state.alpha
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.state.alpha = alpha.clamp(0.0, 1.0);
    }

    fn draw_image(
        &mut self,
        image: &DecodedImage,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), RenderError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(RenderError::InvalidDrawArea);
        }

        let source = to_pixmap(image)?;
        let rect = Rect::from_xywh(x as f32, y as f32, width as f32, height as f32)
            .ok_or(RenderError::InvalidDrawArea)?;

        let scale_x = width / image.width() as f64;
        let scale_y = height / image.height() as f64;
        let quality = if scale_x == 1.0 && scale_y == 1.0 {
            FilterQuality::Nearest
        } else {
            FilterQuality::Bilinear
        };

        let mut paint = Paint::default();
        paint.anti_alias = false;
        paint.shader = Pattern::new(
            source.as_ref(),
            SpreadMode::Pad,
            quality,
            self.state.alpha as f32,
            Transform::from_row(scale_x as f32, 0.0, 0.0, scale_y as f32, x as f32, y as f32),
        );

        self.pixmap.fill_rect(rect, &paint, self.state.transform, None);
        Ok(())
    }
}

fn to_pixmap(image: &DecodedImage) -> Result<Pixmap, RenderError> {
    let (width, height) = (image.width(), image.height());
    let size = IntSize::from_wh(width, height).ok_or(RenderError::InvalidSize { width, height })?;

    let mut data = Vec::with_capacity(image.bytes().len());
    for px in image.bytes().chunks_exact(4) {
        let color = premultiply(px[0], px[1], px[2], px[3]);
        data.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }

    Pixmap::from_vec(data, size).ok_or(RenderError::InvalidSize { width, height })
}

fn premultiply(r: u8, g: u8, b: u8, a: u8) -> PremultipliedColorU8 {
    tiny_skia::ColorU8::from_rgba(r, g, b, a).premultiply()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn zero_size_surface_is_rejected() {
        assert_matches!(
            PixmapContext::new(0, 10),
            Err(RenderError::InvalidSize {
                width: 0,
                height: 10
            })
        );
    }

    #[test]
    fn draw_image_at_position() {
        let mut context = PixmapContext::new(10, 10).unwrap();
        let image = DecodedImage::solid([255, 0, 0, 255], 2, 2);
        context.draw_image(&image, 4.0, 4.0, 2.0, 2.0).unwrap();

        assert_eq!(context.pixel(4, 4), Some([255, 0, 0, 255]));
        assert_eq!(context.pixel(5, 5), Some([255, 0, 0, 255]));
        assert_eq!(context.pixel(3, 4), Some([0, 0, 0, 0]));
        assert_eq!(context.pixel(6, 6), Some([0, 0, 0, 0]));
    }

    #[test]
    fn translate_is_scoped_by_save_restore() {
        let mut context = PixmapContext::new(10, 10).unwrap();
        let image = DecodedImage::solid([0, 0, 255, 255], 1, 1);

        context.save();
        context.translate(5.0, 5.0);
        context.draw_image(&image, 0.0, 0.0, 1.0, 1.0).unwrap();
        context.restore();
        context.draw_image(&image, 0.0, 0.0, 1.0, 1.0).unwrap();

        assert_eq!(context.pixel(5, 5), Some([0, 0, 255, 255]));
        assert_eq!(context.pixel(0, 0), Some([0, 0, 255, 255]));
        assert_eq!(context.state_depth(), 0);
    }

    #[test]
    fn global_alpha_is_applied() {
        let mut context = PixmapContext::new(4, 4).unwrap();
        context.set_global_alpha(0.5);
        let image = DecodedImage::solid([255, 255, 255, 255], 1, 1);
        context.draw_image(&image, 0.0, 0.0, 1.0, 1.0).unwrap();

        let alpha = context.pixel(0, 0).unwrap()[3];
        assert!((126..=129).contains(&alpha));
    }

    #[test]
    fn empty_draw_area_is_an_error() {
        let mut context = PixmapContext::new(4, 4).unwrap();
        let image = DecodedImage::solid([255, 255, 255, 255], 1, 1);
        assert_matches!(
            context.draw_image(&image, 0.0, 0.0, 0.0, 1.0),
            Err(RenderError::InvalidDrawArea)
        );
    }
}
